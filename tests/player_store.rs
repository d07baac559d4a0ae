//! Player store contract, exercised through the timeout-bounded directory.

use std::time::Duration;

use hanoi_game_engine::engine::models::PlayerId;
use hanoi_game_engine::engine::settings::StoreSettings;
use hanoi_game_engine::store::{
    open_store, InMemoryPlayerStore, PlayerDirectory, PlayerStore, StoreError,
};

fn directory(store: Box<dyn PlayerStore>) -> PlayerDirectory {
    PlayerDirectory::new(store, Duration::from_secs(5))
}

async fn exercise_contract(directory: &PlayerDirectory) {
    let bob = directory.create("Bobbb").await.unwrap();
    let danno = directory.create("Danno").await.unwrap();
    assert_ne!(bob, danno);

    assert_eq!(directory.get_by_id(bob).await.unwrap().nickname, "Bobbb");
    assert_eq!(directory.get_by_nickname("Danno").await.unwrap().id, danno);

    assert_eq!(
        directory.create("Bobbb").await,
        Err(StoreError::Duplicate { nickname: "Bobbb".into() })
    );
    assert!(matches!(
        directory.create(&"n".repeat(101)).await,
        Err(StoreError::Validation { .. })
    ));

    assert_eq!(directory.get_by_nickname("nobody").await, Err(StoreError::NotFound));
    assert_eq!(directory.get_by_id(PlayerId(999)).await, Err(StoreError::NotFound));

    let names: Vec<String> = directory
        .list_all()
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.nickname)
        .collect();
    assert_eq!(names, vec!["Bobbb", "Danno"]);

    let returning = directory.login_or_register("Danno").await.unwrap();
    assert_eq!(returning.id, danno);
    let fresh = directory.login_or_register("Carol").await.unwrap();
    assert_eq!(fresh.nickname, "Carol");
    assert_eq!(directory.list_all().await.unwrap().len(), 3);
}

#[tokio::test]
async fn in_memory_store_honours_contract() {
    exercise_contract(&directory(Box::new(InMemoryPlayerStore::new()))).await;
}

#[tokio::test]
async fn default_settings_open_memory_store() {
    let store = open_store(&StoreSettings::default()).unwrap();
    exercise_contract(&directory(store)).await;
}

#[cfg(feature = "sqlite")]
#[tokio::test]
async fn sqlite_store_honours_contract() {
    use hanoi_game_engine::store::SqlitePlayerStore;

    let db = tempfile::NamedTempFile::new().unwrap();
    let path = db.path().to_str().unwrap().to_string();
    exercise_contract(&directory(Box::new(SqlitePlayerStore::open(&path).unwrap()))).await;

    // Reopening the same file keeps the players and does not re-run migrations.
    let reopened = directory(Box::new(SqlitePlayerStore::open(&path).unwrap()));
    assert_eq!(reopened.list_all().await.unwrap().len(), 3);
}
