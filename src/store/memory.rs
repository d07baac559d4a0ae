//! Process-local player store. Ids count up from 1.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{validate_nickname, PlayerStore, StoreError};
use crate::engine::models::{Player, PlayerId};

#[derive(Debug, Default)]
struct Tables {
    players: BTreeMap<PlayerId, Player>,
    by_nickname: HashMap<String, PlayerId>,
}

/// Both tables sit behind one lock so the nickname index never points at a
/// missing player.
#[derive(Debug, Default)]
pub struct InMemoryPlayerStore {
    tables: RwLock<Tables>,
}

impl InMemoryPlayerStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PlayerStore for InMemoryPlayerStore {
    async fn create(&self, nickname: &str) -> Result<PlayerId, StoreError> {
        validate_nickname(nickname)?;

        let mut tables = self.tables.write().await;
        if tables.by_nickname.contains_key(nickname) {
            tracing::warn!(nickname, "nickname already taken");
            return Err(StoreError::Duplicate {
                nickname: nickname.to_string(),
            });
        }

        let id = PlayerId(tables.players.len() as i64 + 1);
        tables.players.insert(id, Player::new(id, nickname));
        tables.by_nickname.insert(nickname.to_string(), id);

        tracing::info!(%id, nickname, "player successfully created");
        Ok(id)
    }

    async fn get_by_id(&self, id: PlayerId) -> Result<Player, StoreError> {
        let tables = self.tables.read().await;
        tables.players.get(&id).cloned().ok_or_else(|| {
            tracing::debug!(%id, "no players found");
            StoreError::NotFound
        })
    }

    async fn get_by_nickname(&self, nickname: &str) -> Result<Player, StoreError> {
        let tables = self.tables.read().await;
        let Some(id) = tables.by_nickname.get(nickname) else {
            tracing::debug!(nickname, "no players found");
            return Err(StoreError::NotFound);
        };
        tables.players.get(id).cloned().ok_or_else(|| {
            StoreError::Integrity(format!("nickname '{}' points at missing id {}", nickname, id))
        })
    }

    async fn list_all(&self) -> Result<Vec<Player>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.players.values().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_ids_are_sequential() {
        let store = InMemoryPlayerStore::new();
        assert_eq!(store.create("Bobbb").await.unwrap(), PlayerId(1));
        assert_eq!(store.create("Danno").await.unwrap(), PlayerId(2));

        let all = store.list_all().await.unwrap();
        let names: Vec<&str> = all.iter().map(|p| p.nickname.as_str()).collect();
        assert_eq!(names, vec!["Bobbb", "Danno"]);
    }

    #[tokio::test]
    async fn test_duplicate_rejected() {
        let store = InMemoryPlayerStore::new();
        store.create("Bobbb").await.unwrap();
        assert_eq!(
            store.create("Bobbb").await,
            Err(StoreError::Duplicate { nickname: "Bobbb".into() })
        );
        assert_eq!(store.list_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_lookup_not_found() {
        let store = InMemoryPlayerStore::new();
        assert_eq!(store.get_by_id(PlayerId(9)).await, Err(StoreError::NotFound));
        assert_eq!(store.get_by_nickname("ghost").await, Err(StoreError::NotFound));
    }

    #[tokio::test]
    async fn test_lookup_found() {
        let store = InMemoryPlayerStore::new();
        let id = store.create("Danno").await.unwrap();
        let by_id = store.get_by_id(id).await.unwrap();
        let by_name = store.get_by_nickname("Danno").await.unwrap();
        assert_eq!(by_id, by_name);
        assert_eq!(by_id, Player::new(id, "Danno"));
    }

    #[tokio::test]
    async fn test_empty_nickname_rejected() {
        let store = InMemoryPlayerStore::new();
        assert!(matches!(
            store.create("").await,
            Err(StoreError::Validation { .. })
        ));
    }
}
