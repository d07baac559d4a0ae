//! Player persistence: the store contract, its backends and a timeout-bounded
//! front door used by the text interface.

mod memory;
#[cfg(feature = "sqlite")]
mod schema;
#[cfg(feature = "sqlite")]
mod sqlite;

use std::time::Duration;

use async_trait::async_trait;

use crate::engine::models::{Player, PlayerId};
use crate::engine::settings::{StoreBackend, StoreSettings};

pub use memory::InMemoryPlayerStore;
#[cfg(feature = "sqlite")]
pub use sqlite::SqlitePlayerStore;

/// Longest nickname a store accepts, in characters.
pub const MAX_NICKNAME_CHARS: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("player is not found")]
    NotFound,

    #[error("cannot create player '{nickname}': nickname is taken")]
    Duplicate { nickname: String },

    #[error("cannot create player '{nickname}': {reason}")]
    Validation { nickname: String, reason: String },

    #[error("player store did not answer within {0:?}")]
    Timeout(Duration),

    #[error("player store integrity error: {0}")]
    Integrity(String),

    #[error("player store error: {0}")]
    Backend(String),
}

/// Read/create contract for player identities.
#[async_trait]
pub trait PlayerStore: Send + Sync {
    async fn create(&self, nickname: &str) -> Result<PlayerId, StoreError>;
    async fn get_by_id(&self, id: PlayerId) -> Result<Player, StoreError>;
    async fn get_by_nickname(&self, nickname: &str) -> Result<Player, StoreError>;
    async fn list_all(&self) -> Result<Vec<Player>, StoreError>;
}

/// Checks shared by every backend before a player is created.
pub fn validate_nickname(nickname: &str) -> Result<(), StoreError> {
    if nickname.trim().is_empty() {
        return Err(StoreError::Validation {
            nickname: nickname.to_string(),
            reason: "name is empty".into(),
        });
    }
    if nickname.chars().count() > MAX_NICKNAME_CHARS {
        return Err(StoreError::Validation {
            nickname: nickname.to_string(),
            reason: "name is too long".into(),
        });
    }
    Ok(())
}

/// Open the backend named in `settings`.
pub fn open_store(settings: &StoreSettings) -> Result<Box<dyn PlayerStore>, StoreError> {
    match settings.backend {
        StoreBackend::Memory => Ok(Box::new(InMemoryPlayerStore::new())),
        #[cfg(feature = "sqlite")]
        StoreBackend::Sqlite => Ok(Box::new(SqlitePlayerStore::open(&settings.database_path)?)),
        #[cfg(not(feature = "sqlite"))]
        StoreBackend::Sqlite => Err(StoreError::Backend(
            "built without the `sqlite` feature".into(),
        )),
    }
}

/// Wraps a [`PlayerStore`] so every call is bounded by `timeout`.
pub struct PlayerDirectory {
    store: Box<dyn PlayerStore>,
    timeout: Duration,
}

impl PlayerDirectory {
    pub fn new(store: Box<dyn PlayerStore>, timeout: Duration) -> Self {
        Self { store, timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    async fn bounded<T>(
        &self,
        call: impl std::future::Future<Output = Result<T, StoreError>>,
    ) -> Result<T, StoreError> {
        match tokio::time::timeout(self.timeout, call).await {
            Ok(result) => result,
            Err(_) => {
                tracing::warn!(timeout = ?self.timeout, "player store call timed out");
                Err(StoreError::Timeout(self.timeout))
            }
        }
    }

    pub async fn create(&self, nickname: &str) -> Result<PlayerId, StoreError> {
        self.bounded(self.store.create(nickname)).await
    }

    pub async fn get_by_id(&self, id: PlayerId) -> Result<Player, StoreError> {
        self.bounded(self.store.get_by_id(id)).await
    }

    pub async fn get_by_nickname(&self, nickname: &str) -> Result<Player, StoreError> {
        self.bounded(self.store.get_by_nickname(nickname)).await
    }

    pub async fn list_all(&self) -> Result<Vec<Player>, StoreError> {
        self.bounded(self.store.list_all()).await
    }

    /// Existing player by nickname, or a freshly created one. Surrounding
    /// whitespace is ignored. Errors other than `NotFound` on the lookup are
    /// returned as-is.
    pub async fn login_or_register(&self, nickname: &str) -> Result<Player, StoreError> {
        let nickname = nickname.trim();
        match self.get_by_nickname(nickname).await {
            Ok(player) => {
                tracing::info!(id = %player.id, nickname, "player logged in");
                Ok(player)
            }
            Err(StoreError::NotFound) => {
                let id = self.create(nickname).await?;
                tracing::info!(%id, nickname, "player registered");
                self.get_by_id(id).await
            }
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_nickname() {
        assert!(validate_nickname("Bobbb").is_ok());
        assert!(matches!(
            validate_nickname("   "),
            Err(StoreError::Validation { .. })
        ));
        let long = "x".repeat(MAX_NICKNAME_CHARS + 1);
        assert_eq!(
            validate_nickname(&long),
            Err(StoreError::Validation {
                nickname: long.clone(),
                reason: "name is too long".into()
            })
        );
        assert!(validate_nickname(&"ж".repeat(MAX_NICKNAME_CHARS)).is_ok());
    }

    struct StalledStore;

    #[async_trait]
    impl PlayerStore for StalledStore {
        async fn create(&self, _nickname: &str) -> Result<PlayerId, StoreError> {
            std::future::pending().await
        }
        async fn get_by_id(&self, _id: PlayerId) -> Result<Player, StoreError> {
            std::future::pending().await
        }
        async fn get_by_nickname(&self, _nickname: &str) -> Result<Player, StoreError> {
            std::future::pending().await
        }
        async fn list_all(&self) -> Result<Vec<Player>, StoreError> {
            Err(StoreError::Backend("connection refused".into()))
        }
    }

    #[tokio::test]
    async fn test_directory_times_out() {
        let timeout = Duration::from_millis(20);
        let directory = PlayerDirectory::new(Box::new(StalledStore), timeout);
        assert_eq!(
            directory.get_by_nickname("Bobbb").await,
            Err(StoreError::Timeout(timeout))
        );
        assert_eq!(
            directory.login_or_register("Bobbb").await,
            Err(StoreError::Timeout(timeout))
        );
    }

    #[tokio::test]
    async fn test_directory_surfaces_backend_errors() {
        let directory = PlayerDirectory::new(Box::new(StalledStore), Duration::from_secs(1));
        assert_eq!(
            directory.list_all().await,
            Err(StoreError::Backend("connection refused".into()))
        );
    }

    #[test]
    fn test_open_memory_store() {
        assert!(open_store(&StoreSettings::default()).is_ok());
    }

    #[cfg(not(feature = "sqlite"))]
    #[test]
    fn test_open_sqlite_without_feature() {
        let settings = StoreSettings {
            backend: StoreBackend::Sqlite,
            ..StoreSettings::default()
        };
        assert!(matches!(open_store(&settings), Err(StoreError::Backend(_))));
    }

    #[tokio::test]
    async fn test_login_or_register() {
        let directory = PlayerDirectory::new(
            Box::new(InMemoryPlayerStore::new()),
            Duration::from_secs(1),
        );
        let created = directory.login_or_register("Bobbb").await.unwrap();
        assert_eq!(created.nickname, "Bobbb");

        let again = directory.login_or_register("Bobbb").await.unwrap();
        assert_eq!(again, created);
        assert_eq!(directory.list_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_login_or_register_trims_nickname() {
        let directory = PlayerDirectory::new(
            Box::new(InMemoryPlayerStore::new()),
            Duration::from_secs(1),
        );
        let padded = directory.login_or_register("  Bobbb \t").await.unwrap();
        assert_eq!(padded.nickname, "Bobbb");

        let plain = directory.login_or_register("Bobbb").await.unwrap();
        assert_eq!(plain, padded);
        assert_eq!(directory.get_by_nickname("Bobbb").await.unwrap().id, padded.id);
        assert_eq!(directory.list_all().await.unwrap().len(), 1);
    }
}
