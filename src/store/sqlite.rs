//! SQLite-backed player store. Migrations are embedded and applied on open.
//! Diesel is blocking, so every query runs on the blocking thread pool.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};

use super::{schema, validate_nickname, PlayerStore, StoreError};
use crate::engine::models::{Player, PlayerId};

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = schema::players)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
struct PlayerRow {
    id: i32,
    nickname: String,
}

impl From<PlayerRow> for Player {
    fn from(row: PlayerRow) -> Self {
        Player::new(PlayerId(i64::from(row.id)), row.nickname)
    }
}

#[derive(Insertable)]
#[diesel(table_name = schema::players)]
struct NewPlayerRow<'a> {
    nickname: &'a str,
}

pub struct SqlitePlayerStore {
    conn: Arc<Mutex<SqliteConnection>>,
}

impl SqlitePlayerStore {
    /// Connect to `database_path` and bring the schema up to date.
    /// `":memory:"` gives a private in-memory database.
    pub fn open(database_path: &str) -> Result<Self, StoreError> {
        let mut conn = SqliteConnection::establish(database_path).map_err(|e| {
            tracing::warn!(path = database_path, error = %e, "unable to connect to database");
            StoreError::Backend(format!("cannot connect to '{}': {}", database_path, e))
        })?;
        conn.run_pending_migrations(MIGRATIONS).map_err(|e| {
            tracing::warn!(error = %e, "failed to apply migrations");
            StoreError::Backend(format!("failed to apply migrations: {}", e))
        })?;
        tracing::info!(path = database_path, "player database ready");

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    async fn with_conn<T, F>(&self, f: F) -> Result<T, StoreError>
    where
        T: Send + 'static,
        F: FnOnce(&mut SqliteConnection) -> Result<T, StoreError> + Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let mut guard = conn
                .lock()
                .map_err(|_| StoreError::Backend("connection lock poisoned".into()))?;
            f(&mut *guard)
        })
        .await
        .map_err(|e| StoreError::Backend(format!("store task failed: {}", e)))?
    }
}

fn insert_error(nickname: &str, err: DieselError) -> StoreError {
    match err {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            tracing::warn!(nickname, "nickname already taken");
            StoreError::Duplicate {
                nickname: nickname.to_string(),
            }
        }
        other => {
            tracing::warn!(nickname, error = %other, "failed to save player to db");
            StoreError::Backend(other.to_string())
        }
    }
}

fn query_error(err: DieselError) -> StoreError {
    tracing::warn!(error = %err, "failed to read players from db");
    StoreError::Backend(err.to_string())
}

#[async_trait]
impl PlayerStore for SqlitePlayerStore {
    async fn create(&self, nickname: &str) -> Result<PlayerId, StoreError> {
        validate_nickname(nickname)?;
        let nickname = nickname.to_string();

        self.with_conn(move |conn| {
            let row = diesel::insert_into(schema::players::table)
                .values(NewPlayerRow {
                    nickname: &nickname,
                })
                .returning(PlayerRow::as_returning())
                .get_result::<PlayerRow>(conn)
                .map_err(|e| insert_error(&nickname, e))?;
            tracing::info!(id = row.id, nickname = %row.nickname, "player successfully created");
            Ok(PlayerId(i64::from(row.id)))
        })
        .await
    }

    async fn get_by_id(&self, id: PlayerId) -> Result<Player, StoreError> {
        let Ok(key) = i32::try_from(id.0) else {
            return Err(StoreError::NotFound);
        };

        self.with_conn(move |conn| {
            schema::players::table
                .find(key)
                .select(PlayerRow::as_select())
                .first::<PlayerRow>(conn)
                .optional()
                .map_err(query_error)?
                .map(Player::from)
                .ok_or_else(|| {
                    tracing::debug!(id = key, "no players found");
                    StoreError::NotFound
                })
        })
        .await
    }

    async fn get_by_nickname(&self, nickname: &str) -> Result<Player, StoreError> {
        let nickname = nickname.to_string();

        self.with_conn(move |conn| {
            schema::players::table
                .filter(schema::players::nickname.eq(nickname.as_str()))
                .select(PlayerRow::as_select())
                .first::<PlayerRow>(conn)
                .optional()
                .map_err(query_error)?
                .map(Player::from)
                .ok_or_else(|| {
                    tracing::debug!(nickname = %nickname, "no players found");
                    StoreError::NotFound
                })
        })
        .await
    }

    async fn list_all(&self) -> Result<Vec<Player>, StoreError> {
        self.with_conn(|conn| {
            let rows = schema::players::table
                .order(schema::players::id.asc())
                .select(PlayerRow::as_select())
                .load::<PlayerRow>(conn)
                .map_err(query_error)?;
            Ok(rows.into_iter().map(Player::from).collect())
        })
        .await
    }
}
