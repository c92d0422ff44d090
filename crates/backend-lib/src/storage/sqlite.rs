//! SQLite-backed credential store.
//!
//! Table:
//! - `users`: id, email (UNIQUE, case-sensitive), password_hash, profile (JSON text), created_at
use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use rusqlite::{params, Connection, OptionalExtension};
use uuid::Uuid;

use super::{NewUser, User, UserStore};
use crate::error::StoreError;

/// SQLite credential store. Blocking database calls run on the blocking pool.
#[derive(Clone)]
pub struct SqliteUserStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteUserStore {
    /// Open (or create) the database at the given path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        Self::init(Connection::open(path)?)
    }

    /// Private database that lives as long as the store
    pub fn open_in_memory() -> Result<Self, StoreError> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self, StoreError> {
        // WAL mode for concurrent reads + crash safety
        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous = NORMAL;

             CREATE TABLE IF NOT EXISTS users (
                 id TEXT PRIMARY KEY,
                 email TEXT NOT NULL UNIQUE COLLATE BINARY,
                 password_hash TEXT NOT NULL,
                 profile TEXT NOT NULL DEFAULT '{}',
                 created_at TEXT NOT NULL
             );",
        )?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    async fn with_conn<T, F>(&self, f: F) -> Result<T, StoreError>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> Result<T, StoreError> + Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || f(&*conn.lock())).await?
    }
}

type UserRow = (String, String, String, String, String);

fn row_to_user((id, email, password_hash, profile, created_at): UserRow) -> Result<User, StoreError> {
    let id = Uuid::parse_str(&id).map_err(|e| StoreError::Corrupt(format!("user id: {e}")))?;
    let created_at = DateTime::parse_from_rfc3339(&created_at)
        .map_err(|e| StoreError::Corrupt(format!("created_at: {e}")))?
        .with_timezone(&Utc);

    Ok(User {
        id,
        email,
        password_hash,
        profile: serde_json::from_str(&profile)?,
        created_at,
    })
}

#[async_trait]
impl UserStore for SqliteUserStore {
    async fn exists_by_email(&self, email: &str) -> Result<bool, StoreError> {
        let email = email.to_string();
        self.with_conn(move |conn| {
            let exists = conn.query_row(
                "SELECT EXISTS(SELECT 1 FROM users WHERE email = ?1)",
                params![email],
                |row| row.get(0),
            )?;
            Ok(exists)
        })
        .await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let email = email.to_string();
        self.with_conn(move |conn| {
            let row: Option<UserRow> = conn
                .query_row(
                    "SELECT id, email, password_hash, profile, created_at
                     FROM users WHERE email = ?1",
                    params![email],
                    |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?, row.get(4)?)),
                )
                .optional()?;
            row.map(row_to_user).transpose()
        })
        .await
    }

    async fn save(&self, user: NewUser) -> Result<User, StoreError> {
        let user = user.into_user();
        self.with_conn(move |conn| {
            let profile = serde_json::to_string(&user.profile)?;
            let result = conn.execute(
                "INSERT INTO users (id, email, password_hash, profile, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    user.id.to_string(),
                    user.email,
                    user.password_hash,
                    profile,
                    user.created_at.to_rfc3339(),
                ],
            );

            match result {
                Ok(_) => Ok(user),
                Err(rusqlite::Error::SqliteFailure(err, _))
                    if err.code == rusqlite::ErrorCode::ConstraintViolation =>
                {
                    Err(StoreError::Duplicate(user.email))
                }
                Err(e) => Err(e.into()),
            }
        })
        .await
    }
}
