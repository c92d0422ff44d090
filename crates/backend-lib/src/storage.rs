// ============================
// auth-backend/src/storage.rs
// ============================
//! Credential store abstraction with in-memory and SQLite implementations.
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::config::{StorageBackend, StorageSettings};
use crate::error::StoreError;

mod memory;
mod sqlite;

pub use memory::MemoryUserStore;
pub use sqlite::SqliteUserStore;

/// A stored account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    /// scrypt PHC string, never the plaintext password
    pub password_hash: String,
    /// Extra registration fields, stored untouched
    pub profile: Map<String, Value>,
    pub created_at: DateTime<Utc>,
}

/// An account waiting to be saved; the store assigns `id` and `created_at`.
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub profile: Map<String, Value>,
}

impl NewUser {
    pub(crate) fn into_user(self) -> User {
        User {
            id: Uuid::new_v4(),
            email: self.email,
            password_hash: self.password_hash,
            profile: self.profile,
            created_at: Utc::now(),
        }
    }
}

/// Trait for credential stores.
///
/// Emails are matched exactly, case included.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Whether an account with this email exists
    async fn exists_by_email(&self, email: &str) -> Result<bool, StoreError>;

    /// Look up an account by email
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    /// Persist a new account. Fails with [`StoreError::Duplicate`] if the
    /// email was taken since the caller last checked.
    async fn save(&self, user: NewUser) -> Result<User, StoreError>;
}

/// Open the store selected by the settings
pub fn open_store(settings: &StorageSettings) -> Result<Arc<dyn UserStore>, StoreError> {
    let store: Arc<dyn UserStore> = match settings.backend {
        StorageBackend::Memory => Arc::new(MemoryUserStore::new()),
        StorageBackend::Sqlite => Arc::new(SqliteUserStore::open(&settings.path)?),
    };
    tracing::info!(backend = ?settings.backend, "credential store ready");
    Ok(store)
}
