//! Shared setup for the auth-backend integration tests.
#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use auth_backend::{
    auth::{DefaultAuth, JwtIssuer, TokenIssuer},
    config::{HashingSettings, Settings, StorageBackend},
    error::{StoreError, TokenError},
    storage::{MemoryUserStore, NewUser, User, UserStore},
    AppState,
};

pub const TEST_SECRET: &str = "test-secret-test-secret-test-secret";

/// Settings with a valid secret and scrypt cost low enough for tests
pub fn test_settings() -> Settings {
    let mut settings = Settings::default();
    settings.jwt.secret = TEST_SECRET.to_string();
    settings.storage.backend = StorageBackend::Memory;
    settings.hashing = HashingSettings { log_n: 4, r: 8, p: 1 };
    settings
}

pub fn test_issuer() -> JwtIssuer {
    JwtIssuer::from_settings(&test_settings().jwt)
}

/// Workflow over the given store and issuer with test hashing parameters
pub fn auth_with(store: Arc<dyn UserStore>, issuer: Arc<dyn TokenIssuer>) -> DefaultAuth {
    let params = test_settings().hashing.params().unwrap();
    DefaultAuth::new(store, issuer, params).unwrap()
}

pub fn test_state() -> Arc<AppState> {
    Arc::new(AppState::new(Arc::new(MemoryUserStore::new()), test_settings()).unwrap())
}

/// Memory store that counts every call that can mutate it
#[derive(Default)]
pub struct CountingStore {
    pub inner: MemoryUserStore,
    saves: AtomicUsize,
}

impl CountingStore {
    pub fn saves(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl UserStore for CountingStore {
    async fn exists_by_email(&self, email: &str) -> Result<bool, StoreError> {
        self.inner.exists_by_email(email).await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        self.inner.find_by_email(email).await
    }

    async fn save(&self, user: NewUser) -> Result<User, StoreError> {
        self.saves.fetch_add(1, Ordering::SeqCst);
        self.inner.save(user).await
    }
}

/// Store whose reads succeed and whose writes always fail
pub struct ReadOnlyStore;

#[async_trait]
impl UserStore for ReadOnlyStore {
    async fn exists_by_email(&self, _email: &str) -> Result<bool, StoreError> {
        Ok(false)
    }

    async fn find_by_email(&self, _email: &str) -> Result<Option<User>, StoreError> {
        Ok(None)
    }

    async fn save(&self, _user: NewUser) -> Result<User, StoreError> {
        Err(StoreError::Io(std::io::Error::new(
            std::io::ErrorKind::Other,
            "disk full",
        )))
    }
}

/// Store that says an email is free but rejects the insert, as a racing
/// registration would
pub struct RacingStore;

#[async_trait]
impl UserStore for RacingStore {
    async fn exists_by_email(&self, _email: &str) -> Result<bool, StoreError> {
        Ok(false)
    }

    async fn find_by_email(&self, _email: &str) -> Result<Option<User>, StoreError> {
        Ok(None)
    }

    async fn save(&self, user: NewUser) -> Result<User, StoreError> {
        Err(StoreError::Duplicate(user.email))
    }
}

/// Store that cannot be reached at all
pub struct UnreachableStore;

#[async_trait]
impl UserStore for UnreachableStore {
    async fn exists_by_email(&self, _email: &str) -> Result<bool, StoreError> {
        Err(StoreError::Corrupt("connection refused".to_string()))
    }

    async fn find_by_email(&self, _email: &str) -> Result<Option<User>, StoreError> {
        Err(StoreError::Corrupt("connection refused".to_string()))
    }

    async fn save(&self, _user: NewUser) -> Result<User, StoreError> {
        Err(StoreError::Corrupt("connection refused".to_string()))
    }
}

/// Issuer that always fails
pub struct BrokenIssuer;

impl TokenIssuer for BrokenIssuer {
    fn generate_token(&self, _subject: &str) -> Result<String, TokenError> {
        Err(TokenError::Invalid)
    }
}

/// Issuer returning a fixed token for any subject
pub struct StaticIssuer(pub &'static str);

impl TokenIssuer for StaticIssuer {
    fn generate_token(&self, _subject: &str) -> Result<String, TokenError> {
        Ok(self.0.to_string())
    }
}
