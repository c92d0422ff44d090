//! In-memory credential store.
use async_trait::async_trait;
use dashmap::{mapref::entry::Entry, DashMap};

use super::{NewUser, User, UserStore};
use crate::error::StoreError;

/// Accounts keyed by exact email. Nothing survives a restart.
#[derive(Debug, Default, Clone)]
pub struct MemoryUserStore {
    users: std::sync::Arc<DashMap<String, User>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn exists_by_email(&self, email: &str) -> Result<bool, StoreError> {
        Ok(self.users.contains_key(email))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        Ok(self.users.get(email).map(|user| user.value().clone()))
    }

    async fn save(&self, user: NewUser) -> Result<User, StoreError> {
        match self.users.entry(user.email.clone()) {
            Entry::Occupied(_) => Err(StoreError::Duplicate(user.email)),
            Entry::Vacant(slot) => {
                let user = user.into_user();
                slot.insert(user.clone());
                Ok(user)
            }
        }
    }
}
