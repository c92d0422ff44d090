// ============================
// auth-backend/src/lib.rs
// ============================
//! Core library for the auth service: registration, login and token issuance
//! over a pluggable credential store.

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod router;
pub mod storage;
pub mod validation;

use std::sync::Arc;

use crate::auth::{AuthService, DefaultAuth, JwtIssuer};
use crate::config::Settings;
use crate::storage::{open_store, UserStore};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// Authentication service
    pub auth: Arc<dyn AuthService>,
    /// Settings the state was built from
    pub settings: Arc<Settings>,
}

impl AppState {
    /// Create application state over an existing store
    pub fn new(store: Arc<dyn UserStore>, settings: Settings) -> anyhow::Result<Self> {
        settings.validate()?;

        let issuer = Arc::new(JwtIssuer::from_settings(&settings.jwt));
        let auth = Arc::new(DefaultAuth::new(store, issuer, settings.hashing.params()?)?);

        Ok(Self {
            auth,
            settings: Arc::new(settings),
        })
    }

    /// Create application state, opening the store named in the settings
    pub fn from_settings(settings: Settings) -> anyhow::Result<Self> {
        settings.validate()?;
        let store = open_store(&settings.storage)?;
        Self::new(store, settings)
    }
}
