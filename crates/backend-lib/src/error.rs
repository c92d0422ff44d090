// crates/backend-lib/src/error.rs

//! Central error types + Axum integration.
//!
//! The `Display` text of [`AppError`] is the message returned to callers in
//! the [`AuthResult`] envelope, so the wording of each variant is part of the
//! public contract.
use auth_common::AuthResult;
use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::validation::ValidationError;

/// Failures reported by a credential store
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("email already registered: {0}")]
    Duplicate(String),

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("storage task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error("corrupt record: {0}")]
    Corrupt(String),
}

/// Failures reported by a token issuer
#[derive(Error, Debug)]
pub enum TokenError {
    #[error("{0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    #[error("token expired")]
    Expired,

    #[error("invalid token")]
    Invalid,
}

/// Application error types with error codes
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Email already exists")]
    EmailExists,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Registration failed: {0}")]
    Registration(#[source] StoreError),

    #[error("Registration failed: {0}")]
    PasswordHash(String),

    #[error("Login failed: {0}")]
    Login(#[source] StoreError),

    #[error("Token generation failed: {0}")]
    TokenGeneration(#[source] TokenError),

    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppError {
    /// HTTP status used when this error is rendered directly as a response.
    ///
    /// The auth handlers answer workflow failures with `200` and an
    /// [`AuthResult`] and only render [`AppError::InvalidBody`] this way.
    /// The full mapping is for routes built on top of this crate that
    /// return `AppError` themselves.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            AppError::EmailExists => StatusCode::CONFLICT,
            AppError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Stable machine-readable code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "VAL_001",
            AppError::InvalidBody(_) => "VAL_002",
            AppError::EmailExists => "AUTH_001",
            AppError::InvalidCredentials => "AUTH_002",
            AppError::Registration(_) => "STORE_001",
            AppError::Login(_) => "STORE_002",
            AppError::PasswordHash(_) => "HASH_001",
            AppError::TokenGeneration(_) => "TOKEN_001",
            AppError::Config(_) => "CFG_001",
        }
    }

    /// Failure envelope carrying this error's message
    pub fn to_auth_result(&self) -> AuthResult {
        AuthResult::failure(self.to_string())
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::InvalidBody(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        tracing::debug!(code = self.error_code(), %status, "request rejected: {}", self);
        (status, Json(self.to_auth_result())).into_response()
    }
}
