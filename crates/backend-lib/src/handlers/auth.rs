// ============================
// crates/backend-lib/src/handlers/auth.rs
// ============================
//! `/api/auth` endpoints.
//!
//! Every workflow outcome, success or failure, is answered with `200 OK` and
//! an [`AuthResult`] body; callers read `success`. Only bodies that are not
//! valid JSON for the request type are rejected with a 4xx status.
use std::sync::Arc;

use auth_common::{AuthResult, LoginRequest, RegisterRequest};
use axum::{extract::rejection::JsonRejection, extract::State, Json};
use zeroize::Zeroizing;

use crate::error::AppError;
use crate::AppState;

/// `POST /api/auth/register`
pub async fn register(
    State(state): State<Arc<AppState>>,
    body: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<Json<AuthResult>, AppError> {
    let Json(request) = body?;
    Ok(Json(state.auth.register(request).await))
}

/// `POST /api/auth/login`
pub async fn login(
    State(state): State<Arc<AppState>>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<AuthResult>, AppError> {
    let Json(LoginRequest { email, password }) = body?;
    let password = password.map(Zeroizing::new);
    let result = state
        .auth
        .login(email.as_deref(), password.as_deref().map(String::as_str))
        .await;
    Ok(Json(result))
}
