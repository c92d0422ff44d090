// ================
// common/src/lib.rs
// ================
//! Request and response bodies shared by the auth server and its clients.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Body of `POST /api/auth/register`.
///
/// Every field other than `email` and `password` is kept in `profile` and
/// stored alongside the account untouched.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct RegisterRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(flatten)]
    pub profile: Map<String, Value>,
}

impl RegisterRequest {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: Some(email.into()),
            password: Some(password.into()),
            profile: Map::new(),
        }
    }
}

/// Body of `POST /api/auth/login`. Unknown fields are ignored.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

impl LoginRequest {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: Some(email.into()),
            password: Some(password.into()),
        }
    }
}

/// Outcome of a register or login call.
///
/// `token` is only present after a successful login.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct AuthResult {
    pub success: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl AuthResult {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            token: None,
        }
    }

    pub fn with_token(message: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            token: Some(token.into()),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            token: None,
        }
    }
}
