use async_trait::async_trait;
use auth_common::{AuthResult, RegisterRequest};

/// Registration and login.
///
/// Both operations always return an [`AuthResult`]; failures are reported
/// through `success` and `message`, never as an error.
#[async_trait]
pub trait AuthService: Send + Sync {
    async fn register(&self, request: RegisterRequest) -> AuthResult;
    async fn login(&self, email: Option<&str>, password: Option<&str>) -> AuthResult;
}
