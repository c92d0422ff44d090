use std::sync::Arc;

use async_trait::async_trait;
use auth_common::{AuthResult, RegisterRequest};
use metrics::counter;
use scrypt::Params;
use tracing::{error, info, warn};
use zeroize::Zeroizing;

use crate::auth::password::{hash_password, hash_password_secure, into_secret, verify_password};
use crate::auth::{AuthService, TokenIssuer};
use crate::error::AppError;
use crate::metrics::{LOGIN_FAILED, LOGIN_SUCCEEDED, REGISTER_FAILED, REGISTER_SUCCEEDED};
use crate::storage::{NewUser, UserStore};
use crate::validation::{validate_email, validate_login, validate_password, ValidationError};

const REGISTERED: &str = "User Registered Successfully";
const LOGGED_IN: &str = "Login successful";

/// Auth workflow over a credential store and a token issuer
pub struct DefaultAuth {
    store: Arc<dyn UserStore>,
    issuer: Arc<dyn TokenIssuer>,
    params: Params,
    /// Verified against when the email is unknown so both credential
    /// failures take comparable time
    dummy_hash: String,
}

impl DefaultAuth {
    pub fn new(
        store: Arc<dyn UserStore>,
        issuer: Arc<dyn TokenIssuer>,
        params: Params,
    ) -> anyhow::Result<Self> {
        let dummy_hash = hash_password("dummy-password", params)?;
        Ok(Self {
            store,
            issuer,
            params,
            dummy_hash,
        })
    }

    async fn try_register(&self, request: RegisterRequest) -> Result<(), AppError> {
        let RegisterRequest {
            email,
            password,
            profile,
        } = request;

        let email = validate_email(email.as_deref())?;

        if self
            .store
            .exists_by_email(email)
            .await
            .map_err(AppError::Registration)?
        {
            warn!(email = %email, "Attempted registration with duplicate email");
            return Err(AppError::EmailExists);
        }

        let mut password = into_secret(password);
        if let Err(err) = validate_password(Some(password.as_str())) {
            if err == ValidationError::WeakPassword {
                warn!(email = %email, "Weak password attempt");
            }
            return Err(err.into());
        }

        let params = self.params;
        let password_hash =
            tokio::task::spawn_blocking(move || hash_password_secure(&mut password, params))
                .await
                .map_err(|e| AppError::PasswordHash(e.to_string()))?
                .map_err(|e| AppError::PasswordHash(e.to_string()))?;

        let user = self
            .store
            .save(NewUser {
                email: email.to_string(),
                password_hash,
                profile,
            })
            .await
            .map_err(AppError::Registration)?;

        info!(email = %user.email, user_id = %user.id, "User registered successfully");
        Ok(())
    }

    async fn try_login(&self, email: Option<&str>, password: Option<&str>) -> Result<String, AppError> {
        let (email, password) = validate_login(email, password)?;

        let user = self
            .store
            .find_by_email(email)
            .await
            .map_err(AppError::Login)?;

        let Some(user) = user else {
            verify_blocking(self.dummy_hash.clone(), password).await;
            warn!(email = %email, "Login attempt with non-existent email");
            return Err(AppError::InvalidCredentials);
        };

        if !verify_blocking(user.password_hash, password).await {
            warn!(email = %email, "Failed login attempt");
            return Err(AppError::InvalidCredentials);
        }

        let token = self
            .issuer
            .generate_token(email)
            .map_err(AppError::TokenGeneration)?;

        info!(email = %email, "User logged in successfully");
        Ok(token)
    }
}

/// Runs scrypt verification on the blocking pool.
async fn verify_blocking(hash: String, password: &str) -> bool {
    let password = Zeroizing::new(password.to_string());
    tokio::task::spawn_blocking(move || verify_password(&hash, &password))
        .await
        .unwrap_or(false)
}

#[async_trait]
impl AuthService for DefaultAuth {
    async fn register(&self, request: RegisterRequest) -> AuthResult {
        match self.try_register(request).await {
            Ok(()) => {
                counter!(REGISTER_SUCCEEDED).increment(1);
                AuthResult::success(REGISTERED)
            }
            Err(err) => {
                if matches!(err, AppError::Registration(_) | AppError::PasswordHash(_)) {
                    error!("Error during registration: {}", err);
                }
                counter!(REGISTER_FAILED).increment(1);
                err.to_auth_result()
            }
        }
    }

    async fn login(&self, email: Option<&str>, password: Option<&str>) -> AuthResult {
        match self.try_login(email, password).await {
            Ok(token) => {
                counter!(LOGIN_SUCCEEDED).increment(1);
                AuthResult::with_token(LOGGED_IN, token)
            }
            Err(err) => {
                match &err {
                    AppError::TokenGeneration(_) => error!("Error generating token: {}", err),
                    AppError::Login(_) => error!("Error during login: {}", err),
                    _ => {}
                }
                counter!(LOGIN_FAILED).increment(1);
                err.to_auth_result()
            }
        }
    }
}
