// ============================
// crates/backend-lib/src/validation/mod.rs
// ============================
//! Input validation for registration and login.
//!
//! Each check maps to one [`ValidationError`]; the `Display` text of every
//! variant is the exact message returned to the caller.

use thiserror::Error;

use crate::auth::password::{validate_password_strength, PasswordRequirements, PASSWORD_RULES};

/// Possible validation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Email is required")]
    EmailRequired,

    #[error("Password is required")]
    PasswordRequired,

    #[error("{}", PASSWORD_RULES)]
    WeakPassword,

    #[error("Email and password are required")]
    CredentialsRequired,
}

/// Result type for validation operations
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Blank means nothing but control characters and ASCII space, i.e. every
/// char at or below U+0020. Other Unicode whitespace counts as content.
pub fn is_blank(value: &str) -> bool {
    value.chars().all(|c| c <= ' ')
}

/// Require a non-blank email. The value is returned as given, untrimmed,
/// because lookups match it exactly.
pub fn validate_email(email: Option<&str>) -> ValidationResult<&str> {
    match email {
        Some(email) if !is_blank(email) => Ok(email),
        _ => Err(ValidationError::EmailRequired),
    }
}

/// Require a non-blank password that satisfies the password policy.
pub fn validate_password(password: Option<&str>) -> ValidationResult<&str> {
    let password = match password {
        Some(password) if !is_blank(password) => password,
        _ => return Err(ValidationError::PasswordRequired),
    };

    if !validate_password_strength(password, &PasswordRequirements::default()) {
        return Err(ValidationError::WeakPassword);
    }

    Ok(password)
}

/// Both login fields must be present and non-blank.
pub fn validate_login<'a>(
    email: Option<&'a str>,
    password: Option<&'a str>,
) -> ValidationResult<(&'a str, &'a str)> {
    match (email, password) {
        (Some(email), Some(password)) if !is_blank(email) && !is_blank(password) => {
            Ok((email, password))
        }
        _ => Err(ValidationError::CredentialsRequired),
    }
}
