// ============================
// auth-backend/src/auth/mod.rs
// ============================
//! Authentication module.

pub mod password;
pub mod token;
mod service;
mod service_impl;

pub use password::{
    hash_password, validate_password_strength, verify_password, PasswordRequirements,
    MIN_PASSWORD_LENGTH, PASSWORD_RULES,
};
pub use service::AuthService;
pub use service_impl::DefaultAuth;
pub use token::{Claims, JwtIssuer, TokenIssuer};
