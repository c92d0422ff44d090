// ==============
// crates/backend-lib/src/metrics.rs

//! Central place for metric keys
pub const REGISTER_SUCCEEDED: &str = "auth.register.succeeded";
pub const REGISTER_FAILED: &str = "auth.register.failed";
pub const LOGIN_SUCCEEDED: &str = "auth.login.succeeded";
pub const LOGIN_FAILED: &str = "auth.login.failed";
