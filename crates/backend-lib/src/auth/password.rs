// ============================
// auth-backend/src/auth/password.rs
// ============================
//! Password policy, hashing and verification.
use rand::RngCore;
use scrypt::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Params, Scrypt,
};
use zeroize::{Zeroize, Zeroizing};

/// Minimum password length
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Symbols accepted by the special-character rule
pub const SPECIAL_CHARACTERS: &str = "@$!%*?&";

/// Human-readable statement of the password policy
pub const PASSWORD_RULES: &str = "Password must be at least 8 characters with 1 uppercase, 1 lowercase, 1 number, and 1 special character";

const SALT_BYTES: usize = 16;

/// Password complexity requirements
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordRequirements {
    pub min_length: usize,
    pub require_uppercase: bool,
    pub require_lowercase: bool,
    pub require_digit: bool,
    pub require_special: bool,
}

impl Default for PasswordRequirements {
    fn default() -> Self {
        Self {
            min_length: MIN_PASSWORD_LENGTH,
            require_uppercase: true,
            require_lowercase: true,
            require_digit: true,
            require_special: true,
        }
    }
}

fn is_line_terminator(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{85}' | '\u{2028}' | '\u{2029}')
}

/// Check if a password meets the complexity requirements.
///
/// Letter and digit classes are ASCII only. Line terminators never count
/// towards the length and make the password invalid.
pub fn validate_password_strength(password: &str, requirements: &PasswordRequirements) -> bool {
    if password.chars().any(is_line_terminator) {
        return false;
    }

    if password.chars().count() < requirements.min_length {
        return false;
    }

    if requirements.require_uppercase && !password.chars().any(|c| c.is_ascii_uppercase()) {
        return false;
    }

    if requirements.require_lowercase && !password.chars().any(|c| c.is_ascii_lowercase()) {
        return false;
    }

    if requirements.require_digit && !password.chars().any(|c| c.is_ascii_digit()) {
        return false;
    }

    if requirements.require_special && !password.chars().any(|c| SPECIAL_CHARACTERS.contains(c)) {
        return false;
    }

    true
}

/// Hash a password with scrypt and a fresh random salt, returning a PHC string.
pub fn hash_password(plain: &str, params: Params) -> anyhow::Result<String> {
    let mut salt_bytes = [0u8; SALT_BYTES];
    rand::rng().fill_bytes(&mut salt_bytes);
    let salt = SaltString::encode_b64(&salt_bytes)?;

    let hash = Scrypt
        .hash_password_customized(plain.as_bytes(), None, None, params, &salt)?
        .to_string();
    Ok(hash)
}

/// Hash a password and zeroize the original
pub fn hash_password_secure(plain: &mut String, params: Params) -> anyhow::Result<String> {
    let hash = hash_password(plain, params);
    plain.zeroize();
    hash
}

/// Take ownership of a request password so it is wiped when dropped,
/// whichever path the request leaves by. Missing becomes empty.
pub fn into_secret(password: Option<String>) -> Zeroizing<String> {
    Zeroizing::new(password.unwrap_or_default())
}

/// Verify a password against a PHC hash. Unparsable hashes never verify.
pub fn verify_password(hash: &str, plain: &str) -> bool {
    let parsed_hash = match PasswordHash::new(hash) {
        Ok(h) => h,
        Err(_) => return false,
    };
    Scrypt.verify_password(plain.as_bytes(), &parsed_hash).is_ok()
}
