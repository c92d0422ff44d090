// ============================
// auth-backend/src/auth/token.rs
// ============================
//! Session token issuance.
//!
//! The auth workflow only needs [`TokenIssuer::generate_token`]; signing
//! algorithm, key handling and expiry live behind the trait. [`JwtIssuer`]
//! is the HS256 implementation used by the server.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::config::JwtSettings;
use crate::error::TokenError;

/// Produces a signed session token for a subject
pub trait TokenIssuer: Send + Sync {
    fn generate_token(&self, subject: &str) -> Result<String, TokenError>;
}

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// Subject (the account email)
    pub sub: String,
    /// Issued at timestamp
    pub iat: i64,
    /// Expiration timestamp
    pub exp: i64,
    /// Token ID
    pub jti: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,
}

/// HS256 JWT issuer
#[derive(Clone)]
pub struct JwtIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl_secs: u64,
    issuer: Option<String>,
}

impl JwtIssuer {
    pub fn new(secret: &[u8], ttl_secs: u64, issuer: Option<String>) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            ttl_secs,
            issuer,
        }
    }

    pub fn from_settings(settings: &JwtSettings) -> Self {
        Self::new(
            settings.secret.as_bytes(),
            settings.ttl_secs,
            settings.issuer.clone(),
        )
    }

    /// Validate and decode a token issued by this issuer
    pub fn validate_token(&self, token: &str) -> Result<Claims, TokenError> {
        let mut validation = Validation::default();
        validation.leeway = 0;
        if let Some(issuer) = &self.issuer {
            validation.set_issuer(&[issuer]);
        }

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                ErrorKind::InvalidToken
                | ErrorKind::InvalidSignature
                | ErrorKind::InvalidIssuer
                | ErrorKind::Base64(_)
                | ErrorKind::Json(_)
                | ErrorKind::Utf8(_) => TokenError::Invalid,
                _ => TokenError::Jwt(e),
            })
    }
}

impl TokenIssuer for JwtIssuer {
    fn generate_token(&self, subject: &str) -> Result<String, TokenError> {
        let now = Utc::now();
        let exp = i64::try_from(self.ttl_secs)
            .ok()
            .and_then(Duration::try_seconds)
            .and_then(|ttl| now.checked_add_signed(ttl))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);

        let claims = Claims {
            sub: subject.to_string(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
            jti: uuid::Uuid::new_v4().to_string(),
            iss: self.issuer.clone(),
        };

        Ok(encode(&Header::default(), &claims, &self.encoding_key)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"0123456789abcdef0123456789abcdef";

    #[test]
    fn test_token_round_trip() {
        let issuer = JwtIssuer::new(SECRET, 3600, None);
        let token = issuer.generate_token("a@x.com").unwrap();

        assert_eq!(token.split('.').count(), 3);

        let claims = issuer.validate_token(&token).unwrap();
        assert_eq!(claims.sub, "a@x.com");
        assert_eq!(claims.exp - claims.iat, 3600);
        assert!(claims.iss.is_none());
    }

    #[test]
    fn test_tokens_are_unique() {
        let issuer = JwtIssuer::new(SECRET, 3600, None);
        let first = issuer.generate_token("a@x.com").unwrap();
        let second = issuer.generate_token("a@x.com").unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let issuer = JwtIssuer::new(SECRET, 3600, None);
        let other = JwtIssuer::new(b"another-secret-another-secret-xx", 3600, None);
        let token = issuer.generate_token("a@x.com").unwrap();

        assert!(matches!(other.validate_token(&token), Err(TokenError::Invalid)));
        assert!(matches!(issuer.validate_token("not.a.jwt"), Err(TokenError::Invalid)));
    }

    #[test]
    fn test_issuer_claim() {
        let issuer = JwtIssuer::new(SECRET, 60, Some("auth-service".to_string()));
        let token = issuer.generate_token("a@x.com").unwrap();
        let claims = issuer.validate_token(&token).unwrap();
        assert_eq!(claims.iss.as_deref(), Some("auth-service"));

        let other = JwtIssuer::new(SECRET, 60, Some("someone-else".to_string()));
        assert!(other.validate_token(&token).is_err());
    }

    #[test]
    fn test_expired_token() {
        let issuer = JwtIssuer::new(SECRET, 60, None);
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: "a@x.com".to_string(),
            iat: now - 120,
            exp: now - 60,
            jti: "old".to_string(),
            iss: None,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(SECRET),
        )
        .unwrap();

        assert!(matches!(issuer.validate_token(&token), Err(TokenError::Expired)));
    }
}
