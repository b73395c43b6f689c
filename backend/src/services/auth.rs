//! Access gate service
//!
//! The back-office has no per-user accounts: one shared secret unlocks the
//! whole application. A successful login mints a fresh session id and wraps
//! it in a signed JWT; the session id keys the operator's in-memory cart.
//! Wrong secrets are rejected without any indication of remaining attempts.

use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::Config;
use crate::error::{AppError, AppResult};

/// Access gate service
#[derive(Clone)]
pub struct AuthService {
    shared_secret: String,
    jwt_secret: String,
    token_expiry: i64,
}

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Session ID
    pub sub: String,
    pub exp: i64,
    pub iat: i64,
}

/// Session token issued on successful login
#[derive(Debug, Serialize)]
pub struct AuthTokens {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

impl AuthService {
    /// Create a new AuthService instance
    pub fn new(config: &Config) -> Self {
        Self {
            shared_secret: config.auth.shared_secret.clone(),
            jwt_secret: config.auth.jwt_secret.clone(),
            token_expiry: config.auth.token_expiry,
        }
    }

    /// Check the shared secret and issue a session token.
    pub fn login(&self, secret: &str) -> AppResult<AuthTokens> {
        if !constant_time_eq(secret.as_bytes(), self.shared_secret.as_bytes()) {
            return Err(AppError::InvalidCredentials);
        }

        let session_id = Uuid::new_v4();
        let now = Utc::now();
        let claims = Claims {
            sub: session_id.to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::seconds(self.token_expiry)).timestamp(),
        };

        let access_token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_bytes()),
        )
        .map_err(|e| AppError::InternalError(anyhow::anyhow!("token encoding failed: {e}")))?;

        Ok(AuthTokens {
            access_token,
            token_type: "Bearer".to_string(),
            expires_in: self.token_expiry,
        })
    }
}

/// Compare secrets without leaking the mismatch position through timing.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constant_time_eq_basic() {
        assert!(constant_time_eq(b"secret", b"secret"));
        assert!(!constant_time_eq(b"secret", b"secre_"));
        assert!(!constant_time_eq(b"secret", b"secrets"));
    }
}
