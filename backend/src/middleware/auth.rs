//! Access gate middleware
//!
//! The whole back-office sits behind a single shared secret. A successful
//! login issues a session JWT; this middleware validates the bearer token
//! against the configured signing secret and injects the session context
//! used to key the operator's cart.

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

use crate::error::ErrorResponse;
use crate::AppState;

/// Session information extracted from the token
#[derive(Clone, Debug)]
pub struct SessionContext {
    /// Identifies one operator session; keys the in-memory cart
    pub session_id: uuid::Uuid,
}

/// Authentication middleware that validates session tokens. The signing
/// secret comes from application state, the same configuration value the
/// login endpoint signs with.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    // Extract Authorization header
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let token = match auth_header {
        Some(header) if header.starts_with("Bearer ") => &header[7..],
        _ => {
            return unauthorized_response("Missing or invalid Authorization header");
        }
    };

    let claims = match decode_jwt(token, &state.config.auth.jwt_secret) {
        Ok(claims) => claims,
        Err(msg) => {
            return unauthorized_response(&msg);
        }
    };

    let session_id = match uuid::Uuid::parse_str(&claims.sub) {
        Ok(id) => id,
        Err(_) => return unauthorized_response("Invalid session ID in token"),
    };

    request
        .extensions_mut()
        .insert(SessionContext { session_id });

    next.run(request).await
}

/// JWT claims structure
#[derive(Debug, serde::Serialize, serde::Deserialize)]
struct Claims {
    sub: String,
    exp: i64,
    iat: i64,
}

/// Decode and validate a session token
fn decode_jwt(token: &str, secret: &str) -> Result<Claims, String> {
    use jsonwebtoken::{decode, DecodingKey, Validation};

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| format!("Invalid token: {}", e))
}

/// Create unauthorized response
fn unauthorized_response(message: &str) -> Response {
    let error = ErrorResponse {
        error: crate::error::ErrorDetail {
            code: "UNAUTHORIZED".to_string(),
            message_en: message.to_string(),
            message_fr: "Acces non autorise".to_string(),
            field: None,
        },
    };

    (StatusCode::UNAUTHORIZED, Json(error)).into_response()
}

/// Extractor for the authenticated session
/// Use this in handlers to get the current session context
#[derive(Clone, Debug)]
pub struct CurrentSession(pub SessionContext);

#[axum::async_trait]
impl<S> axum::extract::FromRequestParts<S> for CurrentSession
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, Json<ErrorResponse>);

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<SessionContext>()
            .cloned()
            .map(CurrentSession)
            .ok_or_else(|| {
                let error = ErrorResponse {
                    error: crate::error::ErrorDetail {
                        code: "UNAUTHORIZED".to_string(),
                        message_en: "Authentication required".to_string(),
                        message_fr: "Authentification requise".to_string(),
                        field: None,
                    },
                };
                (StatusCode::UNAUTHORIZED, Json(error))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AuthConfig, CompanyConfig, Config, DatabaseConfig, ServerConfig};
    use crate::services::auth::AuthService;

    fn test_config() -> Config {
        Config {
            environment: "development".to_string(),
            server: ServerConfig::default(),
            database: DatabaseConfig {
                url: "postgres://localhost/test".to_string(),
                max_connections: 1,
                min_connections: 1,
            },
            auth: AuthConfig {
                shared_secret: "sesame".to_string(),
                jwt_secret: "configured-signing-secret".to_string(),
                token_expiry: 3600,
            },
            company: CompanyConfig {
                name: "JUBAPNEU".to_string(),
                address: "123 Route du Garage, 57000 METZ".to_string(),
                siret: "123 456 789 00012".to_string(),
                payment_terms: "Paiement a reception de facture".to_string(),
            },
        }
    }

    #[test]
    fn issued_tokens_validate_with_the_configured_secret() {
        let config = test_config();
        let tokens = AuthService::new(&config).login("sesame").unwrap();

        let claims = decode_jwt(&tokens.access_token, &config.auth.jwt_secret).unwrap();
        assert!(uuid::Uuid::parse_str(&claims.sub).is_ok());
    }

    #[test]
    fn tokens_signed_with_another_secret_are_rejected() {
        let config = test_config();
        let tokens = AuthService::new(&config).login("sesame").unwrap();

        assert!(decode_jwt(&tokens.access_token, "some-other-secret").is_err());
    }
}
