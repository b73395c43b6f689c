//! HTTP handlers for the access gate

use axum::{extract::State, Json};
use serde::Deserialize;

use crate::error::AppResult;
use crate::middleware::CurrentSession;
use crate::services::auth::{AuthService, AuthTokens};
use crate::AppState;

/// Login request body
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub secret: String,
}

/// Check the shared secret and issue a session token
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> AppResult<Json<AuthTokens>> {
    let service = AuthService::new(&state.config);
    let tokens = service.login(&request.secret)?;
    Ok(Json(tokens))
}

/// End the session: the token is simply forgotten client-side, but the
/// session's cart is dropped server-side so a later session starts clean.
pub async fn logout(
    State(state): State<AppState>,
    session: CurrentSession,
) -> AppResult<Json<()>> {
    state.carts.clear(session.0.session_id).await;
    Ok(Json(()))
}
