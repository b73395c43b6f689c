//! Health check endpoint

use axum::{extract::State, Json};
use serde_json::json;

use crate::AppState;

/// Health check that also verifies database connectivity
pub async fn health_check(State(state): State<AppState>) -> Json<serde_json::Value> {
    let db_healthy = sqlx::query_scalar::<_, i32>("SELECT 1")
        .fetch_one(&state.db)
        .await
        .is_ok();

    Json(json!({
        "status": if db_healthy { "healthy" } else { "degraded" },
        "database": if db_healthy { "connected" } else { "unavailable" },
    }))
}
