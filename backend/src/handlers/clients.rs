//! HTTP handlers for the client directory

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use shared::models::Client;

use crate::error::AppResult;
use crate::services::clients::{ClientPayload, ClientService};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ClientQuery {
    pub search: Option<String>,
}

/// List clients, optionally filtered by name
pub async fn list_clients(
    State(state): State<AppState>,
    Query(query): Query<ClientQuery>,
) -> AppResult<Json<Vec<Client>>> {
    let service = ClientService::new(state.db);
    let clients = service.list(query.search.as_deref()).await?;
    Ok(Json(clients))
}

/// Get one client
pub async fn get_client(
    State(state): State<AppState>,
    Path(client_id): Path<Uuid>,
) -> AppResult<Json<Client>> {
    let service = ClientService::new(state.db);
    let client = service.get(client_id).await?;
    Ok(Json(client))
}

/// Create a client
pub async fn create_client(
    State(state): State<AppState>,
    Json(payload): Json<ClientPayload>,
) -> AppResult<Json<Client>> {
    let service = ClientService::new(state.db);
    let client = service.create(payload).await?;
    Ok(Json(client))
}

/// Update a client
pub async fn update_client(
    State(state): State<AppState>,
    Path(client_id): Path<Uuid>,
    Json(payload): Json<ClientPayload>,
) -> AppResult<Json<Client>> {
    let service = ClientService::new(state.db);
    let client = service.update(client_id, payload).await?;
    Ok(Json(client))
}
