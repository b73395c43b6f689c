//! HTTP handlers for the workshop service catalog

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use shared::models::ShopService;

use crate::error::AppResult;
use crate::services::shop_services::{ServiceCatalog, ServicePayload};
use crate::AppState;

/// Full catalog
pub async fn list_services(State(state): State<AppState>) -> AppResult<Json<Vec<ShopService>>> {
    let catalog = ServiceCatalog::new(state.db);
    let services = catalog.list().await?;
    Ok(Json(services))
}

/// Add a catalog entry
pub async fn create_service(
    State(state): State<AppState>,
    Json(payload): Json<ServicePayload>,
) -> AppResult<Json<ShopService>> {
    let catalog = ServiceCatalog::new(state.db);
    let service = catalog.create(payload).await?;
    Ok(Json(service))
}

/// Update a catalog entry
pub async fn update_service(
    State(state): State<AppState>,
    Path(service_id): Path<Uuid>,
    Json(payload): Json<ServicePayload>,
) -> AppResult<Json<ShopService>> {
    let catalog = ServiceCatalog::new(state.db);
    let service = catalog.update(service_id, payload).await?;
    Ok(Json(service))
}
