//! HTTP handlers for analytics views

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use crate::error::AppResult;
use crate::services::analytics::{
    AnalyticsService, DimensionSales, RevenueBucket, RevenueReport, StockValuation,
};
use crate::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct RevenueQuery {
    #[serde(default)]
    pub bucket: RevenueBucket,
}

/// Revenue per day, week, or month
pub async fn revenue(
    State(state): State<AppState>,
    Query(query): Query<RevenueQuery>,
) -> AppResult<Json<RevenueReport>> {
    let service = AnalyticsService::new(state.db);
    let report = service.revenue(query.bucket).await?;
    Ok(Json(report))
}

/// Best-selling dimensions
pub async fn top_dimensions(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<DimensionSales>>> {
    let service = AnalyticsService::new(state.db);
    let rows = service.top_dimensions().await?;
    Ok(Json(rows))
}

/// Stock valuation at weighted-average cost
pub async fn stock_value(State(state): State<AppState>) -> AppResult<Json<StockValuation>> {
    let service = AnalyticsService::new(state.db);
    let valuation = service.stock_value().await?;
    Ok(Json(valuation))
}
