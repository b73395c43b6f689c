//! HTTP handlers for stock browsing

use axum::{
    extract::{Path, Query, State},
    Json,
};
use uuid::Uuid;

use shared::models::{Article, StockMovement};

use crate::error::AppResult;
use crate::services::stock::{ArticleFilter, StockService};
use crate::AppState;

/// List articles with optional search, season, and availability filters
pub async fn list_articles(
    State(state): State<AppState>,
    Query(filter): Query<ArticleFilter>,
) -> AppResult<Json<Vec<Article>>> {
    let service = StockService::new(state.db);
    let articles = service.list_articles(&filter).await?;
    Ok(Json(articles))
}

/// Get one article
pub async fn get_article(
    State(state): State<AppState>,
    Path(article_id): Path<Uuid>,
) -> AppResult<Json<Article>> {
    let service = StockService::new(state.db);
    let article = service.get_article(article_id).await?;
    Ok(Json(article))
}

/// Movement history, newest first
pub async fn list_movements(State(state): State<AppState>) -> AppResult<Json<Vec<StockMovement>>> {
    let service = StockService::new(state.db);
    let movements = service.list_movements().await?;
    Ok(Json(movements))
}
