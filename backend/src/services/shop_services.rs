//! Workshop service catalog (fitting, balancing, valves...)

use chrono::{DateTime, Utc};
use serde::Deserialize;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;
use validator::Validate;

use rust_decimal::Decimal;
use shared::models::ShopService;
use shared::validation::validate_unit_price;

use crate::error::{AppError, AppResult};

/// Workshop service catalog
#[derive(Clone)]
pub struct ServiceCatalog {
    db: PgPool,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ServicePayload {
    #[validate(length(min = 1, max = 200))]
    pub description: String,
    pub unit_price: Decimal,
    #[validate(length(min = 1, max = 50))]
    pub category: String,
}

#[derive(Debug, FromRow)]
struct ServiceRow {
    id: Uuid,
    description: String,
    unit_price: Decimal,
    category: String,
    created_at: DateTime<Utc>,
}

impl From<ServiceRow> for ShopService {
    fn from(row: ServiceRow) -> Self {
        ShopService {
            id: row.id,
            description: row.description,
            unit_price: row.unit_price,
            category: row.category,
            created_at: row.created_at,
        }
    }
}

fn validate_payload(payload: &ServicePayload) -> AppResult<()> {
    payload
        .validate()
        .map_err(|e| AppError::validation("service", &e.to_string(), "Prestation invalide"))?;
    validate_unit_price(payload.unit_price)
        .map_err(|m| AppError::validation("unit_price", m, "Prix invalide"))?;
    Ok(())
}

impl ServiceCatalog {
    /// Create a new ServiceCatalog instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Full catalog, grouped for display.
    pub async fn list(&self) -> AppResult<Vec<ShopService>> {
        let rows = sqlx::query_as::<_, ServiceRow>(
            "SELECT id, description, unit_price, category, created_at \
             FROM shop_services ORDER BY category, description",
        )
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(ShopService::from).collect())
    }

    /// Fetch one catalog entry by id.
    pub async fn get(&self, service_id: Uuid) -> AppResult<ShopService> {
        let row = sqlx::query_as::<_, ServiceRow>(
            "SELECT id, description, unit_price, category, created_at \
             FROM shop_services WHERE id = $1",
        )
        .bind(service_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Service".to_string()))?;

        Ok(row.into())
    }

    /// Add a catalog entry.
    pub async fn create(&self, payload: ServicePayload) -> AppResult<ShopService> {
        validate_payload(&payload)?;

        let row = sqlx::query_as::<_, ServiceRow>(
            r#"
            INSERT INTO shop_services (description, unit_price, category)
            VALUES ($1, $2, $3)
            RETURNING id, description, unit_price, category, created_at
            "#,
        )
        .bind(payload.description.trim())
        .bind(payload.unit_price)
        .bind(payload.category.trim())
        .fetch_one(&self.db)
        .await?;

        Ok(row.into())
    }

    /// Update a catalog entry. Past invoice lines keep the price they were
    /// billed at; only future cart lines see the change.
    pub async fn update(&self, service_id: Uuid, payload: ServicePayload) -> AppResult<ShopService> {
        validate_payload(&payload)?;

        let row = sqlx::query_as::<_, ServiceRow>(
            r#"
            UPDATE shop_services
            SET description = $1, unit_price = $2, category = $3
            WHERE id = $4
            RETURNING id, description, unit_price, category, created_at
            "#,
        )
        .bind(payload.description.trim())
        .bind(payload.unit_price)
        .bind(payload.category.trim())
        .bind(service_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Service".to_string()))?;

        Ok(row.into())
    }
}
