//! Workshop service model

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A billable workshop service (fitting, balancing, valve...).
/// Independent of stock.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShopService {
    pub id: Uuid,
    pub description: String,
    pub unit_price: Decimal,
    pub category: String,
    pub created_at: DateTime<Utc>,
}
