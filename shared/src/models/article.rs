//! Tire article model

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::Season;

/// A tire article held in stock.
///
/// The natural deduplication key on import is the (dimension, brand) pair;
/// `id` is a surrogate identity assigned by the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Article {
    pub id: Uuid,
    /// Canonical form, e.g. "205/55 R16 91V"
    pub dimension: String,
    pub width: i32,
    pub height: i32,
    pub diameter: i32,
    pub load_index: String,
    pub speed_rating: String,
    pub season: Season,
    pub brand: String,
    /// Units on hand; never negative
    pub on_hand: i32,
    /// Weighted-average purchase cost per unit, recomputed on every purchase
    pub avg_cost: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Article {
    /// Display label used on invoice lines, e.g. "Pneu MICHELIN 205/55 R16 91V"
    pub fn sale_description(&self) -> String {
        format!("Pneu {} {}", self.brand, self.dimension)
    }
}
