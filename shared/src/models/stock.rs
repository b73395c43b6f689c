//! Stock movement ledger model

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::MovementKind;

/// One entry of the append-only stock ledger.
///
/// Purchases carry a positive quantity and a unit purchase price; sales
/// carry a negative quantity and no price. Entries are never mutated or
/// deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockMovement {
    pub id: Uuid,
    pub article_id: Uuid,
    pub kind: MovementKind,
    /// Signed quantity: positive for purchases, negative for sales
    pub quantity: i32,
    /// Unit purchase price; only present on purchase movements
    pub unit_price: Option<Decimal>,
    /// Free-text provenance: supplier document name or sale invoice number
    pub reference: Option<String>,
    pub created_at: DateTime<Utc>,
}
