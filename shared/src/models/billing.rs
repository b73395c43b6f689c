//! Invoice and cart models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::{InvoiceStatus, LineKind};

/// Invoice header.
///
/// Invariant: `total_ttc` equals the sum of the lines' quantity x unit
/// price, to the cent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invoice {
    pub id: Uuid,
    /// Generated from the creation timestamp, format "FV-yyMM-HHmm"
    pub number: String,
    pub client_id: Uuid,
    pub total_ttc: Decimal,
    pub status: InvoiceStatus,
    pub created_at: DateTime<Utc>,
}

/// One invoice line. `article_id` is None for service lines.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceLine {
    pub id: Uuid,
    pub invoice_id: Uuid,
    pub article_id: Option<Uuid>,
    pub description: String,
    pub quantity: i32,
    /// Unit sale price, tax included
    pub unit_price: Decimal,
    /// Weighted-average cost captured at the moment of sale; never
    /// recomputed afterwards
    pub cost_snapshot: Decimal,
}

/// A pending line in the session cart, accumulated before checkout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartLine {
    pub kind: LineKind,
    pub article_id: Option<Uuid>,
    pub description: String,
    pub quantity: i32,
    pub unit_price: Decimal,
    /// Article cost at the time the line was added, for margin display.
    /// The persisted snapshot is re-read at checkout.
    pub cost_snapshot: Decimal,
}

impl CartLine {
    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}
