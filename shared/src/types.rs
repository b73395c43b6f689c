//! Common enums used across the back-office

use serde::{Deserialize, Serialize};

/// Tire season classification
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum Season {
    #[default]
    Summer,
    Winter,
    AllSeason,
}

impl Season {
    pub fn as_str(&self) -> &'static str {
        match self {
            Season::Summer => "summer",
            Season::Winter => "winter",
            Season::AllSeason => "all_season",
        }
    }

    /// Parse the database representation. Unknown values fall back to
    /// Summer, matching the classifier's default.
    pub fn from_db(s: &str) -> Self {
        match s {
            "winter" => Season::Winter,
            "all_season" => Season::AllSeason,
            _ => Season::Summer,
        }
    }
}

/// Stock movement kinds. The movement log is append-only.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MovementKind {
    Purchase,
    Sale,
}

impl MovementKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MovementKind::Purchase => "purchase",
            MovementKind::Sale => "sale",
        }
    }

    pub fn from_db(s: &str) -> Self {
        match s {
            "sale" => MovementKind::Sale,
            _ => MovementKind::Purchase,
        }
    }
}

/// Kind of a cart or invoice line
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LineKind {
    Tire,
    Service,
}

/// Invoice lifecycle status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceStatus {
    Draft,
    #[default]
    Paid,
    Cancelled,
}

impl InvoiceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvoiceStatus::Draft => "draft",
            InvoiceStatus::Paid => "paid",
            InvoiceStatus::Cancelled => "cancelled",
        }
    }

    pub fn from_db(s: &str) -> Self {
        match s {
            "draft" => InvoiceStatus::Draft,
            "cancelled" => InvoiceStatus::Cancelled,
            _ => InvoiceStatus::Paid,
        }
    }
}
