//! Client model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A billing client. Created on first use during invoicing when absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Client {
    pub id: Uuid,
    pub name: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub postal_code: Option<String>,
    pub city: Option<String>,
    /// Company registration number (SIRET), when invoicing a business
    pub tax_id: Option<String>,
    pub created_at: DateTime<Utc>,
}
