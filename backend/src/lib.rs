//! Tire retailer back-office - backend library
//!
//! Stock tracking, supplier-invoice ingestion (PDF parsing), sales
//! invoicing, client management, and basic analytics for a single-operator
//! tire shop.

use std::sync::Arc;

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod parser;
pub mod render;
pub mod routes;
pub mod services;

pub use config::Config;

use services::session::CartStore;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db: sqlx::PgPool,
    pub config: Arc<Config>,
    /// In-memory session carts, keyed by session id
    pub carts: CartStore,
}
