//! Shared types and models for the tire retailer back-office
//!
//! This crate contains the domain model shared between the backend services
//! and any future operator-facing frontend: articles, stock movements,
//! clients, invoices, shop services, and the session cart.

pub mod models;
pub mod types;
pub mod validation;

pub use models::*;
pub use types::*;
pub use validation::*;
