//! HTTP request handlers

pub mod analytics;
pub mod auth;
pub mod billing;
pub mod clients;
pub mod health;
pub mod import;
pub mod shop_services;
pub mod stock;

pub use analytics::{revenue, stock_value, top_dimensions};
pub use auth::{login, logout};
pub use billing::{
    add_service_line, add_tire_line, checkout, clear_cart, get_cart, get_invoice, invoice_pdf,
    list_invoices,
};
pub use clients::{create_client, get_client, list_clients, update_client};
pub use health::health_check;
pub use import::{commit_import, list_imports, preview_import};
pub use shop_services::{create_service, list_services, update_service};
pub use stock::{get_article, list_articles, list_movements};
