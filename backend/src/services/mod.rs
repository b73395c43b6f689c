//! Business logic services for the tire retailer back-office

pub mod analytics;
pub mod auth;
pub mod billing;
pub mod clients;
pub mod import;
pub mod session;
pub mod shop_services;
pub mod stock;

pub use analytics::AnalyticsService;
pub use auth::AuthService;
pub use billing::BillingService;
pub use clients::ClientService;
pub use import::ImportService;
pub use session::CartStore;
pub use shop_services::ServiceCatalog;
pub use stock::StockService;
