//! Configuration management for the tire retailer back-office
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with TIRESHOP_ prefix

use config::{ConfigError, Environment, File};
use serde::Deserialize;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Access gate configuration
    pub auth: AuthConfig,

    /// Issuer identity printed on generated invoices
    pub company: CompanyConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL
    pub url: String,

    /// Maximum number of connections in the pool
    pub max_connections: u32,

    /// Minimum number of connections in the pool
    pub min_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    /// The single shared secret gating all operator access
    pub shared_secret: String,

    /// Secret key for signing session tokens
    pub jwt_secret: String,

    /// Session token expiration in seconds
    pub token_expiry: i64,
}

/// Company identity for the invoice header and legal footer
#[derive(Debug, Deserialize, Clone)]
pub struct CompanyConfig {
    pub name: String,
    pub address: String,
    /// Company registration number (SIRET)
    pub siret: String,
    /// Payment terms text printed under the totals block
    pub payment_terms: String,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment =
            std::env::var("TIRESHOP_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 3000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("database.max_connections", 10)?
            .set_default("database.min_connections", 2)?
            .set_default("auth.token_expiry", 43200)?
            .set_default("company.name", "JUBAPNEU")?
            .set_default("company.address", "123 Route du Garage, 57000 METZ")?
            .set_default("company.siret", "123 456 789 00012")?
            .set_default("company.payment_terms", "Paiement a reception de facture")?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (TIRESHOP_ prefix)
            .add_source(
                Environment::with_prefix("TIRESHOP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            host: "0.0.0.0".to_string(),
        }
    }
}
