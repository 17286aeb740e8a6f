//! Application configuration module
//!
//! Configuration is read from environment variables with the `PAYEER_GATEWAY`
//! prefix; nested values are separated by double underscores. A `.env` file is
//! loaded first when present.
//!
//! # Example
//!
//! ```no_run
//! use payeer_gateway::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod api;
mod database;
mod error;
mod merchant;
mod server;

pub use api::ApiConfig;
pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use merchant::MerchantConfig;
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

const ENV_PREFIX: &str = "PAYEER_GATEWAY";

/// Root application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// HTTP server for gateway callbacks
    #[serde(default)]
    pub server: ServerConfig,

    /// Account API credentials, absent when only callbacks are served
    #[serde(default)]
    pub api: Option<ApiConfig>,

    /// Merchant shop settings
    pub merchant: MerchantConfig,

    /// PostgreSQL connection
    pub database: DatabaseConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// - `PAYEER_GATEWAY__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `PAYEER_GATEWAY__MERCHANT__SHOP_ID=...` -> `merchant.shop_id = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or values
    /// cannot be parsed.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix(ENV_PREFIX)
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        if let Some(api) = &self.api {
            api.validate()?;
        }
        self.merchant.validate()?;
        self.database.validate()?;
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}
