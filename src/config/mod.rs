//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `ORG_HEALTH` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use org_health::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Server running on {:?}", config.server.socket_addr());
//! ```

mod cycle_api;
mod error;
mod identity;
mod server;
mod storage;

pub use cycle_api::CycleApiConfig;
pub use error::{ConfigError, ValidationError};
pub use identity::IdentityConfig;
pub use server::{Environment, LogFormat, ServerConfig};
pub use storage::{StorageBackend, StorageConfig};

use serde::Deserialize;

/// Root application configuration
///
/// Every section has defaults, so an empty environment yields a usable
/// development configuration. Load using [`AppConfig::load()`].
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    /// Server configuration (host, port, environment, logging)
    #[serde(default)]
    pub server: ServerConfig,

    /// Where the selected cycle is persisted
    #[serde(default)]
    pub storage: StorageConfig,

    /// Cycle-listing API
    #[serde(default)]
    pub cycle_api: CycleApiConfig,

    /// Acting user at start-up
    #[serde(default)]
    pub identity: IdentityConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `ORG_HEALTH` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `ORG_HEALTH__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `ORG_HEALTH__CYCLE_API__BASE_URL=...` -> `cycle_api.base_url = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("ORG_HEALTH")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.storage.validate()?;
        self.cycle_api.validate(&self.server.environment)?;
        self.identity.validate()?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}
