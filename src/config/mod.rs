//! Application configuration module
//!
//! Type-safe configuration loading from environment variables using the
//! `config` and `dotenvy` crates. Variables use the `GOODBOOKS` prefix and
//! nested values are separated by double underscores.
//!
//! # Example
//!
//! ```no_run
//! use goodbooks_client::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Talking to {}", config.client.api_url);
//! ```

mod client;
mod error;
mod notices;
mod storage;

pub use client::{ClientConfig, Environment};
pub use error::{ConfigError, ValidationError};
pub use notices::NoticeConfig;
pub use storage::StorageConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Every section has working defaults, so an empty environment yields a
/// client pointed at the local development API.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// API client configuration (base URL, timeout, page size)
    #[serde(default)]
    pub client: ClientConfig,

    /// Persisted token storage
    #[serde(default)]
    pub storage: StorageConfig,

    /// Success/error banner behavior
    #[serde(default)]
    pub notices: NoticeConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `GOODBOOKS` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `GOODBOOKS__CLIENT__API_URL=...` -> `client.api_url = ...`
    /// - `GOODBOOKS__STORAGE__TOKEN_KEY=...` -> `storage.token_key = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("GOODBOOKS")
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
        self.client.validate()?;
        self.storage.validate()?;
        self.notices.validate()?;
        Ok(())
    }
}
