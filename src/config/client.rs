//! API client configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Configuration for talking to the Goodbooks REST API
#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    /// Base URL every endpoint path is joined onto
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Environment name
    #[serde(default)]
    pub environment: Environment,

    /// Rust log filter directive
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Page size used by the search result controller
    #[serde(default = "default_per_page")]
    pub per_page: u32,
}

/// Deployment environment
#[derive(Debug, Clone, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl ClientConfig {
    /// Get the request timeout as a Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Check if running against production
    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }

    /// Validate client configuration
    ///
    /// Production deployments must talk to the API over HTTPS.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.api_url.trim().is_empty() {
            return Err(ValidationError::MissingRequired("API_URL"));
        }
        if !self.api_url.starts_with("http://") && !self.api_url.starts_with("https://") {
            return Err(ValidationError::InvalidApiUrl);
        }
        if self.is_production() && !self.api_url.starts_with("https://") {
            return Err(ValidationError::ApiUrlMustBeHttps);
        }
        if self.timeout_secs == 0 || self.timeout_secs > 300 {
            return Err(ValidationError::InvalidTimeout);
        }
        if self.per_page == 0 || self.per_page > 100 {
            return Err(ValidationError::InvalidPageSize);
        }
        Ok(())
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            environment: Environment::default(),
            log_level: default_log_level(),
            timeout_secs: default_timeout(),
            per_page: default_per_page(),
        }
    }
}

fn default_api_url() -> String {
    "http://localhost:5000/api/v1".to_string()
}

fn default_log_level() -> String {
    "info,goodbooks_client=debug".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_per_page() -> u32 {
    20
}
