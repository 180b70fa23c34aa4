//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid API URL format")]
    InvalidApiUrl,

    #[error("API URL must use HTTPS in production")]
    ApiUrlMustBeHttps,

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Page size must be between 1 and 100")]
    InvalidPageSize,

    #[error("Notice duration must be positive")]
    InvalidNoticeDuration,
}
