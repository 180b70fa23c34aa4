//! Client-side storage configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;

/// Where the persisted credential token lives
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Key the token is stored under
    #[serde(default = "default_token_key")]
    pub token_key: String,

    /// Path of the JSON file backing the key/value storage
    #[serde(default = "default_path")]
    pub path: PathBuf,
}

impl StorageConfig {
    /// Validate storage configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.token_key.trim().is_empty() {
            return Err(ValidationError::MissingRequired("TOKEN_KEY"));
        }
        if self.path.as_os_str().is_empty() {
            return Err(ValidationError::MissingRequired("STORAGE_PATH"));
        }
        Ok(())
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            token_key: default_token_key(),
            path: default_path(),
        }
    }
}

fn default_token_key() -> String {
    "token".to_string()
}

fn default_path() -> PathBuf {
    PathBuf::from(".goodbooks/storage.json")
}
