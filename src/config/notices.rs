//! Transient notice configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// How long success/error banners stay visible
#[derive(Debug, Clone, Deserialize)]
pub struct NoticeConfig {
    #[serde(default = "default_clear_after")]
    pub clear_after_ms: u64,
}

impl NoticeConfig {
    pub fn clear_after(&self) -> Duration {
        Duration::from_millis(self.clear_after_ms)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.clear_after_ms == 0 {
            return Err(ValidationError::InvalidNoticeDuration);
        }
        Ok(())
    }
}

impl Default for NoticeConfig {
    fn default() -> Self {
        Self {
            clear_after_ms: default_clear_after(),
        }
    }
}

fn default_clear_after() -> u64 {
    3000
}
