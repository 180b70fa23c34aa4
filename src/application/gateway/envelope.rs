//! The `{success, data, message}` wrapper every endpoint answers with.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::ApiError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    #[serde(default = "default_success")]
    pub success: bool,
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub message: Option<String>,
}

fn default_success() -> bool {
    true
}

impl Envelope {
    pub fn from_value(body: Value) -> Result<Self, ApiError> {
        serde_json::from_value(body).map_err(|e| ApiError::decode(format!("Invalid envelope: {}", e)))
    }

    /// Fails with [`ApiError::Rejected`] when `success` is false.
    pub fn accepted(self) -> Result<Self, ApiError> {
        if self.success {
            Ok(self)
        } else {
            Err(ApiError::Rejected {
                message: self.message,
            })
        }
    }

    /// Decodes `data` as `T`; an absent `data` decodes from `null`.
    pub fn into_data<T: DeserializeOwned>(self) -> Result<T, ApiError> {
        serde_json::from_value(self.data.unwrap_or(Value::Null))
            .map_err(|e| ApiError::decode(format!("Unexpected data: {}", e)))
    }
}
