//! HTTP Transport Port - Interface for sending raw HTTP requests.
//!
//! The gateway owns everything API-specific (base URL, bearer tokens,
//! envelope decoding, 401 handling). A transport only moves bytes, which
//! keeps scripted test transports trivial.

use async_trait::async_trait;
use http::{Method, StatusCode};
use secrecy::SecretString;
use serde_json::Value;
use thiserror::Error;

/// A fully resolved request.
#[derive(Debug)]
pub struct TransportRequest {
    pub method: Method,
    /// Absolute URL without the query string.
    pub url: String,
    pub query: Vec<(String, String)>,
    /// Sent as `Authorization: Bearer <token>` when present.
    pub bearer: Option<SecretString>,
    /// Sent as a JSON body when present.
    pub body: Option<Value>,
}

impl TransportRequest {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            query: Vec::new(),
            bearer: None,
            body: None,
        }
    }
}

/// Status and raw body of a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: StatusCode,
    pub body: String,
}

impl TransportResponse {
    pub fn new(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Failures before any HTTP status was received.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("Request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    #[error("Connection failed: {0}")]
    Connect(String),

    #[error("Transport error: {0}")]
    Other(String),
}

/// Port for sending HTTP requests.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Sends `request` and returns whatever status the server answered with.
    ///
    /// Non-2xx statuses are not errors at this level.
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, TransportError>;
}
