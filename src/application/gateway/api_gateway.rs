//! ApiGateway - The single way the client talks to the REST API.

use http::{Method, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

use super::{ApiError, Envelope};
use crate::ports::{HttpTransport, TokenStore, TransportRequest};

/// Query parameters and JSON body of one call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestOptions {
    pub params: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn param(mut self, key: &str, value: impl ToString) -> Self {
        self.params.push((key.to_string(), value.to_string()));
        self
    }

    pub fn params(mut self, params: impl IntoIterator<Item = (String, String)>) -> Self {
        self.params.extend(params);
        self
    }

    pub fn body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Serializes `payload` as the JSON body.
    pub fn json<T: Serialize>(self, payload: &T) -> Result<Self, ApiError> {
        let body = serde_json::to_value(payload)
            .map_err(|e| ApiError::decode(format!("Failed to encode request body: {}", e)))?;
        Ok(self.body(body))
    }
}

/// Gateway to the API.
///
/// Holds no session state of its own: the bearer token is read from the
/// token store on every call, and a 401 only evicts that token. Whoever
/// observes [`ApiError::Unauthorized`] tells the session store.
pub struct ApiGateway {
    base_url: String,
    transport: Arc<dyn HttpTransport>,
    tokens: Arc<dyn TokenStore>,
}

impl ApiGateway {
    pub fn new(
        base_url: impl Into<String>,
        transport: Arc<dyn HttpTransport>,
        tokens: Arc<dyn TokenStore>,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            transport,
            tokens,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn tokens(&self) -> &Arc<dyn TokenStore> {
        &self.tokens
    }

    /// `books/5` and `/books/5` resolve to the same URL.
    pub fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Sends one request and returns the parsed JSON body of a 2xx answer.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        options: RequestOptions,
    ) -> Result<Value, ApiError> {
        let url = self.url_for(path);
        let token = match self.tokens.load().await {
            Ok(token) => token,
            Err(e) => {
                tracing::warn!("Failed to read stored token, sending anonymously: {}", e);
                None
            }
        };

        let mut request = TransportRequest::new(method.clone(), &url);
        request.query = options.params;
        request.body = options.body;
        request.bearer = token
            .as_ref()
            .map(|t| SecretString::new(t.expose_secret().clone()));

        tracing::debug!(
            authenticated = token.is_some(),
            "API request {} {}",
            method,
            url
        );

        let response = self.transport.send(request).await.map_err(|e| {
            tracing::error!("API request {} {} failed: {}", method, url, e);
            ApiError::Network(e)
        })?;

        if response.status == StatusCode::UNAUTHORIZED {
            tracing::warn!("API request {} {} was unauthorized", method, url);
            if let Some(token) = &token {
                self.evict(token).await;
            }
            return Err(ApiError::Unauthorized {
                message: server_message(&response.body),
            });
        }

        if !response.status.is_success() {
            let message = server_message(&response.body);
            tracing::warn!(
                "API request {} {} returned {}: {}",
                method,
                url,
                response.status,
                message.as_deref().unwrap_or("no message")
            );
            return Err(if response.status == StatusCode::NOT_FOUND {
                ApiError::NotFound { message }
            } else {
                ApiError::Status {
                    status: response.status.as_u16(),
                    message,
                }
            });
        }

        if response.body.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&response.body).map_err(|e| {
            tracing::warn!("API response for {} {} is not JSON: {}", method, url, e);
            ApiError::decode(format!("Invalid JSON body: {}", e))
        })
    }

    /// Sends a request and decodes the envelope's `data` as `T`.
    pub async fn fetch<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        options: RequestOptions,
    ) -> Result<T, ApiError> {
        let body = self.request(method, path, options).await?;
        Envelope::from_value(body)?.accepted()?.into_data()
    }

    /// Sends a request whose answer carries no data of interest; returns the
    /// server's message.
    pub async fn execute(
        &self,
        method: Method,
        path: &str,
        options: RequestOptions,
    ) -> Result<Option<String>, ApiError> {
        let body = self.request(method, path, options).await?;
        Ok(Envelope::from_value(body)?.accepted()?.message)
    }

    async fn evict(&self, rejected: &SecretString) {
        match self.tokens.evict(rejected).await {
            Ok(true) => tracing::info!("Evicted rejected token"),
            Ok(false) => tracing::debug!("Stored token changed since the request; keeping it"),
            Err(e) => tracing::warn!("Failed to evict rejected token: {}", e),
        }
    }
}

/// `message` (or `error`) field of an error body, if the body is JSON.
fn server_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    value
        .get("message")
        .or_else(|| value.get("error"))
        .and_then(Value::as_str)
        .map(str::to_string)
}
