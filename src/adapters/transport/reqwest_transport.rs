//! reqwest-backed implementation of the HttpTransport port.

use async_trait::async_trait;
use http::{Method, StatusCode};
use reqwest::Client;
use secrecy::ExposeSecret;
use std::time::Duration;

use crate::config::ClientConfig;
use crate::ports::{HttpTransport, TransportError, TransportRequest, TransportResponse};

/// Sends requests with a shared reqwest client.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
    timeout: Duration,
}

impl ReqwestTransport {
    /// Creates a transport whose requests give up after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TransportError::Other(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, timeout })
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self, TransportError> {
        Self::new(config.timeout())
    }

    fn map_error(&self, e: reqwest::Error) -> TransportError {
        if e.is_timeout() {
            TransportError::Timeout {
                timeout_secs: self.timeout.as_secs(),
            }
        } else if e.is_connect() {
            TransportError::Connect(e.to_string())
        } else {
            TransportError::Other(e.to_string())
        }
    }
}

fn to_reqwest_method(method: &Method) -> Result<reqwest::Method, TransportError> {
    reqwest::Method::from_bytes(method.as_str().as_bytes())
        .map_err(|e| TransportError::Other(format!("Unsupported method {}: {}", method, e)))
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, TransportError> {
        let mut builder = self
            .client
            .request(to_reqwest_method(&request.method)?, &request.url)
            .header("Accept", "application/json");

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(token) = &request.bearer {
            builder = builder.bearer_auth(token.expose_secret());
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|e| self.map_error(e))?;
        let status = StatusCode::from_u16(response.status().as_u16())
            .map_err(|e| TransportError::Other(format!("Invalid status code: {}", e)))?;
        let body = response.text().await.map_err(|e| self.map_error(e))?;

        Ok(TransportResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_every_method_the_api_uses() {
        for method in [Method::GET, Method::POST, Method::PUT, Method::DELETE] {
            let converted = to_reqwest_method(&method).unwrap();
            assert_eq!(converted.as_str(), method.as_str());
        }
    }

    #[test]
    fn transport_uses_configured_timeout() {
        let config = ClientConfig {
            timeout_secs: 7,
            ..ClientConfig::default()
        };
        let transport = ReqwestTransport::from_config(&config).unwrap();
        assert_eq!(transport.timeout, Duration::from_secs(7));
    }

    #[tokio::test]
    async fn unreachable_host_is_a_connect_or_transport_error() {
        let transport = ReqwestTransport::new(Duration::from_secs(2)).unwrap();
        let request = TransportRequest::new(Method::GET, "http://127.0.0.1:9/api/v1/books/");
        let err = transport.send(request).await.unwrap_err();
        assert!(matches!(
            err,
            TransportError::Connect(_) | TransportError::Other(_) | TransportError::Timeout { .. }
        ));
    }
}
