//! Goodbooks Client - Typed client core for the Goodbooks catalog
//!
//! This crate holds everything between a view layer and the Goodbooks REST
//! API: the HTTP gateway, the authentication session, the URL-driven search
//! state and the loaders behind each page.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

use std::sync::Arc;

use adapters::{FileTokenStore, ReqwestTransport};
use application::ApiGateway;
use config::AppConfig;
use ports::{TokenStore, TransportError};

/// Builds the production gateway: reqwest transport plus the file-backed
/// token store, both configured from `config`.
pub fn build_gateway(config: &AppConfig) -> Result<Arc<ApiGateway>, TransportError> {
    let transport = ReqwestTransport::from_config(&config.client)?;
    let tokens: Arc<dyn TokenStore> = Arc::new(FileTokenStore::from_config(&config.storage));
    Ok(Arc::new(ApiGateway::new(
        config.client.api_url.clone(),
        Arc::new(transport),
        tokens,
    )))
}
