//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the client core and the outside world. Adapters implement these ports.
//!
//! - `HttpTransport` - Sends one HTTP request, no interpretation of the body
//! - `TokenStore` - Persists the bearer token between runs
//! - `Navigator` - Pushes a new location onto the router's history

mod http_transport;
mod navigator;
mod token_store;

pub use http_transport::{HttpTransport, TransportError, TransportRequest, TransportResponse};
pub use navigator::Navigator;
pub use token_store::{TokenStore, TokenStoreError};
