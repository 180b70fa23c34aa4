//! HTTP gateway to the Goodbooks REST API.
//!
//! Resolves paths against the base URL, attaches the stored bearer token,
//! evicts it on 401 and decodes the `{success, data, message}` envelope.

mod api_gateway;
mod envelope;
mod error;

pub use api_gateway::{ApiGateway, RequestOptions};
pub use envelope::Envelope;
pub use error::ApiError;
