//! HTTP transport adapters.
//!
//! - `ReqwestTransport` - Production transport over reqwest
//! - `ScriptedTransport` - Canned responses for tests and offline runs

mod reqwest_transport;
mod scripted_transport;

pub use reqwest_transport::ReqwestTransport;
pub use scripted_transport::{RecordedRequest, ScriptedResponse, ScriptedTransport};
