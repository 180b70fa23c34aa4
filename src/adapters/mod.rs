//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the client core to external systems:
//! - `transport` - HTTP transports (reqwest, scripted)
//! - `storage` - Token stores (file, in-memory)
//! - `navigation` - Navigators

pub mod navigation;
pub mod storage;
pub mod transport;

pub use navigation::RecordingNavigator;
pub use storage::{FileTokenStore, InMemoryTokenStore};
pub use transport::{RecordedRequest, ReqwestTransport, ScriptedResponse, ScriptedTransport};
