//! Token storage adapters.
//!
//! - `FileTokenStore` - JSON key/value file, the desktop stand-in for
//!   browser local storage
//! - `InMemoryTokenStore` - For tests and ephemeral sessions

mod file_token_store;
mod in_memory_token_store;

pub use file_token_store::FileTokenStore;
pub use in_memory_token_store::InMemoryTokenStore;
