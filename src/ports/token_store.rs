//! Token Store Port - Interface for persisting the bearer token.

use async_trait::async_trait;
use secrecy::SecretString;

/// Errors that can occur during token storage operations
#[derive(Debug, thiserror::Error)]
pub enum TokenStoreError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Failed to serialize storage: {0}")]
    SerializationFailed(String),

    #[error("Failed to deserialize storage: {0}")]
    DeserializationFailed(String),
}

/// Port for the single persisted credential token.
///
/// Implementations must tolerate concurrent callers; the gateway evicts
/// from request tasks while the session store writes on login.
#[async_trait]
pub trait TokenStore: Send + Sync {
    /// The stored token, if any.
    async fn load(&self) -> Result<Option<SecretString>, TokenStoreError>;

    /// Replaces the stored token.
    async fn store(&self, token: &SecretString) -> Result<(), TokenStoreError>;

    /// Deletes the stored token. Deleting an absent token succeeds.
    async fn remove(&self) -> Result<(), TokenStoreError>;

    /// Deletes the stored token only if it is still `rejected`.
    ///
    /// Returns whether a token was deleted. A token written by a login that
    /// finished after `rejected` was sent survives.
    async fn evict(&self, rejected: &SecretString) -> Result<bool, TokenStoreError>;
}
