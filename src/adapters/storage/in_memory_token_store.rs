//! In-Memory Token Store Adapter
//!
//! Keeps the token in memory. Useful for testing and for runs that should
//! not leave credentials on disk.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::ports::{TokenStore, TokenStoreError};

#[derive(Debug, Clone, Default)]
pub struct InMemoryTokenStore {
    token: Arc<RwLock<Option<String>>>,
}

impl InMemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that already holds `token`, as after an earlier login.
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Arc::new(RwLock::new(Some(token.into()))),
        }
    }

    /// The raw stored value (useful for tests)
    pub async fn peek(&self) -> Option<String> {
        self.token.read().await.clone()
    }
}

#[async_trait]
impl TokenStore for InMemoryTokenStore {
    async fn load(&self) -> Result<Option<SecretString>, TokenStoreError> {
        Ok(self.token.read().await.clone().map(SecretString::new))
    }

    async fn store(&self, token: &SecretString) -> Result<(), TokenStoreError> {
        *self.token.write().await = Some(token.expose_secret().clone());
        Ok(())
    }

    async fn remove(&self) -> Result<(), TokenStoreError> {
        *self.token.write().await = None;
        Ok(())
    }

    async fn evict(&self, rejected: &SecretString) -> Result<bool, TokenStoreError> {
        let mut token = self.token.write().await;
        if token.as_deref() == Some(rejected.expose_secret().as_str()) {
            *token = None;
            return Ok(true);
        }
        Ok(false)
    }
}
