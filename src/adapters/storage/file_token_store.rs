//! File-based Token Store Adapter
//!
//! Persists the token in a small JSON object on disk, keyed by the
//! configured storage key. Other keys in the file are left untouched.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tokio::sync::Mutex;

use crate::config::StorageConfig;
use crate::ports::{TokenStore, TokenStoreError};

/// File-backed storage for the bearer token
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
    key: String,
    // Serializes read-modify-write cycles on the file.
    lock: Arc<Mutex<()>>,
}

impl FileTokenStore {
    /// Create a store that keeps the token under `key` in the file at `path`
    ///
    /// # Example
    /// ```ignore
    /// let store = FileTokenStore::new(".goodbooks/storage.json", "token");
    /// ```
    pub fn new<P: AsRef<Path>>(path: P, key: impl Into<String>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            key: key.into(),
            lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn from_config(config: &StorageConfig) -> Self {
        Self::new(&config.path, config.token_key.clone())
    }

    async fn read_entries(&self) -> Result<Map<String, Value>, TokenStoreError> {
        if !fs::try_exists(&self.path)
            .await
            .map_err(|e| TokenStoreError::IoError(e.to_string()))?
        {
            return Ok(Map::new());
        }

        let raw = fs::read_to_string(&self.path)
            .await
            .map_err(|e| TokenStoreError::IoError(e.to_string()))?;
        if raw.trim().is_empty() {
            return Ok(Map::new());
        }

        serde_json::from_str(&raw).map_err(|e| TokenStoreError::DeserializationFailed(e.to_string()))
    }

    /// Entries to rewrite. A corrupt file is replaced rather than blocking
    /// every later write. Returns whether the file needs repairing.
    async fn entries_for_write(&self) -> Result<(Map<String, Value>, bool), TokenStoreError> {
        match self.read_entries().await {
            Ok(entries) => Ok((entries, false)),
            Err(TokenStoreError::DeserializationFailed(e)) => {
                tracing::warn!(
                    "Token storage {} is corrupt, replacing it: {}",
                    self.path.display(),
                    e
                );
                Ok((Map::new(), true))
            }
            Err(e) => Err(e),
        }
    }

    async fn write_entries(&self, entries: &Map<String, Value>) -> Result<(), TokenStoreError> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)
                .await
                .map_err(|e| TokenStoreError::IoError(e.to_string()))?;
        }

        let json = serde_json::to_string_pretty(entries)
            .map_err(|e| TokenStoreError::SerializationFailed(e.to_string()))?;

        // Write beside the target and rename over it so a crash never
        // leaves a half-written file.
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);
        fs::write(&tmp, json)
            .await
            .map_err(|e| TokenStoreError::IoError(e.to_string()))?;
        fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| TokenStoreError::IoError(e.to_string()))
    }
}

#[async_trait]
impl TokenStore for FileTokenStore {
    async fn load(&self) -> Result<Option<SecretString>, TokenStoreError> {
        let _guard = self.lock.lock().await;
        let entries = self.read_entries().await?;
        Ok(entries
            .get(&self.key)
            .and_then(Value::as_str)
            .filter(|token| !token.is_empty())
            .map(|token| SecretString::new(token.to_string())))
    }

    async fn store(&self, token: &SecretString) -> Result<(), TokenStoreError> {
        let _guard = self.lock.lock().await;
        let (mut entries, _) = self.entries_for_write().await?;
        entries.insert(
            self.key.clone(),
            Value::String(token.expose_secret().clone()),
        );
        self.write_entries(&entries).await
    }

    async fn remove(&self) -> Result<(), TokenStoreError> {
        let _guard = self.lock.lock().await;
        let (mut entries, corrupt) = self.entries_for_write().await?;
        if entries.remove(&self.key).is_some() || corrupt {
            self.write_entries(&entries).await?;
        }
        Ok(())
    }

    async fn evict(&self, rejected: &SecretString) -> Result<bool, TokenStoreError> {
        let _guard = self.lock.lock().await;
        let (mut entries, corrupt) = self.entries_for_write().await?;
        let matches = entries.get(&self.key).and_then(Value::as_str)
            == Some(rejected.expose_secret().as_str());
        if !matches {
            if corrupt {
                self.write_entries(&entries).await?;
            }
            return Ok(false);
        }
        entries.remove(&self.key);
        self.write_entries(&entries).await?;
        Ok(true)
    }
}
