use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::{Mutex, RwLock};
use tracing::warn;

use crate::repositories::errors::token_repository_errors::TokenRepositoryError;

#[cfg(test)]
use mockall::automock;

/// Durable string key-value store backing the token cache.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait TokenRepository: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, TokenRepositoryError>;
    async fn set(&self, key: &str, value: &str) -> Result<(), TokenRepositoryError>;
    async fn remove(&self, key: &str) -> Result<(), TokenRepositoryError>;
}

/// Stores all keys as one JSON object in a single file, so cached tokens
/// survive restarts.
pub struct FileTokenRepository {
    path: PathBuf,
    // Serialises read-modify-write cycles within this process.
    lock: Mutex<()>,
}

impl FileTokenRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<HashMap<String, String>, TokenRepositoryError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) if contents.trim().is_empty() => Ok(HashMap::new()),
            Ok(contents) => serde_json::from_str(&contents)
                .map_err(|e| TokenRepositoryError::Serialization(e.to_string())),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(HashMap::new()),
            Err(e) => Err(TokenRepositoryError::Io(e.to_string())),
        }
    }

    /// Entries to rewrite. An unreadable file is replaced rather than kept
    /// forever, since everything in it can be fetched again.
    async fn load_for_write(&self) -> Result<HashMap<String, String>, TokenRepositoryError> {
        match self.load().await {
            Err(TokenRepositoryError::Serialization(e)) => {
                warn!(
                    "Discarding corrupt token store {}: {}",
                    self.path.display(),
                    e
                );
                Ok(HashMap::new())
            }
            other => other,
        }
    }

    // Written to a sibling file and renamed, so readers never see a partial store.
    async fn store(&self, entries: &HashMap<String, String>) -> Result<(), TokenRepositoryError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent)
                    .await
                    .map_err(|e| TokenRepositoryError::Io(e.to_string()))?;
            }
        }
        let contents = serde_json::to_string_pretty(entries)
            .map_err(|e| TokenRepositoryError::Serialization(e.to_string()))?;
        let mut staging = self.path.clone().into_os_string();
        staging.push(".tmp");
        let staging = PathBuf::from(staging);
        tokio::fs::write(&staging, contents)
            .await
            .map_err(|e| TokenRepositoryError::Io(e.to_string()))?;
        tokio::fs::rename(&staging, &self.path)
            .await
            .map_err(|e| TokenRepositoryError::Io(e.to_string()))
    }
}

#[async_trait]
impl TokenRepository for FileTokenRepository {
    async fn get(&self, key: &str) -> Result<Option<String>, TokenRepositoryError> {
        let _guard = self.lock.lock().await;
        let entries = self.load().await?;
        Ok(entries.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), TokenRepositoryError> {
        let _guard = self.lock.lock().await;
        let mut entries = self.load_for_write().await?;
        entries.insert(key.to_string(), value.to_string());
        self.store(&entries).await
    }

    async fn remove(&self, key: &str) -> Result<(), TokenRepositoryError> {
        let _guard = self.lock.lock().await;
        match self.load().await {
            Ok(mut entries) => {
                if entries.remove(key).is_some() {
                    self.store(&entries).await?;
                }
                Ok(())
            }
            Err(TokenRepositoryError::Serialization(e)) => {
                warn!(
                    "Discarding corrupt token store {}: {}",
                    self.path.display(),
                    e
                );
                self.store(&HashMap::new()).await
            }
            Err(e) => Err(e),
        }
    }
}

/// Process-local store, used when persistence is not wanted (tests, dry runs).
#[derive(Default)]
pub struct InMemoryTokenRepository {
    entries: RwLock<HashMap<String, String>>,
}

impl InMemoryTokenRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TokenRepository for InMemoryTokenRepository {
    async fn get(&self, key: &str) -> Result<Option<String>, TokenRepositoryError> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), TokenRepositoryError> {
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), TokenRepositoryError> {
        self.entries.write().await.remove(key);
        Ok(())
    }
}
