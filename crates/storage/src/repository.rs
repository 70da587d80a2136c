use async_trait::async_trait;
use chrono::{DateTime, Utc};
use progress_core::model::ProgressKey;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// A locally cached progress entry.
///
/// The payload is opaque to the cache; it is whatever the resource page last
/// stored for the key (typically the JSON list of done/learning/skipped ids).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedProgress {
    pub key: ProgressKey,
    pub payload: String,
    pub updated_at: DateTime<Utc>,
}

impl CachedProgress {
    #[must_use]
    pub fn new(key: ProgressKey, payload: impl Into<String>, updated_at: DateTime<Utc>) -> Self {
        Self {
            key,
            payload: payload.into(),
            updated_at,
        }
    }
}

/// Key-value cache of per-resource progress.
#[async_trait]
pub trait ProgressCacheRepository: Send + Sync {
    /// Fetch a cached entry.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    async fn get_progress(&self, key: &ProgressKey)
    -> Result<Option<CachedProgress>, StorageError>;

    /// Insert or replace an entry.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the entry cannot be stored.
    async fn put_progress(&self, entry: &CachedProgress) -> Result<(), StorageError>;

    /// Delete an entry. Returns whether anything was removed.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    async fn remove_progress(&self, key: &ProgressKey) -> Result<bool, StorageError>;

    /// List cached keys in ascending order.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    async fn list_keys(&self) -> Result<Vec<ProgressKey>, StorageError>;
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    entries: Arc<Mutex<BTreeMap<ProgressKey, CachedProgress>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProgressCacheRepository for InMemoryRepository {
    async fn get_progress(
        &self,
        key: &ProgressKey,
    ) -> Result<Option<CachedProgress>, StorageError> {
        let guard = self
            .entries
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.get(key).cloned())
    }

    async fn put_progress(&self, entry: &CachedProgress) -> Result<(), StorageError> {
        let mut guard = self
            .entries
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.insert(entry.key.clone(), entry.clone());
        Ok(())
    }

    async fn remove_progress(&self, key: &ProgressKey) -> Result<bool, StorageError> {
        let mut guard = self
            .entries
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.remove(key).is_some())
    }

    async fn list_keys(&self) -> Result<Vec<ProgressKey>, StorageError> {
        let guard = self
            .entries
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.keys().cloned().collect())
    }
}

/// Aggregates repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub progress_cache: Arc<dyn ProgressCacheRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let repo: Arc<dyn ProgressCacheRepository> = Arc::new(InMemoryRepository::new());
        Self {
            progress_cache: repo,
        }
    }
}
