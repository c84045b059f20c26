use async_trait::async_trait;
use hafiz_core::model::{ProgressState, ThemeMode};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

use crate::codec;

/// Key of the progress blob.
pub const PROGRESS_KEY: &str = "al_hafiz_user_progress";

/// Key of the theme blob.
pub const THEME_KEY: &str = "al_hafiz_theme_mode";

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Keyed string blobs, the lowest persistence layer.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Fetch a blob, `None` if the key was never written.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    async fn get_blob(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Insert or replace a blob.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the blob cannot be stored.
    async fn put_blob(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete a single blob. Deleting a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    async fn remove_blob(&self, key: &str) -> Result<(), StorageError>;

    /// Delete every blob.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    async fn clear_blobs(&self) -> Result<(), StorageError>;
}

/// Repository contract for the progress snapshot.
#[async_trait]
pub trait ProgressRepository: Send + Sync {
    /// Load the persisted progress, `None` if nothing was saved yet.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Serialization` if the stored blob cannot be decoded,
    /// or other storage errors.
    async fn load_progress(&self) -> Result<Option<ProgressState>, StorageError>;

    /// Persist the whole progress state.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the state cannot be stored.
    async fn save_progress(&self, state: &ProgressState) -> Result<(), StorageError>;
}

/// Repository contract for the theme flag.
#[async_trait]
pub trait ThemeRepository: Send + Sync {
    /// Load the persisted theme, `None` if never saved.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Serialization` for an unrecognized flag, or other storage errors.
    async fn load_theme(&self) -> Result<Option<ThemeMode>, StorageError>;

    /// Persist the theme flag.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the flag cannot be stored.
    async fn save_theme(&self, mode: ThemeMode) -> Result<(), StorageError>;
}

#[async_trait]
impl<T: BlobStore> ProgressRepository for T {
    async fn load_progress(&self) -> Result<Option<ProgressState>, StorageError> {
        match self.get_blob(PROGRESS_KEY).await? {
            Some(raw) => codec::decode_progress(&raw).map(Some),
            None => Ok(None),
        }
    }

    async fn save_progress(&self, state: &ProgressState) -> Result<(), StorageError> {
        let raw = codec::encode_progress(state)?;
        self.put_blob(PROGRESS_KEY, &raw).await
    }
}

#[async_trait]
impl<T: BlobStore> ThemeRepository for T {
    async fn load_theme(&self) -> Result<Option<ThemeMode>, StorageError> {
        match self.get_blob(THEME_KEY).await? {
            Some(raw) => codec::decode_theme(&raw).map(Some),
            None => Ok(None),
        }
    }

    async fn save_theme(&self, mode: ThemeMode) -> Result<(), StorageError> {
        self.put_blob(THEME_KEY, mode.as_str()).await
    }
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    blobs: Arc<Mutex<HashMap<String, String>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self {
            blobs: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl BlobStore for InMemoryRepository {
    async fn get_blob(&self, key: &str) -> Result<Option<String>, StorageError> {
        let guard = self
            .blobs
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.get(key).cloned())
    }

    async fn put_blob(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut guard = self
            .blobs
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    async fn remove_blob(&self, key: &str) -> Result<(), StorageError> {
        let mut guard = self
            .blobs
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.remove(key);
        Ok(())
    }

    async fn clear_blobs(&self) -> Result<(), StorageError> {
        let mut guard = self
            .blobs
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.clear();
        Ok(())
    }
}

/// Aggregates repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub blobs: Arc<dyn BlobStore>,
    pub progress: Arc<dyn ProgressRepository>,
    pub theme: Arc<dyn ThemeRepository>,
}

impl Storage {
    /// Wire all repositories to one blob backend.
    #[must_use]
    pub fn from_blob_store<S>(store: S) -> Self
    where
        S: BlobStore + Clone + 'static,
    {
        let blobs: Arc<dyn BlobStore> = Arc::new(store.clone());
        let progress: Arc<dyn ProgressRepository> = Arc::new(store.clone());
        let theme: Arc<dyn ThemeRepository> = Arc::new(store);
        Self {
            blobs,
            progress,
            theme,
        }
    }

    #[must_use]
    pub fn in_memory() -> Self {
        Self::from_blob_store(InMemoryRepository::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hafiz_core::model::{JuzId, Stage};
    use hafiz_core::time::fixed_now;

    #[tokio::test]
    async fn round_trips_progress() {
        let repo = InMemoryRepository::new();
        let mut state = ProgressState::zero();
        state.record_progress(JuzId::new(5).unwrap(), Stage::Half, fixed_now());

        repo.save_progress(&state).await.unwrap();
        let loaded = repo.load_progress().await.unwrap();
        assert_eq!(loaded, Some(state));
    }

    #[tokio::test]
    async fn missing_blobs_load_as_none() {
        let repo = InMemoryRepository::new();
        assert!(repo.load_progress().await.unwrap().is_none());
        assert!(repo.load_theme().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn corrupt_progress_is_a_serialization_error() {
        let repo = InMemoryRepository::new();
        repo.put_blob(PROGRESS_KEY, "{not json").await.unwrap();
        let err = repo.load_progress().await.unwrap_err();
        assert!(matches!(err, StorageError::Serialization(_)));
    }

    #[tokio::test]
    async fn theme_is_stored_as_literal() {
        let repo = InMemoryRepository::new();
        repo.save_theme(ThemeMode::Dark).await.unwrap();
        assert_eq!(repo.get_blob(THEME_KEY).await.unwrap().as_deref(), Some("dark"));
        assert_eq!(repo.load_theme().await.unwrap(), Some(ThemeMode::Dark));
    }

    #[tokio::test]
    async fn clear_removes_both_blobs() {
        let storage = Storage::in_memory();
        storage.progress.save_progress(&ProgressState::zero()).await.unwrap();
        storage.theme.save_theme(ThemeMode::Light).await.unwrap();

        storage.blobs.clear_blobs().await.unwrap();

        assert!(storage.progress.load_progress().await.unwrap().is_none());
        assert!(storage.theme.load_theme().await.unwrap().is_none());
    }
}
