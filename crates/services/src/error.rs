//! Shared error types for the services crate.

use thiserror::Error;

use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;

/// Errors emitted by reflection clients.
///
/// These never reach the user: `ReflectionService` swaps them for a fallback text.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ReflectionError {
    #[error("reflection service is not configured")]
    Disabled,
    #[error("invalid reflection base URL: {0}")]
    InvalidBaseUrl(String),
    #[error("reflection service returned an empty response")]
    EmptyResponse,
    #[error("reflection request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// Errors emitted by `ProgressService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProgressServiceError {
    #[error("failed to purge persisted data: {0}")]
    Purge(#[source] StorageError),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
    #[error(transparent)]
    Reflection(#[from] ReflectionError),
}
