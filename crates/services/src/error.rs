//! Shared error types for the services crate.

use thiserror::Error;

use storage::sqlite::SqliteInitError;

/// Errors emitted by `ProgressApi` implementations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProgressApiError {
    #[error("progress api returned an empty response")]
    EmptyResponse,
    #[error("progress api request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error("progress api request rejected: {0}")]
    Rejected(String),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error(transparent)]
    Decode(#[from] serde_json::Error),
}

/// Errors emitted by `ClearProgressService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ClearProgressError {
    #[error(transparent)]
    Api(#[from] ProgressApiError),
}

/// Errors emitted by `DashboardService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DashboardError {
    #[error(transparent)]
    Api(#[from] ProgressApiError),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
}
