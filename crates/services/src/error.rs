//! Shared error types for the services crate.

use thiserror::Error;

use storage::repository::StorageError;

/// Errors emitted by the remote progress client.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RemoteError {
    #[error("progress service request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error("progress service did not report success")]
    Rejected,
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// Failure of a single tracker step.
///
/// Public `ProgressTracker` operations never return this; they log it and
/// fall back to local or default state.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TrackerError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Remote(#[from] RemoteError),
    #[error("{key} does not hold valid JSON: {source}")]
    Decode {
        key: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to encode {key}: {source}")]
    Encode {
        key: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// Errors emitted by `SessionService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error("email and token must be non-empty")]
    MissingCredentials,
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted while building `ProgressApiConfig`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("invalid progress API base URL: {0}")]
    InvalidBaseUrl(String),
    #[error("invalid progress API timeout: {0}")]
    InvalidTimeout(String),
}
