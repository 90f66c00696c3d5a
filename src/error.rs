//! Error types for the requirements checker.

use thiserror::Error;

/// Catalog rejected at load time. The app stays inert, same as a failed fetch.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("invalid catalog JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("game entry {index} has an empty id")]
    EmptyId { index: usize },

    #[error("duplicate game id: {0}")]
    DuplicateId(String),

    #[error("game {id}: {field} must be a finite, non-negative number")]
    InvalidNumber { id: String, field: &'static str },
}

/// Failure of the durable profile store backing the preference store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("profile store unavailable: {0}")]
    Unavailable(String),

    #[error("profile store rejected the write: {0}")]
    Rejected(String),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("storage key must not be empty")]
    EmptyStorageKey,
}
