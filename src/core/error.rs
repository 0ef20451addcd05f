//! Error types for store operations
//!
//! Store failures surface as [`StoreError`] and propagate with `?`; there is
//! no retry or backoff layer. The only place an error is observed and
//! absorbed is the rollback demonstration, which maps
//! [`StoreError::TransactionAborted`] to an explicit outcome value.

use thiserror::Error;

/// Errors raised by a document store backend.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The addressed document does not exist.
    ///
    /// Raised by `update`; `get` returns `Ok(None)` and `delete` is
    /// idempotent instead.
    #[error("document '{path}' not found")]
    NotFound { path: String },

    /// A transaction callback returned an error; every staged write was
    /// discarded.
    #[error("transaction aborted: {source}")]
    TransactionAborted {
        #[source]
        source: anyhow::Error,
    },

    /// Converting between typed values and document fields failed.
    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Backend-specific failure (lock poisoning, connection loss, ...).
    #[error("storage backend error: {message}")]
    Backend { message: String },
}

impl StoreError {
    pub fn not_found(path: impl Into<String>) -> Self {
        Self::NotFound { path: path.into() }
    }

    /// True when this error reports a rolled-back transaction.
    pub fn is_aborted(&self) -> bool {
        matches!(self, Self::TransactionAborted { .. })
    }
}
