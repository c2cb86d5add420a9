//! Error types for the storage layer.

use thiserror::Error;

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors that can occur in storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// IO error (snapshot file).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A thread panicked while holding the host state lock.
    #[error("host state lock poisoned")]
    Poisoned,

    /// Failure reported by a third-party backend.
    #[error("backend error: {0}")]
    Backend(String),
}
