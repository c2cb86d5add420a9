use adminkit_storage::StorageError;
use thiserror::Error;

/// Result type for data object operations.
pub type ObjectResult<T> = Result<T, ObjectError>;

#[derive(Debug, Error)]
pub enum ObjectError {
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// `save`/`delete` was called on an entity that was never persisted.
    #[error("entity has no id; create it before saving or deleting")]
    Unsaved,
}
