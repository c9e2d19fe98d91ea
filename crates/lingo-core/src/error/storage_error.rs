//! Errors raised by key-value store adapters

use thiserror::Error;

/// Storage port errors
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backend could not be reached or rejected the command
    #[error("Storage backend error: {0}")]
    Backend(String),

    /// A record could not be encoded for writing
    #[error("Failed to encode record: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;
