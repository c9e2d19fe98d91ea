//! Domain errors - error types for the domain layer

use thiserror::Error;

use super::StorageError;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Room name must not be empty")]
    EmptyRoomName,

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl DomainError {
    /// Get an error code string for logs and diagnostics
    pub fn code(&self) -> &'static str {
        match self {
            Self::EmptyRoomName => "EMPTY_ROOM_NAME",
            Self::Storage(_) => "STORAGE_ERROR",
        }
    }
}
