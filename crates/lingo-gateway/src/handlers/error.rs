//! Handler error types
//!
//! Rejected client input is not an error: handlers drop it and return `Ok`.
//! These cover failures of the gateway's own dependencies, which the
//! dispatcher logs without closing the connection.

use crate::connection::SendError;
use lingo_core::{DomainError, StorageError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HandlerError {
    /// Room store read or write failed
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Domain error surfaced by the room store
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    /// Event payload could not be encoded
    #[error("Encode error: {0}")]
    Encode(#[from] serde_json::Error),

    /// Reply could not be queued for the caller
    #[error("Send error: {0}")]
    Send(#[from] SendError),
}

impl HandlerError {
    /// Short code for logs
    pub fn code(&self) -> &'static str {
        match self {
            Self::Storage(_) => "STORAGE_ERROR",
            Self::Domain(e) => e.code(),
            Self::Encode(_) => "ENCODE_ERROR",
            Self::Send(_) => "SEND_ERROR",
        }
    }
}

/// Handler result type
pub type HandlerResult<T> = Result<T, HandlerError>;
