//! Application error types
//!
//! Errors that can stop the process during startup. Once the gateway is
//! serving, failures degrade per command instead of surfacing here.

use crate::config::ConfigError;
use lingo_core::{DomainError, StorageError};
use std::fmt;

/// Application-wide error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    // Storage errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    // Server errors (bind, serve)
    #[error("Server error: {0}")]
    Server(String),

    // Domain errors
    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl AppError {
    /// Get error code for logs
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Config(_) => "CONFIG_ERROR",
            Self::Storage(_) => "STORAGE_ERROR",
            Self::Server(_) => "SERVER_ERROR",
            Self::Domain(e) => e.code(),
        }
    }

    /// Create a server error
    #[must_use]
    pub fn server(msg: impl fmt::Display) -> Self {
        Self::Server(msg.to_string())
    }
}

impl From<ConfigError> for AppError {
    fn from(err: ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}
