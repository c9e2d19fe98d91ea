//! Errors raised by translation backends
//!
//! Callers never propagate these; every variant degrades to the original text.

use thiserror::Error;

/// Translator port errors
#[derive(Debug, Error)]
pub enum TranslateError {
    #[error("Translation timed out after {0} ms")]
    Timeout(u64),

    #[error("Translation backend error: {0}")]
    Backend(String),

    #[error("Malformed translation response: {0}")]
    MalformedResponse(String),
}
