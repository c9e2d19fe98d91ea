//! Error types for the domain layer and its ports

mod domain_error;
mod storage_error;
mod translate_error;

pub use domain_error::DomainError;
pub use storage_error::{StorageError, StorageResult};
pub use translate_error::TranslateError;
