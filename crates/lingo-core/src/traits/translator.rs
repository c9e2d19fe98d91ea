//! Machine translation port

use async_trait::async_trait;

use crate::error::TranslateError;
use crate::value_objects::Language;

/// A machine-translation backend
///
/// Implementations own their timeout. A timeout is reported like any other
/// failure, and callers fall back to the untranslated text.
#[async_trait]
pub trait Translator: Send + Sync {
    async fn translate(
        &self,
        text: &str,
        from: Language,
        to: Language,
    ) -> Result<String, TranslateError>;
}
