//! Translation pipeline

use futures::future::join_all;
use lingo_core::language::{detect, is_ambiguous_script, sanitize_for_translation_request, transliterate};
use lingo_core::{Language, Translations, Translator};
use std::sync::Arc;

/// Result of running one chat line through the pipeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translated {
    /// Detected language of the input
    pub source: Language,
    /// One entry per supported language; the source entry is the input verbatim
    pub translations: Translations,
}

/// Fans a chat line out to every supported language
///
/// Never fails as a whole. Each target is attempted independently and a
/// target whose call fails keeps the original text.
#[derive(Clone)]
pub struct TranslationPipeline {
    translator: Arc<dyn Translator>,
}

impl TranslationPipeline {
    pub fn new(translator: Arc<dyn Translator>) -> Self {
        Self { translator }
    }

    pub async fn translate(&self, text: &str) -> Translated {
        let source = detect(text);
        let mut translations = Translations::uniform(text);

        // Bare jamo ("ㅋㅋ", "ㅠㅠ") is laughter or emotion, not words a
        // translator can work with.
        if source == Language::Ko && is_ambiguous_script(text) {
            let romanized = transliterate(text);
            for target in source.targets() {
                translations.set(target, romanized.clone());
            }
            tracing::debug!(source = %source, "Jamo-only text transliterated");
            return Translated { source, translations };
        }

        let request = sanitize_for_translation_request(text, source);
        let calls = source.targets().map(|target| {
            let request = request.as_str();
            async move { (target, self.translate_one(request, source, target).await) }
        });

        for (target, result) in join_all(calls).await {
            if let Some(translated) = result {
                translations.set(target, translated);
            }
        }

        Translated { source, translations }
    }

    async fn translate_one(&self, text: &str, source: Language, target: Language) -> Option<String> {
        match self.translator.translate(text, source, target).await {
            Ok(translated) if !translated.trim().is_empty() => Some(translated),
            Ok(_) => {
                tracing::warn!(
                    source = %source,
                    target = %target,
                    "Translator returned empty text, keeping original"
                );
                None
            }
            Err(e) => {
                tracing::warn!(
                    source = %source,
                    target = %target,
                    error = %e,
                    "Translation failed, keeping original"
                );
                None
            }
        }
    }
}

impl std::fmt::Debug for TranslationPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TranslationPipeline").finish_non_exhaustive()
    }
}
