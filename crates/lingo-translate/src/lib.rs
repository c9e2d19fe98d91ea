//! # lingo-translate
//!
//! Turns one chat line into a text for every supported language.
//!
//! - [`TranslationPipeline`] detects the source language, keeps the original
//!   for that slot and fans out one translator call per remaining language.
//!   A failed call degrades to the original text for that language only.
//! - [`HttpTranslator`] is the network backend, speaking the LibreTranslate
//!   `POST /translate` API.

mod http_translator;
mod pipeline;

pub use http_translator::HttpTranslator;
pub use pipeline::{Translated, TranslationPipeline};
