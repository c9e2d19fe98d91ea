//! Language resolver
//!
//! A closed three-way script classifier plus the Hangul jamo helpers the
//! translation pipeline needs. Everything here is pure and deterministic.

mod detect;
mod jamo;

pub use detect::{detect, is_ambiguous_script, sanitize_for_translation_request};
pub use jamo::{is_jamo, transliterate};
