//! Supported languages
//!
//! The relay renders every message into a closed set of three languages.
//! Adding a language means extending this enum, the script detector, and
//! the `Translations` record together.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A supported language, identified on the wire by its ISO 639-1 code
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// Korean (Hangul script)
    Ko,
    /// Japanese (Hiragana/Katakana script)
    Ja,
    /// English (fallback for everything else)
    En,
}

impl Language {
    /// Every supported language, in wire order
    pub const ALL: [Language; 3] = [Language::Ko, Language::Ja, Language::En];

    /// ISO 639-1 code
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Ko => "ko",
            Self::Ja => "ja",
            Self::En => "en",
        }
    }

    /// Parse from an ISO 639-1 code (case-insensitive)
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_ascii_lowercase().as_str() {
            "ko" => Some(Self::Ko),
            "ja" => Some(Self::Ja),
            "en" => Some(Self::En),
            _ => None,
        }
    }

    /// All languages other than `self`, i.e. the translation targets for a
    /// message whose source is `self`
    pub fn targets(self) -> impl Iterator<Item = Language> {
        Self::ALL.into_iter().filter(move |lang| *lang != self)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Error when parsing an unsupported language code
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported language code: {0}")]
pub struct LanguageParseError(pub String);

impl std::str::FromStr for Language {
    type Err = LanguageParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(s).ok_or_else(|| LanguageParseError(s.to_string()))
    }
}
