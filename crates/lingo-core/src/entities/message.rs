//! Message entity - a chat message rendered into every supported language

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::value_objects::Language;

/// Identity snapshot of whoever created a room or sent a message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sender {
    pub user_id: String,
    pub nickname: String,
}

impl Sender {
    pub fn new(user_id: impl Into<String>, nickname: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            nickname: nickname.into(),
        }
    }
}

/// Per-language text of one message
///
/// One field per supported language, so the map is total by construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Translations {
    pub ko: String,
    pub ja: String,
    pub en: String,
}

impl Translations {
    /// Every language set to the same text
    pub fn uniform(text: &str) -> Self {
        Self {
            ko: text.to_string(),
            ja: text.to_string(),
            en: text.to_string(),
        }
    }

    pub fn get(&self, language: Language) -> &str {
        match language {
            Language::Ko => &self.ko,
            Language::Ja => &self.ja,
            Language::En => &self.en,
        }
    }

    pub fn set(&mut self, language: Language, text: String) {
        match language {
            Language::Ko => self.ko = text,
            Language::Ja => self.ja = text,
            Language::En => self.en = text,
        }
    }
}

/// Message entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: Uuid,
    pub room_id: String,
    pub sender: Sender,
    pub at: DateTime<Utc>,
    /// Detected language of the original text
    pub source: Language,
    pub translations: Translations,
}

impl Message {
    /// Create a new Message stamped with the current time
    pub fn new(
        room_id: impl Into<String>,
        sender: Sender,
        source: Language,
        translations: Translations,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            room_id: room_id.into(),
            sender,
            at: Utc::now(),
            source,
            translations,
        }
    }

    /// The verbatim text the sender typed
    pub fn original(&self) -> &str {
        self.translations.get(self.source)
    }
}
