//! # lingo-core
//!
//! Domain layer containing rooms, messages, the supported language set, the
//! script-based language resolver, and the storage/translator ports.
//! This crate has zero dependencies on infrastructure (Redis, HTTP, WebSocket).

pub mod entities;
pub mod error;
pub mod language;
pub mod traits;
pub mod value_objects;

pub use entities::{Message, Room, Sender, Translations};
pub use error::{DomainError, StorageError, StorageResult, TranslateError};
pub use traits::{KeyValueStore, Translator};
pub use value_objects::{generate_room_id, Language};
