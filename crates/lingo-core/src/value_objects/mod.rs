//! Value objects - immutable types that represent domain concepts

mod language;
mod room_id;

pub use language::{Language, LanguageParseError};
pub use room_id::generate_room_id;
