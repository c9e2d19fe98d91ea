//! Domain entities - core business objects

mod message;
mod room;

pub use message::{Message, Sender, Translations};
pub use room::Room;
