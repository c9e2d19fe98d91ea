//! Room registry and message history

mod room_store;

pub use room_store::RoomStore;
