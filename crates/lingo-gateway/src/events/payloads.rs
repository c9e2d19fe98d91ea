//! Event payload definitions
//!
//! Rooms and messages go on the wire in their stored record shape.

use lingo_core::{Message, Room};
use serde::{Deserialize, Serialize};

/// READY event payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadyEvent {
    pub connection_id: String,
    pub user_id: String,
    pub nickname: String,
}

/// ROOM_LIST event payload, rooms oldest first
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomListEvent {
    pub rooms: Vec<Room>,
}

/// ROOM_CREATE event payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomCreateEvent {
    pub room: Room,
}

/// ROOM_JOIN event payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomJoinEvent {
    pub room_id: String,
    /// `None` when the id names no registered room
    pub room: Option<Room>,
    /// History replay, oldest first
    pub messages: Vec<Message>,
}

/// MESSAGE_CREATE event payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageCreateEvent {
    pub message: Message,
}
