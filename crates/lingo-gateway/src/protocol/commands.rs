//! Client command names
//!
//! Carried in the `t` field of op 2 messages.

use std::fmt;

/// Commands a client can issue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClientCommand {
    /// Request the room listing
    ListRooms,
    /// Create a room: `{ name }`
    CreateRoom,
    /// Join a room, leaving any current one: `{ room_id, limit? }`
    JoinRoom,
    /// Send a chat line to the joined room: `{ text }`
    SendMessage,
}

impl ClientCommand {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ListRooms => "LIST_ROOMS",
            Self::CreateRoom => "CREATE_ROOM",
            Self::JoinRoom => "JOIN_ROOM",
            Self::SendMessage => "SEND_MESSAGE",
        }
    }

    /// Parse a command name; unknown names yield `None`
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "LIST_ROOMS" => Some(Self::ListRooms),
            "CREATE_ROOM" => Some(Self::CreateRoom),
            "JOIN_ROOM" => Some(Self::JoinRoom),
            "SEND_MESSAGE" => Some(Self::SendMessage),
            _ => None,
        }
    }
}

impl fmt::Display for ClientCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
