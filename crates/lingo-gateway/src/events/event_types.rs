//! Gateway event types
//!
//! Event names sent in the `t` field of dispatch messages.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GatewayEventType {
    /// Identity confirmation, first dispatch on every connection
    Ready,
    /// Full room listing (reply, post-connect push, or broadcast after a create)
    RoomList,
    /// The room the caller just created
    RoomCreate,
    /// Join confirmation with room metadata and history replay
    RoomJoin,
    /// A new chat line in the joined room
    MessageCreate,
}

impl GatewayEventType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ready => "READY",
            Self::RoomList => "ROOM_LIST",
            Self::RoomCreate => "ROOM_CREATE",
            Self::RoomJoin => "ROOM_JOIN",
            Self::MessageCreate => "MESSAGE_CREATE",
        }
    }

    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "READY" => Some(Self::Ready),
            "ROOM_LIST" => Some(Self::RoomList),
            "ROOM_CREATE" => Some(Self::RoomCreate),
            "ROOM_JOIN" => Some(Self::RoomJoin),
            "MESSAGE_CREATE" => Some(Self::MessageCreate),
            _ => None,
        }
    }
}

impl fmt::Display for GatewayEventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<GatewayEventType> for String {
    fn from(event: GatewayEventType) -> Self {
        event.as_str().to_string()
    }
}
