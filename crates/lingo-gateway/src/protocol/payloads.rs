//! Payload definitions
//!
//! `d` bodies for server control messages and client commands.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Payload for op 10 (Hello)
///
/// Sent by the server immediately after connection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HelloPayload {
    /// Heartbeat interval in milliseconds
    pub heartbeat_interval: u64,
}

impl HelloPayload {
    /// Default heartbeat interval (45 seconds)
    pub const DEFAULT_HEARTBEAT_INTERVAL: u64 = 45_000;

    #[must_use]
    pub fn with_interval(heartbeat_interval: u64) -> Self {
        Self { heartbeat_interval }
    }
}

impl Default for HelloPayload {
    fn default() -> Self {
        Self::with_interval(Self::DEFAULT_HEARTBEAT_INTERVAL)
    }
}

/// Payload for op 11 (Heartbeat ACK)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeartbeatAckPayload {
    /// Whatever the client sent as the heartbeat `d`
    pub echo: Value,
    /// Server clock, unix milliseconds
    pub server_time: i64,
}

impl HeartbeatAckPayload {
    #[must_use]
    pub fn now(echo: Value) -> Self {
        Self {
            echo,
            server_time: chrono::Utc::now().timestamp_millis(),
        }
    }
}

/// `CREATE_ROOM` payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRoomPayload {
    pub name: String,
}

/// `JOIN_ROOM` payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JoinRoomPayload {
    pub room_id: String,
    /// Requested history replay size
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
}

/// `SEND_MESSAGE` payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendMessagePayload {
    pub text: String,
}
