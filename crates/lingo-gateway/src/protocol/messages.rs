//! Gateway message format
//!
//! Every frame in either direction is one JSON envelope.

use super::{ClientCommand, HeartbeatAckPayload, HelloPayload, OpCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Gateway message format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayMessage {
    /// Operation code
    pub op: OpCode,

    /// Event type (op=0) or command name (op=2)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub t: Option<String>,

    /// Sequence number (only for op=0 Dispatch)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub s: Option<u64>,

    /// Event data payload
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub d: Option<Value>,
}

impl GatewayMessage {
    // === Server Messages ===

    /// Create a Dispatch message (op=0)
    #[must_use]
    pub fn dispatch(event_type: impl Into<String>, sequence: u64, data: Value) -> Self {
        Self {
            op: OpCode::Dispatch,
            t: Some(event_type.into()),
            s: Some(sequence),
            d: Some(data),
        }
    }

    /// Create a Hello message (op=10)
    #[must_use]
    pub fn hello(payload: HelloPayload) -> Self {
        Self {
            op: OpCode::Hello,
            t: None,
            s: None,
            d: Some(serde_json::to_value(payload).unwrap_or_default()),
        }
    }

    /// Create a Heartbeat ACK message (op=11)
    #[must_use]
    pub fn heartbeat_ack(payload: HeartbeatAckPayload) -> Self {
        Self {
            op: OpCode::HeartbeatAck,
            t: None,
            s: None,
            d: Some(serde_json::to_value(payload).unwrap_or_default()),
        }
    }

    // === Client Messages ===

    /// Create a Heartbeat message (op=1)
    #[must_use]
    pub fn heartbeat(data: Option<Value>) -> Self {
        Self {
            op: OpCode::Heartbeat,
            t: None,
            s: None,
            d: data,
        }
    }

    /// Create a Command message (op=2)
    #[must_use]
    pub fn command(command: ClientCommand, data: Option<Value>) -> Self {
        Self {
            op: OpCode::Command,
            t: Some(command.as_str().to_string()),
            s: None,
            d: data,
        }
    }

    // === Parsing Client Messages ===

    /// The command named by an op 2 message, if known
    pub fn as_command(&self) -> Option<ClientCommand> {
        if self.op != OpCode::Command {
            return None;
        }
        self.t.as_deref().and_then(ClientCommand::parse)
    }

    /// Decode `d` into a command payload
    pub fn payload<T: DeserializeOwned>(&self) -> Option<T> {
        self.d.as_ref().and_then(|d| serde_json::from_value(d.clone()).ok())
    }

    // === Utilities ===

    /// Serialize to JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserialize from JSON string
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl std::fmt::Display for GatewayMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(t) = &self.t {
            write!(f, "GatewayMessage(op={}, t={}", self.op, t)?;
            if let Some(s) = self.s {
                write!(f, ", s={s}")?;
            }
            write!(f, ")")
        } else {
            write!(f, "GatewayMessage(op={})", self.op)
        }
    }
}
