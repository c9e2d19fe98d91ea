//! Envelope op codes

use serde::{Deserialize, Serialize};

/// The `op` field of every frame
///
/// Encoded as a bare integer. Clients may only send `Heartbeat` and
/// `Command`; everything else is server to client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
#[repr(u8)]
pub enum OpCode {
    /// Event delivery, `t` names the event and `s` orders it
    Dispatch = 0,
    Heartbeat = 1,
    /// Client request, `t` names the command
    Command = 2,
    /// First frame on a new socket, carries the heartbeat interval
    Hello = 10,
    HeartbeatAck = 11,
}

/// An integer that is not a known op code
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("invalid op code: {0}")]
pub struct UnknownOpCode(pub u8);

impl TryFrom<u8> for OpCode {
    type Error = UnknownOpCode;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Ok(match value {
            0 => Self::Dispatch,
            1 => Self::Heartbeat,
            2 => Self::Command,
            10 => Self::Hello,
            11 => Self::HeartbeatAck,
            other => return Err(UnknownOpCode(other)),
        })
    }
}

impl From<OpCode> for u8 {
    fn from(op: OpCode) -> Self {
        op as u8
    }
}

impl std::fmt::Display for OpCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?} ({})", *self as u8)
    }
}
