//! Gateway protocol definitions
//!
//! Op codes, the message envelope, client commands and their payloads.

mod commands;
mod messages;
mod opcodes;
mod payloads;

pub use commands::ClientCommand;
pub use messages::GatewayMessage;
pub use opcodes::{OpCode, UnknownOpCode};
pub use payloads::{
    CreateRoomPayload, HeartbeatAckPayload, HelloPayload, JoinRoomPayload, SendMessagePayload,
};
