//! Op code and command handlers
//!
//! Routes each inbound message to its handler. Handlers for one connection
//! run one at a time, in arrival order.

mod chat;
mod connect;
mod error;
mod heartbeat;
mod rooms;

pub use chat::ChatHandler;
pub use connect::{ConnectHandler, IdentityClaims};
pub use error::{HandlerError, HandlerResult};
pub use heartbeat::HeartbeatHandler;
pub use rooms::RoomHandler;

use crate::connection::Connection;
use crate::protocol::{ClientCommand, GatewayMessage, OpCode};
use crate::server::GatewayState;
use std::sync::Arc;

/// Dispatch incoming client messages to appropriate handlers
pub struct MessageDispatcher;

impl MessageDispatcher {
    /// Handle an incoming client message
    ///
    /// Unknown ops and commands are ignored. Errors are returned for the
    /// caller to log; none of them should close the connection.
    pub async fn dispatch(
        state: &GatewayState,
        connection: &Arc<Connection>,
        message: GatewayMessage,
    ) -> HandlerResult<()> {
        match message.op {
            OpCode::Heartbeat => HeartbeatHandler::handle(connection, message.d).await,
            OpCode::Command => {
                let Some(command) = message.as_command() else {
                    tracing::debug!(
                        connection_id = %connection.connection_id(),
                        command = ?message.t,
                        "Unknown command ignored"
                    );
                    return Ok(());
                };

                tracing::trace!(
                    connection_id = %connection.connection_id(),
                    command = %command,
                    "Command received"
                );

                match command {
                    ClientCommand::ListRooms => RoomHandler::list_rooms(state, connection).await,
                    ClientCommand::CreateRoom => {
                        RoomHandler::create_room(state, connection, message.payload()).await
                    }
                    ClientCommand::JoinRoom => {
                        RoomHandler::join_room(state, connection, message.payload()).await
                    }
                    ClientCommand::SendMessage => {
                        ChatHandler::send_message(state, connection, message.payload()).await
                    }
                }
            }
            OpCode::Dispatch | OpCode::Hello | OpCode::HeartbeatAck => {
                tracing::debug!(
                    connection_id = %connection.connection_id(),
                    op = %message.op,
                    "Server-only op code from client ignored"
                );
                Ok(())
            }
        }
    }
}
