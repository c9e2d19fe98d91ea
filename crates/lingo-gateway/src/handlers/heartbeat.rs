//! Heartbeat handler (op 1)

use super::HandlerResult;
use crate::connection::Connection;
use crate::protocol::{GatewayMessage, HeartbeatAckPayload};
use serde_json::Value;
use std::sync::Arc;

/// Handles heartbeat messages
pub struct HeartbeatHandler;

impl HeartbeatHandler {
    /// Echo the heartbeat payload back with the server clock
    pub async fn handle(connection: &Arc<Connection>, data: Option<Value>) -> HandlerResult<()> {
        tracing::trace!(
            connection_id = %connection.connection_id(),
            server_seq = connection.current_sequence(),
            "Heartbeat received"
        );

        let ack = HeartbeatAckPayload::now(data.unwrap_or(Value::Null));
        connection.send(GatewayMessage::heartbeat_ack(ack))?;

        Ok(())
    }
}
