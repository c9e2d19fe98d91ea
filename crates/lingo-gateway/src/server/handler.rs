//! WebSocket handler
//!
//! Handles WebSocket connections and message processing.

use crate::connection::Connection;
use crate::handlers::{ConnectHandler, IdentityClaims, MessageDispatcher};
use crate::protocol::{GatewayMessage, HelloPayload};
use crate::server::GatewayState;
use axum::{
    extract::{
        ws::{Message, WebSocket},
        Query, State, WebSocketUpgrade,
    },
    response::IntoResponse,
};
use futures_util::{SinkExt, StreamExt};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::interval;

/// Channel buffer size for outgoing messages
const MESSAGE_BUFFER_SIZE: usize = 256;

/// WebSocket gateway handler
///
/// Identity claims come from the `user_id` and `nickname` query parameters.
pub async fn gateway_handler(
    State(state): State<GatewayState>,
    Query(claims): Query<IdentityClaims>,
    ws: WebSocketUpgrade,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(state, socket, claims))
}

/// Handle an upgraded WebSocket connection
async fn handle_socket(state: GatewayState, socket: WebSocket, claims: IdentityClaims) {
    let connection_id = uuid::Uuid::new_v4().to_string();
    let heartbeat_interval = state.config().gateway.heartbeat_interval_ms;

    // Create message channel for outgoing messages
    let (tx, mut rx) = mpsc::channel::<GatewayMessage>(MESSAGE_BUFFER_SIZE);

    let connection = Connection::new(connection_id.clone(), tx);

    tracing::info!(connection_id = %connection_id, "WebSocket connection established");

    let (mut ws_sink, mut ws_stream) = socket.split();

    // Hello goes out before anything queued
    let hello = GatewayMessage::hello(HelloPayload::with_interval(heartbeat_interval));
    if let Ok(json) = hello.to_json() {
        if ws_sink.send(Message::Text(json)).await.is_err() {
            tracing::warn!(connection_id = %connection_id, "Failed to send Hello message");
            ConnectHandler::disconnect(&state, &connection_id);
            return;
        }
    }

    if let Err(e) = ConnectHandler::handle(&state, &connection, &claims).await {
        tracing::warn!(connection_id = %connection_id, error = %e, "Connect handling failed");
    }

    let state_recv = state.clone();
    let connection_id_recv = connection_id.clone();
    let connection_recv = connection.clone();

    // Receive task: one message at a time, in arrival order
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = ws_stream.next().await {
            match msg {
                Ok(Message::Text(text)) => {
                    connection_recv.touch();
                    handle_text_message(&state_recv, &connection_recv, &text).await;
                }
                Ok(Message::Binary(_)) => {
                    connection_recv.touch();
                    tracing::debug!(
                        connection_id = %connection_id_recv,
                        "Binary frame ignored"
                    );
                }
                Ok(Message::Ping(_) | Message::Pong(_)) => {
                    // Pong is handled automatically by axum
                    connection_recv.touch();
                }
                Ok(Message::Close(_)) => {
                    tracing::info!(connection_id = %connection_id_recv, "Client closed connection");
                    break;
                }
                Err(e) => {
                    tracing::warn!(
                        connection_id = %connection_id_recv,
                        error = %e,
                        "WebSocket error"
                    );
                    break;
                }
            }
        }
    });

    let connection_id_send = connection_id.clone();

    // Send task: drain the outbound queue into the socket
    let mut send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            match msg.to_json() {
                Ok(json) => {
                    if ws_sink.send(Message::Text(json)).await.is_err() {
                        tracing::warn!(
                            connection_id = %connection_id_send,
                            "Failed to send message to WebSocket"
                        );
                        break;
                    }
                }
                Err(e) => {
                    tracing::warn!(connection_id = %connection_id_send, error = %e, "Failed to encode message");
                }
            }
        }

        let _ = ws_sink.close().await;
    });

    let connection_id_hb = connection_id.clone();
    let connection_hb = connection.clone();

    // Idle monitor: no inbound traffic for two intervals closes the socket
    let mut heartbeat_task = tokio::spawn(async move {
        let timeout = Duration::from_millis(heartbeat_interval.saturating_mul(2));
        let mut check_interval = interval(Duration::from_millis((heartbeat_interval / 2).max(1)));

        loop {
            check_interval.tick().await;

            let idle = connection_hb.idle_for();
            if idle > timeout {
                tracing::warn!(
                    connection_id = %connection_id_hb,
                    idle_ms = idle.as_millis(),
                    "Connection timed out (no heartbeat)"
                );
                break;
            }
        }
    });

    tokio::select! {
        _ = &mut recv_task => {
            tracing::debug!(connection_id = %connection_id, "Receive task ended");
        }
        _ = &mut send_task => {
            tracing::debug!(connection_id = %connection_id, "Send task ended");
        }
        _ = &mut heartbeat_task => {
            tracing::debug!(connection_id = %connection_id, "Heartbeat task ended");
        }
    }

    recv_task.abort();
    send_task.abort();
    heartbeat_task.abort();

    ConnectHandler::disconnect(&state, &connection_id);
}

/// Handle a text frame from the client
///
/// Nothing here closes the connection: undecodable frames are skipped and
/// handler errors are logged.
async fn handle_text_message(state: &GatewayState, connection: &Arc<Connection>, text: &str) {
    let message = match GatewayMessage::from_json(text) {
        Ok(m) => m,
        Err(e) => {
            tracing::debug!(
                connection_id = %connection.connection_id(),
                error = %e,
                "Undecodable frame ignored"
            );
            return;
        }
    };

    tracing::trace!(
        connection_id = %connection.connection_id(),
        op = %message.op,
        "Received message"
    );

    if let Err(e) = MessageDispatcher::dispatch(state, connection, message).await {
        tracing::warn!(
            connection_id = %connection.connection_id(),
            error = %e,
            code = e.code(),
            "Handler error"
        );
    }
}
