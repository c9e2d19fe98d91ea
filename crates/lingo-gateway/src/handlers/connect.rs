//! Connection lifecycle: session setup on connect, teardown on disconnect

use super::HandlerResult;
use crate::connection::Connection;
use crate::events::{GatewayEventType, ReadyEvent, RoomListEvent};
use crate::server::GatewayState;
use crate::session::Session;
use serde::Deserialize;
use std::sync::Arc;

/// Identity claimed by the client on the upgrade request
///
/// Nothing is verified; a claim only labels the connection.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IdentityClaims {
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub nickname: Option<String>,
}

impl IdentityClaims {
    pub fn new(user_id: impl Into<String>, nickname: impl Into<String>) -> Self {
        Self {
            user_id: Some(user_id.into()),
            nickname: Some(nickname.into()),
        }
    }
}

pub struct ConnectHandler;

impl ConnectHandler {
    /// Register the session, confirm the identity and push the room listing
    ///
    /// The connection joins the broadcast set only after READY is queued,
    /// so READY is always its first dispatch. The listing push is best
    /// effort; failing to read rooms leaves the connection usable.
    pub async fn handle(
        state: &GatewayState,
        connection: &Arc<Connection>,
        claims: &IdentityClaims,
    ) -> HandlerResult<Session> {
        let connection_id = connection.connection_id();
        let session = state.sessions().on_connect(
            connection_id,
            claims.user_id.as_deref(),
            claims.nickname.as_deref(),
        );

        let ready = ReadyEvent {
            connection_id: connection_id.to_string(),
            user_id: session.user_id.clone(),
            nickname: session.nickname.clone(),
        };
        connection.dispatch(GatewayEventType::Ready, serde_json::to_value(&ready)?)?;
        state.connection_manager().add_connection(connection.clone());

        match state.room_store().list_rooms().await {
            Ok(rooms) => {
                let listing = serde_json::to_value(RoomListEvent { rooms })?;
                if let Err(e) = connection.dispatch(GatewayEventType::RoomList, listing) {
                    tracing::warn!(connection_id = %connection_id, error = %e, "Failed to push room list");
                }
            }
            Err(e) => {
                tracing::warn!(connection_id = %connection_id, error = %e, "Failed to load rooms for initial push");
            }
        }

        tracing::info!(
            connection_id = %connection_id,
            user_id = %session.user_id,
            nickname = %session.nickname,
            "Session ready"
        );

        Ok(session)
    }

    /// Forget the session and its room membership; safe to call twice
    pub fn disconnect(state: &GatewayState, connection_id: &str) {
        if let Some(session) = state.sessions().on_disconnect(connection_id) {
            tracing::info!(
                connection_id = %connection_id,
                user_id = %session.user_id,
                room_id = ?session.room_id,
                "Session closed"
            );
        }
        state.connection_manager().remove_connection(connection_id);
    }
}
