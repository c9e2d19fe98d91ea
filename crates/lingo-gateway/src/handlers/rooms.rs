//! Room commands: `LIST_ROOMS`, `CREATE_ROOM`, `JOIN_ROOM`

use super::HandlerResult;
use crate::connection::Connection;
use crate::events::{GatewayEventType, RoomCreateEvent, RoomJoinEvent, RoomListEvent};
use crate::protocol::{CreateRoomPayload, JoinRoomPayload};
use crate::server::GatewayState;
use std::sync::Arc;

pub struct RoomHandler;

impl RoomHandler {
    /// Reply with every room, oldest first
    pub async fn list_rooms(state: &GatewayState, connection: &Arc<Connection>) -> HandlerResult<()> {
        let rooms = state.room_store().list_rooms().await?;
        connection.dispatch(
            GatewayEventType::RoomList,
            serde_json::to_value(RoomListEvent { rooms })?,
        )?;
        Ok(())
    }

    /// Create a room, tell the caller, then refresh everyone's listing
    pub async fn create_room(
        state: &GatewayState,
        connection: &Arc<Connection>,
        payload: Option<CreateRoomPayload>,
    ) -> HandlerResult<()> {
        let connection_id = connection.connection_id();
        let Some(session) = state.sessions().get(connection_id) else {
            tracing::debug!(connection_id = %connection_id, "CREATE_ROOM without session, dropped");
            return Ok(());
        };
        let Some(name) = payload
            .map(|p| p.name.trim().to_string())
            .filter(|name| !name.is_empty())
        else {
            tracing::debug!(connection_id = %connection_id, "CREATE_ROOM without a name, dropped");
            return Ok(());
        };

        let room = state
            .room_store()
            .create_room(&name, &session.user_id, &session.nickname)
            .await?;

        connection.dispatch(
            GatewayEventType::RoomCreate,
            serde_json::to_value(RoomCreateEvent { room })?,
        )?;

        let rooms = state.room_store().list_rooms().await?;
        state
            .connection_manager()
            .broadcast(GatewayEventType::RoomList, &serde_json::to_value(RoomListEvent { rooms })?);

        Ok(())
    }

    /// Move the caller into a room and replay its recent history
    ///
    /// The room id is not checked against the registry: an unknown id still
    /// joins, and the reply carries `room: null`.
    pub async fn join_room(
        state: &GatewayState,
        connection: &Arc<Connection>,
        payload: Option<JoinRoomPayload>,
    ) -> HandlerResult<()> {
        let connection_id = connection.connection_id();
        if state.sessions().get(connection_id).is_none() {
            tracing::debug!(connection_id = %connection_id, "JOIN_ROOM without session, dropped");
            return Ok(());
        }
        let Some(payload) = payload else {
            tracing::debug!(connection_id = %connection_id, "JOIN_ROOM without payload, dropped");
            return Ok(());
        };
        let room_id = payload.room_id.trim();
        if room_id.is_empty() {
            tracing::debug!(connection_id = %connection_id, "JOIN_ROOM with empty room id, dropped");
            return Ok(());
        }

        let left = state.connection_manager().join_room(connection_id, room_id);
        state.sessions().set_room(connection_id, room_id);

        tracing::info!(
            connection_id = %connection_id,
            room_id = %room_id,
            left = ?left,
            "Joined room"
        );

        let limit = Self::replay_limit(state, payload.limit);
        let room = state.room_store().get_room(room_id).await?;
        let messages = state.room_store().get_messages(room_id, limit).await?;

        let reply = RoomJoinEvent {
            room_id: room_id.to_string(),
            room,
            messages,
        };
        connection.dispatch(GatewayEventType::RoomJoin, serde_json::to_value(&reply)?)?;

        Ok(())
    }

    /// Requested replay size clamped to `1..=capacity`, or the configured default
    fn replay_limit(state: &GatewayState, requested: Option<usize>) -> usize {
        let capacity = state.room_store().capacity();
        requested
            .unwrap_or(state.config().history.replay_limit)
            .clamp(1, capacity)
    }
}
