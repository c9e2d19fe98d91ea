//! `SEND_MESSAGE`: translate, store, deliver to the room

use super::HandlerResult;
use crate::connection::Connection;
use crate::events::{GatewayEventType, MessageCreateEvent};
use crate::protocol::SendMessagePayload;
use crate::server::GatewayState;
use lingo_core::{Message, Sender};
use std::sync::Arc;

pub struct ChatHandler;

impl ChatHandler {
    /// Send a chat line to the caller's current room
    ///
    /// Dropped when the caller has not joined a room or the text is blank.
    /// The room receives the message only once every language is filled.
    pub async fn send_message(
        state: &GatewayState,
        connection: &Arc<Connection>,
        payload: Option<SendMessagePayload>,
    ) -> HandlerResult<()> {
        let connection_id = connection.connection_id();
        let Some(session) = state.sessions().get(connection_id) else {
            tracing::debug!(connection_id = %connection_id, "SEND_MESSAGE without session, dropped");
            return Ok(());
        };
        let Some(room_id) = session.room_id else {
            tracing::debug!(connection_id = %connection_id, "SEND_MESSAGE outside a room, dropped");
            return Ok(());
        };
        let Some(text) = payload
            .map(|p| p.text)
            .filter(|text| !text.trim().is_empty())
        else {
            tracing::debug!(connection_id = %connection_id, "SEND_MESSAGE with empty text, dropped");
            return Ok(());
        };

        let translated = state.pipeline().translate(&text).await;
        let message = Message::new(
            room_id.as_str(),
            Sender::new(session.user_id, session.nickname),
            translated.source,
            translated.translations,
        );

        state.room_store().append_message(&room_id, &message).await?;

        let data = serde_json::to_value(MessageCreateEvent { message })?;
        let delivered = state
            .connection_manager()
            .send_to_room(&room_id, GatewayEventType::MessageCreate, &data);

        tracing::debug!(
            connection_id = %connection_id,
            room_id = %room_id,
            delivered = delivered,
            "Message relayed"
        );

        Ok(())
    }
}
