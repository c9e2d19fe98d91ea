//! Room registry and bounded message history.
//!
//! Layout in the key-value store:
//! - `rooms`: set of every room id
//! - `room:{id}`: JSON room record
//! - `room:{id}:messages`: JSON message records, newest first, capped
//!
//! Reads tolerate partial writes: a record that is missing or does not parse
//! is skipped on its own, never failing the whole listing.

use lingo_core::{DomainError, KeyValueStore, Message, Room, Sender, StorageResult};
use std::sync::Arc;

/// Key of the set holding every room id
const ROOM_INDEX_KEY: &str = "rooms";
/// Key prefix for room records and their history lists
const ROOM_PREFIX: &str = "room:";

/// Room registry and per-room message history
#[derive(Clone)]
pub struct RoomStore {
    store: Arc<dyn KeyValueStore>,
    capacity: usize,
}

impl RoomStore {
    /// Create a room store that keeps the newest `capacity` messages per room
    pub fn new(store: Arc<dyn KeyValueStore>, capacity: usize) -> Self {
        Self {
            store,
            capacity: capacity.max(1),
        }
    }

    /// Per-room history capacity
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    fn room_key(room_id: &str) -> String {
        format!("{ROOM_PREFIX}{room_id}")
    }

    fn history_key(room_id: &str) -> String {
        format!("{ROOM_PREFIX}{room_id}:messages")
    }

    /// Every registered room, oldest first
    pub async fn list_rooms(&self) -> StorageResult<Vec<Room>> {
        let ids = self.store.set_members(ROOM_INDEX_KEY).await?;
        let mut rooms = Vec::with_capacity(ids.len());

        for id in ids {
            match self.get_room(&id).await {
                Ok(Some(room)) => rooms.push(room),
                Ok(None) => {
                    tracing::debug!(room_id = %id, "Indexed room has no readable record, skipping");
                }
                Err(e) => {
                    tracing::warn!(room_id = %id, error = %e, "Failed to read room record, skipping");
                }
            }
        }

        rooms.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(rooms)
    }

    /// Look up one room; a corrupt record reads as absent
    pub async fn get_room(&self, room_id: &str) -> StorageResult<Option<Room>> {
        let Some(raw) = self.store.get_string(&Self::room_key(room_id)).await? else {
            return Ok(None);
        };

        match serde_json::from_str::<Room>(&raw) {
            Ok(room) => Ok(Some(room)),
            Err(e) => {
                tracing::warn!(room_id = %room_id, error = %e, "Corrupt room record");
                Ok(None)
            }
        }
    }

    /// Create and register a new room
    ///
    /// Names are trimmed and must not be empty; they need not be unique.
    pub async fn create_room(
        &self,
        name: &str,
        creator_user_id: &str,
        creator_nickname: &str,
    ) -> Result<Room, DomainError> {
        let room = Room::new(name, Sender::new(creator_user_id, creator_nickname))?;
        let record = serde_json::to_string(&room).map_err(lingo_core::StorageError::from)?;

        // Record before index, so the index never names a room that was never written
        self.store.set_string(&Self::room_key(&room.id), &record).await?;
        self.store.set_add(ROOM_INDEX_KEY, &room.id).await?;

        tracing::info!(
            room_id = %room.id,
            name = %room.name,
            created_by = %room.created_by.user_id,
            "Room created"
        );

        Ok(room)
    }

    /// Append a message to the head of a room's history, evicting the oldest
    /// entries beyond capacity
    ///
    /// The room is not required to exist.
    pub async fn append_message(&self, room_id: &str, message: &Message) -> StorageResult<()> {
        let record = serde_json::to_string(message)?;
        self.store
            .list_push_front_capped(&Self::history_key(room_id), &record, self.capacity)
            .await?;

        tracing::debug!(room_id = %room_id, message_id = %message.id, "Message appended");
        Ok(())
    }

    /// The newest `limit` messages of a room, oldest first
    pub async fn get_messages(&self, room_id: &str, limit: usize) -> StorageResult<Vec<Message>> {
        if limit == 0 {
            return Ok(Vec::new());
        }

        let stop = isize::try_from(limit).unwrap_or(isize::MAX) - 1;
        let raw = self
            .store
            .list_range(&Self::history_key(room_id), 0, stop)
            .await?;

        // Stored newest first
        let messages = raw
            .iter()
            .rev()
            .filter_map(|record| match serde_json::from_str::<Message>(record) {
                Ok(message) => Some(message),
                Err(e) => {
                    tracing::warn!(room_id = %room_id, error = %e, "Skipping corrupt message record");
                    None
                }
            })
            .collect();

        Ok(messages)
    }
}

impl std::fmt::Debug for RoomStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoomStore")
            .field("capacity", &self.capacity)
            .finish_non_exhaustive()
    }
}
