//! Room entity - a named chat channel

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::Sender;
use crate::error::DomainError;
use crate::value_objects::generate_room_id;

/// Room entity
///
/// Rooms are created once and never updated or deleted. Names are not unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub created_by: Sender,
}

impl Room {
    /// Create a new room with a freshly generated id
    ///
    /// The name is trimmed; an empty name is rejected.
    pub fn new(name: &str, created_by: Sender) -> Result<Self, DomainError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DomainError::EmptyRoomName);
        }

        Ok(Self {
            id: generate_room_id(),
            name: name.to_string(),
            created_at: Utc::now(),
            created_by,
        })
    }
}
