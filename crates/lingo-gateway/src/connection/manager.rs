//! Connection manager
//!
//! Manages all active WebSocket connections using DashMap for thread-safe access.

use super::Connection;
use crate::events::GatewayEventType;
use dashmap::DashMap;
use serde_json::Value;
use std::collections::HashSet;
use std::sync::Arc;

/// Manages all active WebSocket connections
///
/// A connection is a member of at most one room. Multicast targets the
/// members at the moment of sending.
pub struct ConnectionManager {
    /// Active connections by connection ID
    connections: DashMap<String, Arc<Connection>>,

    /// Room ID to connection IDs mapping
    room_connections: DashMap<String, HashSet<String>>,
}

impl ConnectionManager {
    #[must_use]
    pub fn new() -> Self {
        Self {
            connections: DashMap::new(),
            room_connections: DashMap::new(),
        }
    }

    /// Create a new connection manager wrapped in Arc
    #[must_use]
    pub fn new_shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Register a connection for room multicast and broadcasts
    pub fn add_connection(&self, connection: Arc<Connection>) {
        let connection_id = connection.connection_id().to_string();
        self.connections.insert(connection_id.clone(), connection);

        tracing::debug!(
            connection_id = %connection_id,
            connections = self.connections.len(),
            "Connection added"
        );
    }

    /// Remove a connection and its room membership
    pub fn remove_connection(&self, connection_id: &str) {
        if let Some((_, connection)) = self.connections.remove(connection_id) {
            if let Some(room_id) = connection.set_room(None) {
                self.detach(&room_id, connection_id);
            }

            tracing::debug!(
                connection_id = %connection_id,
                connections = self.connections.len(),
                rooms = self.room_connections.len(),
                "Connection removed"
            );
        }
    }

    /// Get a connection by ID
    pub fn get_connection(&self, connection_id: &str) -> Option<Arc<Connection>> {
        self.connections.get(connection_id).map(|r| r.clone())
    }

    /// Move a connection into `room_id`, leaving its previous room first
    ///
    /// Returns the room that was left, if any. Unknown connections are ignored.
    pub fn join_room(&self, connection_id: &str, room_id: &str) -> Option<String> {
        let connection = self.get_connection(connection_id)?;

        let previous = connection.set_room(Some(room_id.to_string()));
        if let Some(previous) = &previous {
            self.detach(previous, connection_id);
        }

        self.room_connections
            .entry(room_id.to_string())
            .or_default()
            .insert(connection_id.to_string());

        tracing::trace!(
            connection_id = %connection_id,
            room_id = %room_id,
            left = ?previous,
            "Connection joined room"
        );

        previous
    }

    /// Drop `connection_id` from a room's member set, removing the set once empty
    ///
    /// Uses `alter` + `retain` so the empty-set cleanup is atomic per shard.
    fn detach(&self, room_id: &str, connection_id: &str) {
        self.room_connections.alter(room_id, |_, mut members| {
            members.remove(connection_id);
            members
        });
        self.room_connections.retain(|_, members| !members.is_empty());
    }

    /// Get all connections that are members of a room
    pub fn get_room_connections(&self, room_id: &str) -> Vec<Arc<Connection>> {
        self.room_connections
            .get(room_id)
            .map(|members| {
                members
                    .iter()
                    .filter_map(|cid| self.connections.get(cid).map(|c| c.clone()))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Dispatch an event to every member of a room
    pub fn send_to_room(&self, room_id: &str, event: GatewayEventType, data: &Value) -> usize {
        let sent = Self::dispatch_all(self.get_room_connections(room_id), event, data);

        tracing::trace!(room_id = %room_id, event = %event, sent = sent, "Event sent to room");

        sent
    }

    /// Dispatch an event to every connection
    pub fn broadcast(&self, event: GatewayEventType, data: &Value) -> usize {
        let connections: Vec<Arc<Connection>> =
            self.connections.iter().map(|r| r.value().clone()).collect();
        let sent = Self::dispatch_all(connections, event, data);

        tracing::debug!(event = %event, sent = sent, "Event broadcast to all connections");

        sent
    }

    fn dispatch_all(connections: Vec<Arc<Connection>>, event: GatewayEventType, data: &Value) -> usize {
        let mut sent = 0;

        for conn in connections {
            match conn.dispatch(event, data.clone()) {
                Ok(_) => sent += 1,
                Err(e) => tracing::warn!(
                    connection_id = %conn.connection_id(),
                    event = %event,
                    error = %e,
                    "Failed to dispatch event"
                ),
            }
        }

        sent
    }

    /// Get the total number of active connections
    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    /// Get the number of rooms with at least one member
    pub fn room_count(&self) -> usize {
        self.room_connections.len()
    }
}

impl Default for ConnectionManager {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ConnectionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionManager")
            .field("connections", &self.connections.len())
            .field("rooms", &self.room_connections.len())
            .finish()
    }
}
