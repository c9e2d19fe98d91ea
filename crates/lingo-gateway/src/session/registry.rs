//! In-process session registry keyed by connection id.

use dashmap::DashMap;
use serde::Serialize;

/// Nickname for connections that do not claim one
pub const DEFAULT_NICKNAME: &str = "anonymous";

/// Live state of one connection
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Session {
    pub connection_id: String,
    /// Claimed at connect, or the connection id when none was given
    pub user_id: String,
    pub nickname: String,
    /// At most one room at a time
    pub room_id: Option<String>,
}

impl Session {
    /// Build a session from optional identity claims
    ///
    /// Claims that are absent or blank after trimming fall back to the
    /// defaults.
    pub fn from_claims(connection_id: &str, user_id: Option<&str>, nickname: Option<&str>) -> Self {
        let claim = |value: Option<&str>| {
            value
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };

        Self {
            connection_id: connection_id.to_string(),
            user_id: claim(user_id).unwrap_or_else(|| connection_id.to_string()),
            nickname: claim(nickname).unwrap_or_else(|| DEFAULT_NICKNAME.to_string()),
            room_id: None,
        }
    }
}

/// All live sessions
///
/// Only connect, disconnect and join mutate it, each keyed by the
/// connection that issued it.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: DashMap<String, Session>,
}

impl SessionRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a session for a new connection
    pub fn on_connect(
        &self,
        connection_id: &str,
        claimed_user_id: Option<&str>,
        claimed_nickname: Option<&str>,
    ) -> Session {
        let session = Session::from_claims(connection_id, claimed_user_id, claimed_nickname);
        self.sessions
            .insert(connection_id.to_string(), session.clone());

        tracing::debug!(
            connection_id = %connection_id,
            user_id = %session.user_id,
            nickname = %session.nickname,
            "Session registered"
        );

        session
    }

    /// Drop a session; unknown ids are ignored
    pub fn on_disconnect(&self, connection_id: &str) -> Option<Session> {
        self.sessions.remove(connection_id).map(|(_, session)| session)
    }

    pub fn get(&self, connection_id: &str) -> Option<Session> {
        self.sessions.get(connection_id).map(|s| s.clone())
    }

    /// Record the session's current room
    ///
    /// Returns `false` when no session exists for the connection.
    pub fn set_room(&self, connection_id: &str, room_id: &str) -> bool {
        match self.sessions.get_mut(connection_id) {
            Some(mut session) => {
                session.room_id = Some(room_id.to_string());
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
