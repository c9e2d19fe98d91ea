//! Gateway state
//!
//! Application state for the gateway server.

use crate::connection::ConnectionManager;
use crate::session::SessionRegistry;
use lingo_cache::RoomStore;
use lingo_common::AppConfig;
use lingo_translate::TranslationPipeline;
use std::sync::Arc;

/// Gateway application state
///
/// Holds all shared dependencies for the gateway server. Cheap to clone.
#[derive(Clone)]
pub struct GatewayState {
    /// Room registry and message history
    room_store: RoomStore,
    /// Per-language rendering of chat lines
    pipeline: TranslationPipeline,
    /// Identity and current room per connection
    sessions: Arc<SessionRegistry>,
    /// Connection manager for WebSocket connections
    connection_manager: Arc<ConnectionManager>,
    /// Application configuration
    config: Arc<AppConfig>,
}

impl GatewayState {
    /// Create a new gateway state with empty session and connection tables
    pub fn new(config: AppConfig, room_store: RoomStore, pipeline: TranslationPipeline) -> Self {
        Self {
            room_store,
            pipeline,
            sessions: Arc::new(SessionRegistry::new()),
            connection_manager: ConnectionManager::new_shared(),
            config: Arc::new(config),
        }
    }

    pub fn room_store(&self) -> &RoomStore {
        &self.room_store
    }

    pub fn pipeline(&self) -> &TranslationPipeline {
        &self.pipeline
    }

    pub fn sessions(&self) -> &SessionRegistry {
        &self.sessions
    }

    /// Get the connection manager
    pub fn connection_manager(&self) -> &ConnectionManager {
        &self.connection_manager
    }

    /// Get the application configuration
    pub fn config(&self) -> &AppConfig {
        &self.config
    }
}

impl std::fmt::Debug for GatewayState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayState")
            .field("room_store", &self.room_store)
            .field("sessions", &self.sessions.len())
            .field("connection_manager", &self.connection_manager)
            .field("config", &"AppConfig")
            .finish()
    }
}
