//! # lingo-cache
//!
//! Storage layer for rooms and message history.
//!
//! ## Features
//!
//! - **Connection Pool**: Managed Redis connection pool with deadpool
//! - **Key-Value Adapters**: `RedisStore` and the process-local `MemoryStore`,
//!   both implementing `lingo_core::KeyValueStore`
//! - **Room Store**: Room registry plus bounded, newest-first message history
//!
//! ## Example
//!
//! ```ignore
//! use lingo_cache::{RedisPool, RedisPoolConfig, RedisStore, RoomStore};
//!
//! let pool = RedisPool::new(RedisPoolConfig {
//!     url: "redis://127.0.0.1:6379".to_string(),
//!     max_connections: 16,
//! })?;
//! let rooms = RoomStore::new(Arc::new(RedisStore::new(pool)), 200);
//!
//! let room = rooms.create_room("general", "u1", "alice").await?;
//! let history = rooms.get_messages(&room.id, 50).await?;
//! ```

pub mod pool;
pub mod rooms;
pub mod store;

// Re-export pool types
pub use pool::{RedisPool, RedisPoolConfig, RedisPoolError, RedisResult};

// Re-export store types
pub use store::{MemoryStore, RedisStore};

// Re-export room types
pub use rooms::RoomStore;
