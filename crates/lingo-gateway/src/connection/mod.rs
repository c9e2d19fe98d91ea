//! Connection management
//!
//! Live WebSocket connections, their outbound queues and transport-level
//! room membership.

mod connection;
mod manager;

pub use connection::{Connection, SendError};
pub use manager::ConnectionManager;
