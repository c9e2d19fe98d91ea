//! Individual WebSocket connection

use crate::events::GatewayEventType;
use crate::protocol::GatewayMessage;
use parking_lot::{Mutex, RwLock};
use serde_json::Value;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

/// Outbound queue rejected a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SendError {
    #[error("outbound queue is full")]
    Full,
    #[error("connection is closed")]
    Closed,
}

impl<T> From<mpsc::error::TrySendError<T>> for SendError {
    fn from(err: mpsc::error::TrySendError<T>) -> Self {
        match err {
            mpsc::error::TrySendError::Full(_) => Self::Full,
            mpsc::error::TrySendError::Closed(_) => Self::Closed,
        }
    }
}

/// A single WebSocket connection
///
/// Outbound messages are queued without waiting; the socket's send task
/// drains the queue. Dispatches get their sequence number and enter the
/// queue under one lock, so `s` is strictly increasing on the wire.
pub struct Connection {
    /// Unique connection ID
    connection_id: String,

    /// Channel to send messages to the WebSocket
    sender: mpsc::Sender<GatewayMessage>,

    /// Last sequence number sent
    sequence: AtomicU64,

    /// Serializes sequence assignment with enqueueing
    dispatch_lock: Mutex<()>,

    /// Last frame received from the client
    last_activity: RwLock<Instant>,

    /// Room this connection receives multicasts for
    room: RwLock<Option<String>>,
}

impl Connection {
    /// Create a new connection
    pub fn new(connection_id: String, sender: mpsc::Sender<GatewayMessage>) -> Arc<Self> {
        Arc::new(Self {
            connection_id,
            sender,
            sequence: AtomicU64::new(0),
            dispatch_lock: Mutex::new(()),
            last_activity: RwLock::new(Instant::now()),
            room: RwLock::new(None),
        })
    }

    pub fn connection_id(&self) -> &str {
        &self.connection_id
    }

    /// Get the current sequence number
    pub fn current_sequence(&self) -> u64 {
        self.sequence.load(Ordering::SeqCst)
    }

    /// Queue a dispatch event, returning its sequence number
    pub fn dispatch(&self, event: GatewayEventType, data: Value) -> Result<u64, SendError> {
        let _guard = self.dispatch_lock.lock();
        let seq = self.sequence.fetch_add(1, Ordering::SeqCst) + 1;
        self.sender
            .try_send(GatewayMessage::dispatch(event.as_str(), seq, data))?;
        Ok(seq)
    }

    /// Queue a control message (no sequence number)
    pub fn send(&self, message: GatewayMessage) -> Result<(), SendError> {
        self.sender.try_send(message)?;
        Ok(())
    }

    /// Record inbound traffic
    pub fn touch(&self) {
        *self.last_activity.write() = Instant::now();
    }

    /// Time since the client last sent anything
    pub fn idle_for(&self) -> Duration {
        self.last_activity.read().elapsed()
    }

    /// Replace the room membership, returning the previous room
    pub(crate) fn set_room(&self, room_id: Option<String>) -> Option<String> {
        std::mem::replace(&mut *self.room.write(), room_id)
    }
}

impl std::fmt::Debug for Connection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Connection")
            .field("connection_id", &self.connection_id)
            .field("sequence", &self.sequence.load(Ordering::SeqCst))
            .field("room", &*self.room.read())
            .finish()
    }
}
