//! Session registry
//!
//! Identity and current room of every live connection.

mod registry;

pub use registry::{Session, SessionRegistry, DEFAULT_NICKNAME};
