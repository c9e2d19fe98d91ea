//! # lingo-gateway
//!
//! WebSocket gateway for room-scoped, auto-translated chat.
//!
//! Clients connect to `/gateway`, receive `Hello`, then issue commands
//! (`LIST_ROOMS`, `CREATE_ROOM`, `JOIN_ROOM`, `SEND_MESSAGE`) and receive
//! dispatch events. Every chat line is stored and delivered with a rendering
//! for each supported language.

pub mod connection;
pub mod events;
pub mod handlers;
pub mod protocol;
pub mod server;
pub mod session;

pub use server::{create_app, create_gateway_state, run, run_server, GatewayState};
