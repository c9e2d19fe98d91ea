//! Integration test utilities for the lingo gateway
//!
//! This crate provides helpers for driving the gateway coordinator
//! in-process and for end-to-end tests against a live WebSocket server.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
