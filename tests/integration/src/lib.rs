//! Integration test utilities for the presence board
//!
//! Spawns the real router on an ephemeral port and drives it over HTTP and
//! WebSocket.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
