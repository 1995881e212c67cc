//! Presence and broadcast server for a single shared chat channel.
//!
//! Tracks which users are online and fans out join, leave and chat events to
//! every connected WebSocket client.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
