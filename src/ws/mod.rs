//! WebSocket layer: pushes store changes to open pages so their event
//! lists re-fetch after admin edits instead of going stale.

pub mod connection;
pub mod handler;
pub mod messages;
