//! Concrete implementations of the `FrameReader` / `FrameWriter` seams.
//!
//! - `websocket`: axum WebSocket binding

pub mod websocket;

pub use websocket::{WebSocketReader, WebSocketWriter, split};
