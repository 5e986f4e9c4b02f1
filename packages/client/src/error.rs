//! Error types for the chat client.

use thiserror::Error;

/// Client-specific errors
#[derive(Debug, Error)]
pub enum ClientError {
    /// The WebSocket handshake failed
    #[error("Failed to connect to {url}: {reason}")]
    Connect { url: String, reason: String },

    /// The connection broke while chatting
    #[error("Connection lost: {0}")]
    ConnectionLost(String),

    /// The line editor could not be started
    #[error("Failed to initialize readline: {0}")]
    Readline(String),
}
