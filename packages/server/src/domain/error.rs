//! Error types for the broadcast hub.

use thiserror::Error;

/// Failure of one client's transport. Always local to that client.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// Reading the next frame failed (disconnect, protocol error)
    #[error("failed to receive frame: {0}")]
    Receive(String),

    /// Writing a frame failed
    #[error("failed to send frame: {0}")]
    Send(String),

    /// A text message whose payload is not valid UTF-8
    #[error("text message payload is not valid UTF-8")]
    InvalidText,
}

/// Room coordinator errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoomError {
    /// The coordinator loop is no longer running
    #[error("room coordinator is not running")]
    Closed,
}

/// Invalid hub configuration
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("outbound queue capacity must be at least 1")]
    ZeroQueueCapacity,

    #[error("socket buffer size must be at least 1 byte")]
    ZeroSocketBufferSize,
}
