//! Transport seams used by the connection pump.
//!
//! A connection is split into a reading half and a writing half so the two
//! loops can run as independent tasks. The WebSocket binding lives in
//! `infrastructure::transport`.

use async_trait::async_trait;

use super::{Message, TransportError};

/// Reading half of a full-duplex frame transport.
#[async_trait]
pub trait FrameReader: Send {
    /// Wait for the next data frame.
    ///
    /// Returns `None` once the peer has closed the connection. Control frames
    /// are consumed by the implementation and never surface here.
    async fn next_frame(&mut self) -> Option<Result<Message, TransportError>>;
}

/// Writing half of a full-duplex frame transport.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FrameWriter: Send {
    /// Write one frame, preserving the message kind.
    async fn write_frame(&mut self, message: Message) -> Result<(), TransportError>;

    /// Close the transport. Failures are logged, not returned.
    async fn close(&mut self);
}
