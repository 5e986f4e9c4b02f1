//! Domain layer of the broadcast hub.
//!
//! Identities, opaque messages, the delivery policy and the transport seams
//! the connection pump is written against. Concrete transports live in the
//! infrastructure layer.

mod client_id;
mod error;
mod message;
mod policy;
mod transport;

pub use client_id::ClientId;
pub use error::{ConfigError, RoomError, TransportError};
pub use message::{Message, MessageKind};
pub use policy::DeliveryPolicy;
pub use transport::{FrameReader, FrameWriter};

#[cfg(test)]
pub use transport::MockFrameWriter;
