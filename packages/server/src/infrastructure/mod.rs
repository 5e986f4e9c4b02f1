//! Infrastructure layer: concrete transports and wire-facing data types.

pub mod dto;
pub mod transport;
