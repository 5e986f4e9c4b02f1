//! Single-room WebSocket broadcast hub.
//!
//! Every frame received from any connected endpoint is forwarded to the
//! connected endpoints through one shared room. The room coordinator owns the
//! membership exclusively; each connection is bridged to it by a read/write
//! pump pair.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;

// core
pub mod pump;
pub mod room;

pub mod config;
