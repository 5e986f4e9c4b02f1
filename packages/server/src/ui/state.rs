//! Server state shared with the handlers.

use crate::{config::HubConfig, room::RoomHandle};

/// Shared application state
pub struct AppState {
    /// Handle to the room coordinator
    pub room: RoomHandle,
    /// Per-connection settings (buffer sizes, queue capacity)
    pub config: HubConfig,
}
