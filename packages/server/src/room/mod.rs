//! The room: membership and broadcast coordination.
//!
//! A single `Room` task owns the membership map. Everything else talks to it
//! through a cloneable [`RoomHandle`], whose calls are queued onto one FIFO
//! command channel and applied one at a time by the coordinator loop. No
//! other component ever touches the membership map, so it needs no lock.

mod command;
mod coordinator;
mod handle;

pub use command::RoomSnapshot;
pub use coordinator::Room;
pub use handle::RoomHandle;

use crate::domain::DeliveryPolicy;

/// Create a room and spawn its coordinator loop on the current runtime.
///
/// The loop runs until every handle has been dropped.
pub fn spawn_room(policy: DeliveryPolicy) -> RoomHandle {
    let (room, handle) = Room::new(policy);
    tokio::spawn(room.run());
    handle
}
