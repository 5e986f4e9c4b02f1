//! Commands accepted by the room coordinator.

use tokio::sync::{mpsc, oneshot};

use crate::domain::{ClientId, Message};

/// Input of the coordinator loop.
///
/// Join, leave and forward are the three logical input streams of the room.
/// They share one FIFO channel so events submitted by one producer are
/// applied in the order they were submitted.
#[derive(Debug)]
pub(crate) enum RoomCommand {
    Join {
        client_id: ClientId,
        outbound: mpsc::Sender<Message>,
    },
    Leave {
        client_id: ClientId,
    },
    Forward {
        from: ClientId,
        message: Message,
    },
    Snapshot {
        reply: oneshot::Sender<RoomSnapshot>,
    },
}

/// Membership as of one point in the coordinator's processing order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoomSnapshot {
    members: Vec<ClientId>,
}

impl RoomSnapshot {
    /// Build a snapshot; members are sorted for stable output.
    pub(crate) fn new(mut members: Vec<ClientId>) -> Self {
        members.sort();
        Self { members }
    }

    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    pub fn members(&self) -> &[ClientId] {
        &self.members
    }

    pub fn contains(&self, client_id: &ClientId) -> bool {
        self.members.binary_search(client_id).is_ok()
    }
}
