//! Room coordinator loop.

use std::collections::{HashMap, hash_map::Entry};

use tokio::sync::mpsc::{self, error::TrySendError};

use crate::domain::{ClientId, DeliveryPolicy, Message};

use super::{
    command::{RoomCommand, RoomSnapshot},
    handle::RoomHandle,
};

/// The broadcast domain.
///
/// Owns the membership map and is consumed by [`Room::run`]; all access
/// goes through the [`RoomHandle`] returned by [`Room::new`].
pub struct Room {
    /// Member id to the sending end of that member's outbound queue.
    /// Dropping the sender is what closes the queue.
    members: HashMap<ClientId, mpsc::Sender<Message>>,
    policy: DeliveryPolicy,
    commands: mpsc::UnboundedReceiver<RoomCommand>,
}

impl Room {
    pub fn new(policy: DeliveryPolicy) -> (Self, RoomHandle) {
        let (commands_tx, commands_rx) = mpsc::unbounded_channel();
        let room = Self {
            members: HashMap::new(),
            policy,
            commands: commands_rx,
        };
        (room, RoomHandle::new(commands_tx))
    }

    /// Run the coordinator loop until every handle is dropped.
    ///
    /// Suspends only while waiting for the next command. Membership updates
    /// and per-member enqueue attempts never await.
    pub async fn run(mut self) {
        tracing::info!("Room coordinator started (policy: {:?})", self.policy);

        while let Some(command) = self.commands.recv().await {
            self.handle_command(command);
        }

        tracing::info!(
            "Room coordinator stopped, releasing {} member(s)",
            self.members.len()
        );
    }

    fn handle_command(&mut self, command: RoomCommand) {
        match command {
            RoomCommand::Join {
                client_id,
                outbound,
            } => self.join(client_id, outbound),
            RoomCommand::Leave { client_id } => self.leave(&client_id),
            RoomCommand::Forward { from, message } => {
                self.forward(&from, &message);
            }
            RoomCommand::Snapshot { reply } => {
                // The requester may have given up waiting
                let _ = reply.send(self.snapshot());
            }
        }
    }

    fn join(&mut self, client_id: ClientId, outbound: mpsc::Sender<Message>) {
        match self.members.entry(client_id) {
            Entry::Occupied(_) => {
                tracing::debug!("Client '{}' is already a member, ignoring join", client_id);
            }
            Entry::Vacant(entry) => {
                entry.insert(outbound);
                tracing::info!(
                    "Client '{}' joined the room ({} member(s))",
                    client_id,
                    self.members.len()
                );
            }
        }
    }

    fn leave(&mut self, client_id: &ClientId) {
        if self.members.remove(client_id).is_some() {
            tracing::info!(
                "Client '{}' left the room ({} member(s))",
                client_id,
                self.members.len()
            );
        } else {
            tracing::debug!("Client '{}' is not a member, ignoring leave", client_id);
        }
    }

    /// Enqueue `message` onto every eligible member's outbound queue.
    ///
    /// A member whose queue is full or already closed is evicted: removals
    /// are collected during the pass and applied after it, which drops the
    /// member's sender and closes its queue. Returns the evicted ids.
    fn forward(&mut self, from: &ClientId, message: &Message) -> Vec<ClientId> {
        let mut delivered = 0usize;
        let mut evicted = Vec::new();

        for (member, outbound) in &self.members {
            if !self.policy.delivers_to(from, member) {
                continue;
            }
            match outbound.try_send(message.clone()) {
                Ok(()) => delivered += 1,
                Err(TrySendError::Full(_)) => {
                    tracing::warn!(
                        "Outbound queue of '{}' is full, evicting slow member",
                        member
                    );
                    evicted.push(*member);
                }
                Err(TrySendError::Closed(_)) => {
                    tracing::debug!("Outbound queue of '{}' is closed, evicting", member);
                    evicted.push(*member);
                }
            }
        }

        for member in &evicted {
            self.members.remove(member);
        }

        tracing::debug!(
            "Broadcast {} byte(s) from '{}': delivered to {}, evicted {}",
            message.len(),
            from,
            delivered,
            evicted.len()
        );

        evicted
    }

    fn snapshot(&self) -> RoomSnapshot {
        RoomSnapshot::new(self.members.keys().copied().collect())
    }
}
