//! Cloneable handle to the room coordinator.

use tokio::sync::{mpsc, oneshot};

use crate::domain::{ClientId, Message, RoomError};

use super::command::{RoomCommand, RoomSnapshot};

/// Non-owning access to a running [`Room`](super::Room).
///
/// `join`, `leave` and `broadcast` are fire-and-forget: they enqueue a
/// command and return immediately without awaiting, so they are safe to call
/// from `Drop`. If the coordinator has stopped, the command is dropped.
#[derive(Debug, Clone)]
pub struct RoomHandle {
    commands: mpsc::UnboundedSender<RoomCommand>,
}

impl RoomHandle {
    pub(crate) fn new(commands: mpsc::UnboundedSender<RoomCommand>) -> Self {
        Self { commands }
    }

    /// Register `client_id` as a member whose outbound queue is `outbound`.
    ///
    /// The room becomes the only producer of that queue. Joining an id that is
    /// already a member keeps the existing registration and drops `outbound`.
    pub fn join(&self, client_id: ClientId, outbound: mpsc::Sender<Message>) {
        self.submit(RoomCommand::Join {
            client_id,
            outbound,
        });
    }

    /// Remove `client_id` and close its outbound queue. Idempotent.
    pub fn leave(&self, client_id: ClientId) {
        self.submit(RoomCommand::Leave { client_id });
    }

    /// Deliver `message` from `from` to every member, per the room's policy.
    pub fn broadcast(&self, from: ClientId, message: Message) {
        self.submit(RoomCommand::Forward { from, message });
    }

    /// Current membership, as seen by the coordinator after every command
    /// submitted before this call.
    ///
    /// # Errors
    ///
    /// Returns `RoomError::Closed` if the coordinator is not running.
    pub async fn snapshot(&self) -> Result<RoomSnapshot, RoomError> {
        let (reply, response) = oneshot::channel();
        self.commands
            .send(RoomCommand::Snapshot { reply })
            .map_err(|_| RoomError::Closed)?;
        response.await.map_err(|_| RoomError::Closed)
    }

    /// Returns `true` once the coordinator loop has stopped.
    pub fn is_closed(&self) -> bool {
        self.commands.is_closed()
    }

    fn submit(&self, command: RoomCommand) {
        if let Err(mpsc::error::SendError(command)) = self.commands.send(command) {
            tracing::debug!("Room coordinator stopped, dropping {:?}", command);
        }
    }
}
