//! Scoped room membership.

use tokio::sync::mpsc;

use crate::{
    domain::{ClientId, Message},
    room::RoomHandle,
};

/// Room membership held for the lifetime of one connection.
///
/// Joining happens on construction and leaving happens on drop, so the
/// client leaves the room on every exit path of the connection routine,
/// including early returns and panics.
#[derive(Debug)]
pub struct Membership {
    room: RoomHandle,
    client_id: ClientId,
}

impl Membership {
    /// Join `room` as `client_id`, handing the room the outbound queue sender.
    pub fn join(room: RoomHandle, client_id: ClientId, outbound: mpsc::Sender<Message>) -> Self {
        room.join(client_id, outbound);
        Self { room, client_id }
    }

    pub fn client_id(&self) -> ClientId {
        self.client_id
    }
}

impl Drop for Membership {
    fn drop(&mut self) {
        self.room.leave(self.client_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{domain::DeliveryPolicy, room::Room};

    #[tokio::test]
    async fn test_drop_leaves_room() {
        // テスト項目: Membership を破棄するとルームから退室し、キューが閉じる
        // given (前提条件):
        let (room, handle) = Room::new(DeliveryPolicy::EchoToSender);
        tokio::spawn(room.run());
        let (tx, mut rx) = mpsc::channel(1);
        let membership = Membership::join(handle.clone(), ClientId::generate(), tx);
        let client_id = membership.client_id();
        assert!(handle.snapshot().await.unwrap().contains(&client_id));

        // when (操作):
        drop(membership);

        // then (期待する結果):
        assert!(!handle.snapshot().await.unwrap().contains(&client_id));
        assert_eq!(rx.recv().await, None);
    }

    #[tokio::test]
    async fn test_leave_runs_when_scope_panics() {
        // テスト項目: 接続処理がパニックしても退室処理が実行される
        // given (前提条件):
        let (room, handle) = Room::new(DeliveryPolicy::EchoToSender);
        tokio::spawn(room.run());
        let client_id = ClientId::generate();
        let (tx, _rx) = mpsc::channel(1);
        let task_handle = handle.clone();

        // when (操作):
        let result = tokio::spawn(async move {
            let _membership = Membership::join(task_handle, client_id, tx);
            panic!("connection handler blew up");
        })
        .await;

        // then (期待する結果):
        assert!(result.is_err());
        assert_eq!(handle.snapshot().await.unwrap().member_count(), 0);
    }
}
