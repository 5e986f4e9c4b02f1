//! End-to-end tests over real WebSocket connections.
//!
//! Each test serves the router on an ephemeral port and connects clients
//! with tokio-tungstenite.

use std::{net::SocketAddr, time::Duration};

use futures_util::{SinkExt, StreamExt};
use hiroba_server::{
    config::HubConfig, domain::DeliveryPolicy, room::spawn_room, ui::build_router,
};
use tokio::net::{TcpListener, TcpStream};
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async, tungstenite::Message};

type Client = WebSocketStream<MaybeTlsStream<TcpStream>>;

const WAIT: Duration = Duration::from_secs(2);

/// Start a hub on an ephemeral port and return its address
async fn start_server(config: HubConfig) -> SocketAddr {
    let room = spawn_room(config.delivery_policy());
    let app = build_router(room, config);
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

async fn connect(addr: SocketAddr) -> Client {
    let (ws, _response) = connect_async(format!("ws://{}/ws", addr)).await.unwrap();
    ws
}

async fn member_count(addr: SocketAddr) -> u64 {
    let body: serde_json::Value = reqwest::get(format!("http://{}/api/room", addr))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    body["member_count"].as_u64().unwrap()
}

/// Poll the room API until it reports `expected` members
async fn wait_for_members(addr: SocketAddr, expected: u64) {
    let start = std::time::Instant::now();
    loop {
        if member_count(addr).await == expected {
            return;
        }
        if start.elapsed() > WAIT {
            panic!("room never reached {} member(s)", expected);
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
}

/// Next text frame, skipping control frames
async fn next_text(client: &mut Client) -> String {
    loop {
        let frame = tokio::time::timeout(WAIT, client.next())
            .await
            .expect("timed out waiting for a frame")
            .expect("stream ended")
            .expect("read error");
        match frame {
            Message::Text(text) => return text.to_string(),
            Message::Ping(_) | Message::Pong(_) => continue,
            other => panic!("unexpected frame: {:?}", other),
        }
    }
}

#[tokio::test]
async fn test_health_check() {
    // テスト項目: ヘルスチェックが ok を返す
    // given (前提条件):
    let addr = start_server(HubConfig::default()).await;

    // when (操作):
    let body: serde_json::Value = reqwest::get(format!("http://{}/api/health", addr))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    // then (期待する結果):
    assert_eq!(body, serde_json::json!({"status": "ok"}));
}

#[tokio::test]
async fn test_message_is_broadcast_to_every_member() {
    // テスト項目: A の送信した "hi" が B, C に届き、デフォルトでは A にもエコーされる
    // given (前提条件):
    let addr = start_server(HubConfig::default()).await;
    let mut a = connect(addr).await;
    let mut b = connect(addr).await;
    let mut c = connect(addr).await;
    wait_for_members(addr, 3).await;

    // when (操作):
    a.send(Message::text("hi")).await.unwrap();

    // then (期待する結果):
    assert_eq!(next_text(&mut b).await, "hi");
    assert_eq!(next_text(&mut c).await, "hi");
    assert_eq!(next_text(&mut a).await, "hi");
}

#[tokio::test]
async fn test_exclude_sender_does_not_echo() {
    // テスト項目: --exclude-sender 相当の設定では送信者にエコーされない
    // given (前提条件):
    let config = HubConfig::new(1024, 8, DeliveryPolicy::ExcludeSender).unwrap();
    let addr = start_server(config).await;
    let mut a = connect(addr).await;
    let mut b = connect(addr).await;
    wait_for_members(addr, 2).await;

    // when (操作):
    a.send(Message::text("hi")).await.unwrap();
    b.send(Message::text("hello")).await.unwrap();

    // then (期待する結果):
    // A が最初に受け取るのは自分の "hi" ではなく B の "hello"
    assert_eq!(next_text(&mut b).await, "hi");
    assert_eq!(next_text(&mut a).await, "hello");
}

#[tokio::test]
async fn test_messages_arrive_in_order() {
    // テスト項目: 同じ送信者のメッセージは送信順に届く
    // given (前提条件):
    let addr = start_server(HubConfig::default()).await;
    let mut a = connect(addr).await;
    let mut b = connect(addr).await;
    wait_for_members(addr, 2).await;

    // when (操作):
    for i in 0..10 {
        a.send(Message::text(format!("message {i}"))).await.unwrap();
    }

    // then (期待する結果):
    for i in 0..10 {
        assert_eq!(next_text(&mut b).await, format!("message {i}"));
    }
}

#[tokio::test]
async fn test_disconnected_client_leaves_room() {
    // テスト項目: C が切断すると C は退室し、A と B は通信を続けられる
    // given (前提条件):
    let config = HubConfig::new(1024, 8, DeliveryPolicy::ExcludeSender).unwrap();
    let addr = start_server(config).await;
    let mut a = connect(addr).await;
    let mut b = connect(addr).await;
    let mut c = connect(addr).await;
    wait_for_members(addr, 3).await;

    // when (操作):
    c.close(None).await.unwrap();
    wait_for_members(addr, 2).await;
    a.send(Message::text("still here?")).await.unwrap();

    // then (期待する結果):
    assert_eq!(next_text(&mut b).await, "still here?");
}

#[tokio::test]
async fn test_binary_frames_are_forwarded_verbatim() {
    // テスト項目: バイナリフレームもそのまま転送される
    // given (前提条件):
    let config = HubConfig::new(1024, 8, DeliveryPolicy::ExcludeSender).unwrap();
    let addr = start_server(config).await;
    let mut a = connect(addr).await;
    let mut b = connect(addr).await;
    wait_for_members(addr, 2).await;

    // when (操作):
    a.send(Message::binary(vec![0u8, 159, 146, 150])).await.unwrap();

    // then (期待する結果):
    let frame = tokio::time::timeout(WAIT, b.next())
        .await
        .unwrap()
        .unwrap()
        .unwrap();
    assert_eq!(frame, Message::binary(vec![0u8, 159, 146, 150]));
}

#[tokio::test]
async fn test_invalid_upgrade_is_rejected_without_joining() {
    // テスト項目: WebSocket のハンドシェイクでない要求は拒否され、ルームに影響しない
    // given (前提条件):
    let addr = start_server(HubConfig::default()).await;

    // when (操作):
    let response = reqwest::get(format!("http://{}/ws", addr)).await.unwrap();

    // then (期待する結果):
    assert!(response.status().is_client_error());
    assert_eq!(member_count(addr).await, 0);
}
