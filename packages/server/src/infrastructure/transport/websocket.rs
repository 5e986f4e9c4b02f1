//! axum WebSocket binding of the transport seams.
//!
//! One upgraded socket is split into a reading half and a writing half so the
//! read loop and write loop can own them independently.

use async_trait::async_trait;
use std::time::Duration;

use axum::extract::ws::{Message as WsMessage, Utf8Bytes, WebSocket};
use futures_util::{
    sink::SinkExt,
    stream::{SplitSink, SplitStream, StreamExt},
};

use crate::domain::{FrameReader, FrameWriter, Message, MessageKind, TransportError};

/// Upper bound on the closing handshake with a peer that stopped reading
const CLOSE_TIMEOUT: Duration = Duration::from_secs(1);

/// Reading half of an upgraded WebSocket.
pub struct WebSocketReader {
    stream: SplitStream<WebSocket>,
}

/// Writing half of an upgraded WebSocket.
pub struct WebSocketWriter {
    sink: SplitSink<WebSocket, WsMessage>,
}

/// Split an upgraded socket into its two halves.
pub fn split(socket: WebSocket) -> (WebSocketReader, WebSocketWriter) {
    let (sink, stream) = socket.split();
    (WebSocketReader { stream }, WebSocketWriter { sink })
}

/// Map one received WebSocket frame.
///
/// Payload buffers are handed over as they are. `None` means the frame carries no payload for the room (ping/pong),
/// `Some(None)` means the peer asked to close.
fn map_frame(frame: WsMessage) -> Option<Option<Message>> {
    match frame {
        WsMessage::Text(text) => Some(Some(Message::text(text))),
        WsMessage::Binary(data) => Some(Some(Message::binary(data))),
        // Ping/pong is handled automatically by the WebSocket protocol
        WsMessage::Ping(_) | WsMessage::Pong(_) => None,
        WsMessage::Close(frame) => {
            tracing::debug!("Peer sent close frame: {:?}", frame);
            Some(None)
        }
    }
}

#[async_trait]
impl FrameReader for WebSocketReader {
    async fn next_frame(&mut self) -> Option<Result<Message, TransportError>> {
        while let Some(frame) = self.stream.next().await {
            let frame = match frame {
                Ok(frame) => frame,
                Err(e) => return Some(Err(TransportError::Receive(e.to_string()))),
            };
            match map_frame(frame) {
                Some(Some(message)) => return Some(Ok(message)),
                Some(None) => return None,
                None => continue,
            }
        }
        None
    }
}

#[async_trait]
impl FrameWriter for WebSocketWriter {
    async fn write_frame(&mut self, message: Message) -> Result<(), TransportError> {
        let frame = match message.kind() {
            MessageKind::Text => {
                // Shares the payload buffer with every other member's copy
                let text = Utf8Bytes::try_from(message.into_payload())
                    .map_err(|_| TransportError::InvalidText)?;
                WsMessage::Text(text)
            }
            MessageKind::Binary => WsMessage::Binary(message.into_payload()),
        };
        self.sink
            .send(frame)
            .await
            .map_err(|e| TransportError::Send(e.to_string()))
    }

    async fn close(&mut self) {
        match tokio::time::timeout(CLOSE_TIMEOUT, self.sink.close()).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => tracing::debug!("Failed to close WebSocket: {}", e),
            Err(_) => tracing::debug!("Closing handshake timed out, dropping the socket"),
        }
    }
}
