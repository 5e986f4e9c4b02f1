//! WebSocket upgrade handler: the boundary between HTTP and the hub.

use std::sync::Arc;

use axum::{
    extract::{State, ws::WebSocket, ws::WebSocketUpgrade},
    response::IntoResponse,
};

use crate::{
    domain::ClientId, infrastructure::transport::websocket, pump::run_connection,
    ui::state::AppState,
};

/// Upgrade the request and hand the socket to the connection pump.
///
/// The client is created inside the upgrade callback, so a failed handshake
/// never touches the room.
pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let buffer_size = state.config.socket_buffer_size();

    ws.read_buffer_size(buffer_size)
        .write_buffer_size(buffer_size)
        .on_failed_upgrade(|e| tracing::warn!("WebSocket upgrade failed: {}", e))
        .on_upgrade(move |socket| handle_socket(socket, state))
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let client_id = ClientId::generate();
    tracing::info!("Client '{}' connected", client_id);

    let (reader, writer) = websocket::split(socket);
    let disconnect = run_connection(
        state.room.clone(),
        client_id,
        reader,
        writer,
        state.config.queue_capacity(),
    )
    .await;

    tracing::info!("Client '{}' disconnected: {}", client_id, disconnect);
}
