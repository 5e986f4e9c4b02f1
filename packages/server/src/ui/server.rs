//! Server execution logic.

use std::sync::Arc;

use axum::{Router, routing::get};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::{config::HubConfig, room::RoomHandle};

use super::{
    handler::{get_room_state, health_check, websocket_handler},
    signal::shutdown_signal,
    state::AppState,
};

/// Build the application router.
///
/// - `GET /ws`: WebSocket endpoint, every frame is broadcast to the room
/// - `GET /api/health`: liveness
/// - `GET /api/room`: current membership
pub fn build_router(room: RoomHandle, config: HubConfig) -> Router {
    let app_state = Arc::new(AppState { room, config });

    Router::new()
        // WebSocket エンドポイント
        .route("/ws", get(websocket_handler))
        // HTTP エンドポイント
        .route("/api/health", get(health_check))
        .route("/api/room", get(get_room_state))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

/// Broadcast hub server
///
/// # Example
///
/// ```ignore
/// let config = HubConfig::default();
/// let room = spawn_room(config.delivery_policy());
/// Server::new(room, config).run("127.0.0.1".to_string(), 8080).await?;
/// ```
pub struct Server {
    room: RoomHandle,
    config: HubConfig,
}

impl Server {
    pub fn new(room: RoomHandle, config: HubConfig) -> Self {
        Self { room, config }
    }

    /// Bind to `host:port` and serve until Ctrl+C or SIGTERM.
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address or
    /// if there's an error during server execution.
    pub async fn run(self, host: String, port: u16) -> Result<(), Box<dyn std::error::Error>> {
        let bind_addr = format!("{}:{}", host, port);
        let listener = TcpListener::bind(&bind_addr).await?;

        tracing::info!("Broadcast hub listening on {}", listener.local_addr()?);
        tracing::info!("Connect to: ws://{}/ws", bind_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        axum::serve(listener, build_router(self.room, self.config))
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}
