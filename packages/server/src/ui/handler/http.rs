//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode};

use crate::{
    infrastructure::dto::http::{HealthDto, RoomStateDto},
    ui::state::AppState,
};

/// Health check endpoint
pub async fn health_check() -> Json<HealthDto> {
    Json(HealthDto { status: "ok" })
}

/// Current room membership
pub async fn get_room_state(
    State(state): State<Arc<AppState>>,
) -> Result<Json<RoomStateDto>, StatusCode> {
    match state.room.snapshot().await {
        Ok(snapshot) => Ok(Json(snapshot.into())),
        Err(e) => {
            tracing::error!("Failed to read room state: {}", e);
            Err(StatusCode::SERVICE_UNAVAILABLE)
        }
    }
}
