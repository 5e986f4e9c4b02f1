//! HTTP API response bodies.

use serde::Serialize;

use crate::room::RoomSnapshot;

/// `GET /api/health`
#[derive(Debug, Serialize)]
pub struct HealthDto {
    pub status: &'static str,
}

/// `GET /api/room`
#[derive(Debug, Serialize)]
pub struct RoomStateDto {
    pub member_count: usize,
    pub members: Vec<String>,
}

impl From<RoomSnapshot> for RoomStateDto {
    fn from(snapshot: RoomSnapshot) -> Self {
        Self {
            member_count: snapshot.member_count(),
            members: snapshot.members().iter().map(|id| id.to_string()).collect(),
        }
    }
}
