//! HTTP API request/response DTOs.

use serde::{Deserialize, Serialize};

use super::room::{RoomSnapshotDto, SessionKindDto};

/// `POST /api/rooms` body
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRoomRequest {
    #[serde(default)]
    pub creator_name: Option<String>,
}

/// `POST /api/rooms` response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRoomResponse {
    pub room_id: String,
    pub room: RoomSnapshotDto,
}

/// `GET /api/rooms/{room_id}` response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomResponse {
    pub room: RoomSnapshotDto,
}

/// Element of `GET /api/rooms`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomSummaryDto {
    pub id: String,
    pub creator: String,
    pub participant_count: usize,
    pub is_running: bool,
    pub current_session: SessionKindDto,
    /// RFC 3339 (JST)
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
