//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{
    Json,
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{
    infrastructure::dto::{
        http::{CreateRoomRequest, CreateRoomResponse, ErrorResponse, RoomResponse, RoomSummaryDto},
        room::RoomSnapshotDto,
    },
    ui::state::AppState,
    usecase::{CreateRoomError, ROOM_NOT_FOUND_REASON, RoomLookupError},
};

type ApiError = (StatusCode, Json<ErrorResponse>);

fn api_error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
}

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Create a room. The body is optional; `{}` or no body creates an anonymous room.
pub async fn create_room(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<(StatusCode, Json<CreateRoomResponse>), ApiError> {
    let request = if body.is_empty() {
        CreateRoomRequest::default()
    } else {
        serde_json::from_slice::<CreateRoomRequest>(&body).map_err(|e| {
            tracing::warn!("Invalid create-room body: {}", e);
            api_error(StatusCode::BAD_REQUEST, format!("Invalid request body: {e}"))
        })?
    };

    match state.create_room_usecase.execute(request.creator_name).await {
        Ok(room) => Ok((
            StatusCode::CREATED,
            Json(CreateRoomResponse {
                room_id: room.id.as_str().to_string(),
                room: RoomSnapshotDto::from(&room),
            }),
        )),
        Err(e @ CreateRoomError::InvalidName(_)) => {
            Err(api_error(StatusCode::BAD_REQUEST, e.to_string()))
        }
        Err(e) => {
            tracing::error!("Failed to create room: {}", e);
            Err(api_error(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))
        }
    }
}

/// Get list of rooms
pub async fn get_rooms(State(state): State<Arc<AppState>>) -> Json<Vec<RoomSummaryDto>> {
    let rooms = state.get_rooms_usecase.execute().await;
    Json(rooms.iter().map(RoomSummaryDto::from).collect())
}

/// Get one room snapshot by ID
pub async fn get_room(
    State(state): State<Arc<AppState>>,
    Path(room_id): Path<String>,
) -> Result<Json<RoomResponse>, ApiError> {
    match state.get_room_usecase.execute(&room_id).await {
        Ok(room) => Ok(Json(RoomResponse {
            room: RoomSnapshotDto::from(&room),
        })),
        Err(RoomLookupError::RoomNotFound(_)) => {
            Err(api_error(StatusCode::NOT_FOUND, ROOM_NOT_FOUND_REASON))
        }
    }
}
