//! UseCase: ルーム情報の取得（HTTP API 用）

use std::sync::Arc;

use shuchu_shared::time::Clock;

use crate::domain::{Room, RoomRepository, Timestamp};

use super::{error::RoomLookupError, parse_room_id};

/// Snapshot of one room with its remaining time computed at the current instant
pub struct GetRoomUseCase {
    repository: Arc<dyn RoomRepository>,
    clock: Arc<dyn Clock>,
}

impl GetRoomUseCase {
    pub fn new(repository: Arc<dyn RoomRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    pub async fn execute(&self, room_id: &str) -> Result<Room, RoomLookupError> {
        let not_found = || RoomLookupError::RoomNotFound(room_id.to_string());
        let id = parse_room_id(room_id).ok_or_else(not_found)?;
        let mut room = self
            .repository
            .get_room(&id)
            .await
            .map_err(|_| not_found())?;
        room.timer.refresh(Timestamp::new(self.clock.now_millis()));
        Ok(room)
    }
}

/// All live rooms, ordered by creation time
pub struct GetRoomsUseCase {
    repository: Arc<dyn RoomRepository>,
}

impl GetRoomsUseCase {
    pub fn new(repository: Arc<dyn RoomRepository>) -> Self {
        Self { repository }
    }

    pub async fn execute(&self) -> Vec<Room> {
        let mut rooms = self.repository.get_rooms().await;
        rooms.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.id.as_str().cmp(b.id.as_str()))
        });
        rooms
    }
}
