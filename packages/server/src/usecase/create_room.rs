//! UseCase: ルーム作成
//!
//! 短いランダムなルームコードを払い出して空のルームを登録する。
//! コードが既存のルームと衝突した場合は作り直す。

use std::sync::Arc;

use shuchu_shared::time::Clock;

use crate::domain::{
    ParticipantName, RepositoryError, Room, RoomIdFactory, RoomRepository, Timestamp,
};

use super::error::CreateRoomError;

/// Number of room codes tried before giving up
pub const MAX_ROOM_ID_ATTEMPTS: usize = 8;

pub struct CreateRoomUseCase {
    repository: Arc<dyn RoomRepository>,
    clock: Arc<dyn Clock>,
}

impl CreateRoomUseCase {
    pub fn new(repository: Arc<dyn RoomRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    /// Create an empty room. A missing or blank creator name becomes `Anonymous`.
    pub async fn execute(&self, creator_name: Option<String>) -> Result<Room, CreateRoomError> {
        let creator =
            ParticipantName::from_optional(creator_name).map_err(CreateRoomError::InvalidName)?;
        let created_at = Timestamp::new(self.clock.now_millis());

        for _ in 0..MAX_ROOM_ID_ATTEMPTS {
            let room_id = RoomIdFactory::generate().map_err(CreateRoomError::IdGeneration)?;
            let room = Room::new(room_id, creator.clone(), created_at);

            match self.repository.insert_room(room.clone()).await {
                Ok(()) => {
                    tracing::info!("Room '{}' created by '{}'", room.id, room.creator.as_str());
                    return Ok(room);
                }
                Err(RepositoryError::DuplicateRoomId(id)) => {
                    tracing::debug!("Room id '{}' already taken, retrying", id);
                }
                Err(e) => return Err(CreateRoomError::Repository(e)),
            }
        }

        Err(CreateRoomError::RoomIdExhausted(MAX_ROOM_ID_ATTEMPTS))
    }
}
