//! UseCase: ルームへの参加
//!
//! - 参加者本人には現在のルーム状態（`room-state`）を送る
//! - 新規参加の場合のみ、他の参加者へ `participant-joined` を通知する
//! - 存在しないルームへの参加はエラー（ルームを暗黙に作成しない）

use std::sync::Arc;

use shuchu_shared::time::Clock;

use crate::domain::{
    MessagePusher, Participant, ParticipantId, ParticipantName, Room, RoomEvent, RoomRepository,
    Timestamp,
};

use super::{error::JoinRoomError, parse_room_id};

pub struct JoinRoomUseCase {
    repository: Arc<dyn RoomRepository>,
    message_pusher: Arc<dyn MessagePusher>,
    clock: Arc<dyn Clock>,
}

impl JoinRoomUseCase {
    pub fn new(
        repository: Arc<dyn RoomRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
            clock,
        }
    }

    /// Join `room_id` as `participant_id`.
    ///
    /// Joining a room the participant is already in only re-sends the room state.
    ///
    /// # Returns
    ///
    /// * `Ok(Room)` - room snapshot after the join
    /// * `Err(JoinRoomError)` - unknown room or invalid name
    pub async fn execute(
        &self,
        room_id: &str,
        participant_id: ParticipantId,
        user_name: Option<String>,
    ) -> Result<Room, JoinRoomError> {
        let id =
            parse_room_id(room_id).ok_or_else(|| JoinRoomError::RoomNotFound(room_id.to_string()))?;
        let name = ParticipantName::from_optional(user_name).map_err(JoinRoomError::InvalidName)?;
        let now = Timestamp::new(self.clock.now_millis());

        let outcome = self
            .repository
            .add_participant(&id, Participant::new(participant_id.clone(), name, now), now)
            .await
            .map_err(|_| JoinRoomError::RoomNotFound(room_id.to_string()))?;
        let room = outcome.room;

        if let Err(e) = self
            .message_pusher
            .push_to(&participant_id, &RoomEvent::RoomState(room.clone()))
            .await
        {
            tracing::warn!("Failed to send room state to '{}': {}", participant_id, e);
        }

        if !outcome.newly_joined {
            tracing::debug!("'{}' is already in room '{}'", participant_id, room.id);
            return Ok(room);
        }
        tracing::info!(
            "'{}' joined room '{}' ({} participants)",
            participant_id,
            room.id,
            room.participants.len()
        );

        let others: Vec<ParticipantId> = room
            .participant_ids()
            .into_iter()
            .filter(|id| id != &participant_id)
            .collect();
        if others.is_empty() {
            return Ok(room);
        }
        if let Some(participant) = room.participant(&participant_id) {
            let event = RoomEvent::ParticipantJoined {
                participant: participant.clone(),
                room: room.clone(),
            };
            if let Err(e) = self.message_pusher.broadcast(others, &event).await {
                tracing::warn!("Failed to broadcast participant-joined: {}", e);
            }
        }

        Ok(room)
    }
}
