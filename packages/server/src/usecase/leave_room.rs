//! UseCase: ルームからの退出
//!
//! 最後の参加者が退出したルームは削除され、以降どの操作からも見えなくなる。

use std::sync::Arc;

use crate::domain::{
    LeaveOutcome, MessagePusher, ParticipantId, RepositoryError, RoomEvent, RoomRepository,
};

use super::{error::LeaveRoomError, parse_room_id};

pub struct LeaveRoomUseCase {
    repository: Arc<dyn RoomRepository>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl LeaveRoomUseCase {
    pub fn new(
        repository: Arc<dyn RoomRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// Remove `participant_id` from `room_id` and notify the remaining participants.
    pub async fn execute(
        &self,
        room_id: &str,
        participant_id: &ParticipantId,
    ) -> Result<LeaveOutcome, LeaveRoomError> {
        let id = parse_room_id(room_id)
            .ok_or_else(|| LeaveRoomError::RoomNotFound(room_id.to_string()))?;

        let outcome = self
            .repository
            .remove_participant(&id, participant_id)
            .await
            .map_err(|e| match e {
                RepositoryError::ParticipantNotFound(p) => LeaveRoomError::NotAParticipant(p),
                _ => LeaveRoomError::RoomNotFound(room_id.to_string()),
            })?;

        if outcome.room_closed {
            tracing::info!("'{}' left room '{}', room closed", participant_id, id);
            return Ok(outcome);
        }
        tracing::info!(
            "'{}' left room '{}' ({} participants remain)",
            participant_id,
            id,
            outcome.room.participants.len()
        );

        let event = RoomEvent::ParticipantLeft {
            participant_id: participant_id.clone(),
            room: outcome.room.clone(),
        };
        if let Err(e) = self
            .message_pusher
            .broadcast(outcome.room.participant_ids(), &event)
            .await
        {
            tracing::warn!("Failed to broadcast participant-left: {}", e);
        }

        Ok(outcome)
    }
}
