//! UseCase: WebSocket 切断
//!
//! 接続が参加していた全てのルームから退出し、MessagePusher から登録解除する。

use std::sync::Arc;

use crate::domain::{MessagePusher, ParticipantId, RoomId};

use super::leave_room::LeaveRoomUseCase;

pub struct DisconnectClientUseCase {
    leave_room: Arc<LeaveRoomUseCase>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl DisconnectClientUseCase {
    pub fn new(leave_room: Arc<LeaveRoomUseCase>, message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self {
            leave_room,
            message_pusher,
        }
    }

    /// Leave every room in `joined_rooms`, then drop the connection's channel.
    ///
    /// Returns the number of rooms that were actually left.
    pub async fn execute(&self, participant_id: &ParticipantId, joined_rooms: Vec<RoomId>) -> usize {
        let mut left = 0;
        for room_id in joined_rooms {
            match self.leave_room.execute(room_id.as_str(), participant_id).await {
                Ok(_) => left += 1,
                // ルームが既に削除されている場合など
                Err(e) => tracing::debug!(
                    "Skip leaving room '{}' for '{}': {}",
                    room_id,
                    participant_id,
                    e
                ),
            }
        }
        self.message_pusher.unregister_client(participant_id).await;
        tracing::info!("'{}' disconnected, left {} room(s)", participant_id, left);
        left
    }
}
