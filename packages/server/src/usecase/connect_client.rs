//! UseCase: WebSocket 接続の登録
//!
//! 接続ごとに新しい ParticipantId を払い出し、MessagePusher に送信チャンネルを登録する。
//! ルームへの参加は `join-room` コマンドで別途行う。

use std::sync::Arc;

use crate::domain::{MessagePusher, ParticipantId, ParticipantIdFactory, PusherChannel};

use super::error::ConnectError;

pub struct ConnectClientUseCase {
    message_pusher: Arc<dyn MessagePusher>,
}

impl ConnectClientUseCase {
    pub fn new(message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self { message_pusher }
    }

    /// Allocate an id for a new connection and register its outbound channel.
    pub async fn execute(&self, sender: PusherChannel) -> Result<ParticipantId, ConnectError> {
        let participant_id =
            ParticipantIdFactory::generate().map_err(ConnectError::InvalidParticipantId)?;
        self.message_pusher
            .register_client(participant_id.clone(), sender)
            .await;
        Ok(participant_id)
    }
}
