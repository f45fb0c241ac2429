//! MessagePusher trait 定義
//!
//! 参加者へのイベント通知のインターフェース。
//! WebSocket などの具体的な転送手段は Infrastructure 層が実装する。

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::{MessagePushError, ParticipantId, RoomEvent};

/// Outbound channel of one connection (encoded frames)
pub type PusherChannel = mpsc::UnboundedSender<String>;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// 接続を登録
    async fn register_client(&self, client_id: ParticipantId, sender: PusherChannel);

    /// 接続を登録解除
    async fn unregister_client(&self, client_id: &ParticipantId);

    /// 特定の接続にイベントを送信
    async fn push_to(
        &self,
        client_id: &ParticipantId,
        event: &RoomEvent,
    ) -> Result<(), MessagePushError>;

    /// 複数の接続にイベントを送信（一部の送信失敗は許容する）
    async fn broadcast(
        &self,
        targets: Vec<ParticipantId>,
        event: &RoomEvent,
    ) -> Result<(), MessagePushError>;
}
