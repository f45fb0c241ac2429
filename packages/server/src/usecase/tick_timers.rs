//! UseCase: 実行中タイマーの定期更新
//!
//! 実行中の各ルームを現在時刻まで進め、進捗なら `timer-tick`、
//! 時間切れなら `session-completed`（と解除された実績）を参加者に送る。
//! 1 ルームの失敗は他のルームの処理に影響しない。

use std::sync::Arc;

use shuchu_shared::time::Clock;

use crate::domain::{
    MessagePusher, RoomEvent, RoomId, RoomRepository, TickResult, Timestamp,
};

use super::{error::TickError, notify::broadcast_session_completed};

/// Summary of one tick pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Rooms that are still counting down
    pub progressed: usize,
    /// Rooms whose session ended during this pass
    pub completed: usize,
    /// Rooms that could not be processed
    pub failed: usize,
}

pub struct TickTimersUseCase {
    repository: Arc<dyn RoomRepository>,
    message_pusher: Arc<dyn MessagePusher>,
    clock: Arc<dyn Clock>,
}

impl TickTimersUseCase {
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

    pub async fn execute(&self) -> TickReport {
        let now = Timestamp::new(self.clock.now_millis());
        let mut report = TickReport::default();

        for room_id in self.repository.get_running_room_ids().await {
            match self.tick_room(&room_id, now).await {
                Ok(TickResult::Progress { .. }) => report.progressed += 1,
                Ok(TickResult::Completed(_)) => report.completed += 1,
                // 一覧取得後に停止されたルーム
                Ok(TickResult::NotRunning) => {}
                Err(e) => {
                    tracing::warn!("Failed to tick room '{}': {}", room_id, e);
                    report.failed += 1;
                }
            }
        }

        report
    }

    async fn tick_room(&self, room_id: &RoomId, now: Timestamp) -> Result<TickResult, TickError> {
        let outcome = self.repository.advance_timer(room_id, now).await?;
        let room = outcome.room;

        match &outcome.result {
            TickResult::NotRunning => {}
            TickResult::Progress { .. } => {
                let event = RoomEvent::TimerTick {
                    room_id: room.id.clone(),
                    timer: room.timer.clone(),
                };
                self.message_pusher
                    .broadcast(room.participant_ids(), &event)
                    .await?;
            }
            TickResult::Completed(completion) => {
                broadcast_session_completed(self.message_pusher.as_ref(), &room, completion).await;
            }
        }

        Ok(outcome.result)
    }
}
