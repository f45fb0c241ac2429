//! Periodic driver for [`TickTimersUseCase`].

use std::{sync::Arc, time::Duration};

use tokio::{
    sync::watch,
    task::JoinHandle,
    time::{self, MissedTickBehavior},
};

use crate::usecase::TickTimersUseCase;

/// Run one tick pass every `period` until `shutdown` flips to `true` (or its sender is dropped).
///
/// Missed ticks are skipped rather than replayed; every pass recomputes from `endTime`.
pub fn spawn_ticker(
    usecase: Arc<TickTimersUseCase>,
    period: Duration,
    mut shutdown: watch::Receiver<bool>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        tracing::info!("Ticker started ({} ms)", period.as_millis());

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    let report = usecase.execute().await;
                    if report.completed > 0 || report.failed > 0 {
                        tracing::debug!(
                            "Tick: {} progressed, {} completed, {} failed",
                            report.progressed,
                            report.completed,
                            report.failed
                        );
                    }
                }
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                }
            }
        }

        tracing::info!("Ticker stopped");
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{ParticipantName, Room, RoomId, RoomRepository, TimerAction, Timestamp},
        infrastructure::{
            message_pusher::WebSocketMessagePusher, repository::InMemoryRoomRepository,
        },
    };
    use shuchu_shared::time::ManualClock;

    #[tokio::test]
    async fn test_ticker_advances_rooms_until_shutdown() {
        // テスト項目: ticker は周期的にタイマーを進め、shutdown で停止する
        // given (前提条件):
        let repository = Arc::new(InMemoryRoomRepository::new());
        let clock = Arc::new(ManualClock::new(0));
        let room_id = RoomId::new("ab12cd34".to_string()).unwrap();
        repository
            .insert_room(Room::new(
                room_id.clone(),
                ParticipantName::anonymous(),
                Timestamp::new(0),
            ))
            .await
            .unwrap();
        repository
            .apply_timer_action(&room_id, TimerAction::Start, Timestamp::new(0))
            .await
            .unwrap();
        let usecase = Arc::new(TickTimersUseCase::new(
            repository.clone(),
            Arc::new(WebSocketMessagePusher::new()),
            clock.clone(),
        ));
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        // when (操作):
        clock.set(1_500_000);
        let handle = spawn_ticker(usecase, Duration::from_millis(10), shutdown_rx);
        time::sleep(Duration::from_millis(100)).await;
        shutdown_tx.send(true).unwrap();
        handle.await.unwrap();

        // then (期待する結果):
        let room = repository.get_room(&room_id).await.unwrap();
        assert!(!room.timer.is_running);
        assert_eq!(room.timer.sessions_completed, 1);
    }
}
