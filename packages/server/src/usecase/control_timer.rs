//! UseCase: タイマー操作（start / pause / skip / reset）
//!
//! 操作はルーム単位で直列化されて適用され、結果のスナップショットがルームの全参加者へ
//! ブロードキャストされる。状態が変わらない操作（実行中の start など）も、
//! クライアントの再同期のためにブロードキャストする。

use std::sync::Arc;

use shuchu_shared::time::Clock;

use crate::domain::{MessagePusher, Room, RoomEvent, RoomRepository, TimerAction, Timestamp};

use super::{
    error::TimerControlError,
    notify::{broadcast_session_completed, broadcast_to_room},
    parse_room_id,
};

pub struct ControlTimerUseCase {
    repository: Arc<dyn RoomRepository>,
    message_pusher: Arc<dyn MessagePusher>,
    clock: Arc<dyn Clock>,
}

impl ControlTimerUseCase {
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

    pub async fn execute(
        &self,
        room_id: &str,
        action: TimerAction,
    ) -> Result<Room, TimerControlError> {
        let not_found = || TimerControlError::RoomNotFound(room_id.to_string());
        let id = parse_room_id(room_id).ok_or_else(not_found)?;
        let now = Timestamp::new(self.clock.now_millis());

        let outcome = self
            .repository
            .apply_timer_action(&id, action, now)
            .await
            .map_err(|_| not_found())?;
        let room = outcome.room;
        let transition = outcome.transition;

        if !transition.changed {
            tracing::debug!("{:?} on room '{}' changed nothing", action, room.id);
        }

        let pusher = self.message_pusher.as_ref();
        match (action, &transition.completion) {
            (_, Some(completion)) => broadcast_session_completed(pusher, &room, completion).await,
            (TimerAction::Start, None) => {
                tracing::info!("Timer started in room '{}'", room.id);
                broadcast_to_room(pusher, &room, RoomEvent::TimerStarted(room.clone())).await;
            }
            (TimerAction::Pause, None) => {
                tracing::info!(
                    "Timer paused in room '{}' ({} ms left)",
                    room.id,
                    room.timer.time_remaining
                );
                broadcast_to_room(pusher, &room, RoomEvent::TimerPaused(room.clone())).await;
            }
            (TimerAction::Reset, None) => {
                tracing::info!("Timer reset in room '{}'", room.id);
                broadcast_to_room(pusher, &room, RoomEvent::TimerReset(room.clone())).await;
            }
            // skip は常に completion を伴う
            (TimerAction::Skip, None) => {}
        }

        Ok(room)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{
            MockMessagePusher, Participant, ParticipantId, ParticipantName, RoomId, SessionKind,
            value_object::{FOCUS_DURATION_MS, LONG_BREAK_DURATION_MS, SHORT_BREAK_DURATION_MS},
        },
        infrastructure::repository::InMemoryRoomRepository,
    };
    use shuchu_shared::time::ManualClock;

    // ========================================
    // テスト作業記録
    // ========================================
    // 【何をテストするか】
    // - 各操作の状態遷移とブロードキャストされるイベント
    // - 状態が変わらない操作も再同期のためにブロードキャストされる
    // - skip による完了時のセッション遷移と実績解除
    // - 存在しないルームへの操作
    // ========================================

    const T0: i64 = 1_700_000_000_000;

    fn pid(value: &str) -> ParticipantId {
        ParticipantId::new(value.to_string()).unwrap()
    }

    fn room_with_members(members: &[&str]) -> Room {
        let mut room = Room::new(
            RoomId::new("ab12cd34".to_string()).unwrap(),
            ParticipantName::anonymous(),
            Timestamp::new(T0),
        );
        for member in members {
            room.add_participant(Participant::new(
                pid(member),
                ParticipantName::anonymous(),
                Timestamp::new(T0),
            ));
        }
        room
    }

    async fn setup(
        room: Room,
        pusher: MockMessagePusher,
    ) -> (ControlTimerUseCase, Arc<ManualClock>) {
        let repository = Arc::new(InMemoryRoomRepository::new());
        repository.insert_room(room).await.unwrap();
        let clock = Arc::new(ManualClock::new(T0));
        (
            ControlTimerUseCase::new(repository, Arc::new(pusher), clock.clone()),
            clock,
        )
    }

    fn expect_event(pusher: &mut MockMessagePusher, name: &'static str, times: usize) {
        pusher
            .expect_broadcast()
            .withf(move |_, event| event.name() == name)
            .times(times)
            .returning(|_, _| Ok(()));
    }

    #[tokio::test]
    async fn test_start_broadcasts_to_every_participant() {
        // テスト項目: start で endTime が設定され、全参加者に timer-started が送られる
        // given (前提条件):
        let mut pusher = MockMessagePusher::new();
        pusher
            .expect_broadcast()
            .withf(|targets, event| {
                targets.len() == 2 && matches!(event, RoomEvent::TimerStarted(_))
            })
            .times(1)
            .returning(|_, _| Ok(()));
        let (usecase, _clock) = setup(room_with_members(&["alice", "bob"]), pusher).await;

        // when (操作):
        let room = usecase.execute("ab12cd34", TimerAction::Start).await.unwrap();

        // then (期待する結果):
        assert!(room.timer.is_running);
        assert_eq!(room.timer.start_time, Some(Timestamp::new(T0)));
        assert_eq!(
            room.timer.end_time,
            Some(Timestamp::new(T0 + FOCUS_DURATION_MS as i64))
        );
    }

    #[tokio::test]
    async fn test_start_while_running_is_rebroadcast_without_change() {
        // テスト項目: 実行中の start は状態を変えず（endTime 維持）、再同期のため再送される
        // given (前提条件):
        let mut pusher = MockMessagePusher::new();
        expect_event(&mut pusher, "timer-started", 2);
        let (usecase, clock) = setup(room_with_members(&["alice"]), pusher).await;
        let first = usecase.execute("ab12cd34", TimerAction::Start).await.unwrap();

        // when (操作):
        clock.advance(10_000);
        let second = usecase.execute("ab12cd34", TimerAction::Start).await.unwrap();

        // then (期待する結果):
        assert_eq!(second.timer.end_time, first.timer.end_time);
        assert_eq!(second.timer.start_time, first.timer.start_time);
    }

    #[tokio::test]
    async fn test_pause_freezes_remaining_time() {
        // テスト項目: pause で残り時間が固定され、timestamp はクリアされる
        // given (前提条件):
        let mut pusher = MockMessagePusher::new();
        expect_event(&mut pusher, "timer-started", 1);
        expect_event(&mut pusher, "timer-paused", 2);
        let (usecase, clock) = setup(room_with_members(&["alice"]), pusher).await;
        usecase.execute("ab12cd34", TimerAction::Start).await.unwrap();

        // when (操作):
        clock.advance(300_000);
        let paused = usecase.execute("ab12cd34", TimerAction::Pause).await.unwrap();
        clock.advance(60_000);
        let paused_again = usecase.execute("ab12cd34", TimerAction::Pause).await.unwrap();

        // then (期待する結果):
        assert!(!paused.timer.is_running);
        assert_eq!(paused.timer.time_remaining, 1_200_000);
        assert_eq!(paused.timer.start_time, None);
        assert_eq!(paused.timer.end_time, None);
        assert_eq!(paused_again.timer, paused.timer);
    }

    #[tokio::test]
    async fn test_skip_focus_completes_and_unlocks_first_session() {
        // テスト項目: Focus の skip で session-completed と first-session 実績が通知される
        // given (前提条件):
        let mut pusher = MockMessagePusher::new();
        expect_event(&mut pusher, "session-completed", 1);
        pusher
            .expect_broadcast()
            .withf(|_, event| {
                matches!(
                    event,
                    RoomEvent::AchievementUnlocked { achievement, .. }
                        if *achievement == crate::domain::Achievement::FirstSession
                )
            })
            .times(1)
            .returning(|_, _| Ok(()));
        let (usecase, _clock) = setup(room_with_members(&["alice", "bob"]), pusher).await;

        // when (操作):
        let room = usecase.execute("ab12cd34", TimerAction::Skip).await.unwrap();

        // then (期待する結果):
        assert_eq!(room.timer.current_session, SessionKind::ShortBreak);
        assert_eq!(room.timer.time_remaining, SHORT_BREAK_DURATION_MS);
        assert_eq!(room.timer.sessions_completed, 1);
        assert!(!room.timer.is_running);
        assert_eq!(room.stats.total_sessions, 1);
        assert_eq!(room.stats.total_focus_time, 2 * FOCUS_DURATION_MS);
        assert!(room.participants.iter().all(|p| p.sessions_completed == 1));
    }

    #[tokio::test]
    async fn test_fourth_completion_leads_to_long_break() {
        // テスト項目: 完了数 3 の状態で Focus を完了すると Long Break になり marathon が解除される
        // given (前提条件):
        let mut room = room_with_members(&["alice"]);
        room.timer.sessions_completed = 3;
        let mut pusher = MockMessagePusher::new();
        expect_event(&mut pusher, "session-completed", 1);
        pusher
            .expect_broadcast()
            .withf(|_, event| {
                matches!(
                    event,
                    RoomEvent::AchievementUnlocked { achievement, .. }
                        if *achievement == crate::domain::Achievement::Marathon
                )
            })
            .times(1)
            .returning(|_, _| Ok(()));
        let (usecase, _clock) = setup(room, pusher).await;

        // when (操作):
        let room = usecase.execute("ab12cd34", TimerAction::Skip).await.unwrap();

        // then (期待する結果):
        assert_eq!(room.timer.sessions_completed, 4);
        assert_eq!(room.timer.current_session, SessionKind::LongBreak);
        assert_eq!(room.timer.time_remaining, LONG_BREAK_DURATION_MS);
    }

    #[tokio::test]
    async fn test_reset_restores_full_duration() {
        // テスト項目: reset で現在のセッションの全時間に戻り、停止する
        // given (前提条件):
        let mut pusher = MockMessagePusher::new();
        expect_event(&mut pusher, "timer-started", 1);
        expect_event(&mut pusher, "timer-reset", 1);
        let (usecase, clock) = setup(room_with_members(&["alice"]), pusher).await;
        usecase.execute("ab12cd34", TimerAction::Start).await.unwrap();
        clock.advance(400_000);

        // when (操作):
        let room = usecase.execute("ab12cd34", TimerAction::Reset).await.unwrap();

        // then (期待する結果):
        assert!(!room.timer.is_running);
        assert_eq!(room.timer.current_session, SessionKind::Focus);
        assert_eq!(room.timer.time_remaining, FOCUS_DURATION_MS);
        assert_eq!(room.timer.sessions_completed, 0);
        assert_eq!(room.timer.end_time, None);
    }

    #[tokio::test]
    async fn test_control_unknown_room() {
        // テスト項目: 存在しないルームへの操作は RoomNotFound で、何も送信されない
        // given (前提条件):
        let mut pusher = MockMessagePusher::new();
        pusher.expect_broadcast().times(0);
        let (usecase, _clock) = setup(room_with_members(&["alice"]), pusher).await;

        // when (操作):
        let result = usecase.execute("deadbeef", TimerAction::Start).await;

        // then (期待する結果):
        assert_eq!(
            result,
            Err(TimerControlError::RoomNotFound("deadbeef".to_string()))
        );
    }
}
