//! Conversion logic between domain entities and DTOs.

use crate::domain::{Participant, Room, RoomEvent, SessionKind, TimerState};
use crate::infrastructure::dto::{
    http::RoomSummaryDto,
    room::{ParticipantDto, RoomSnapshotDto, RoomStatsDto, SessionKindDto, TimerStateDto},
    websocket::ServerMessage,
};
use shuchu_shared::time::timestamp_to_jst_rfc3339;

// ========================================
// Domain Entity → DTO
// ========================================

impl From<SessionKind> for SessionKindDto {
    fn from(kind: SessionKind) -> Self {
        match kind {
            SessionKind::Focus => Self::Focus,
            SessionKind::ShortBreak => Self::ShortBreak,
            SessionKind::LongBreak => Self::LongBreak,
        }
    }
}

impl From<&Participant> for ParticipantDto {
    fn from(model: &Participant) -> Self {
        Self {
            id: model.id.as_str().to_string(),
            name: model.name.as_str().to_string(),
            joined_at: model.joined_at.value(),
            sessions_completed: model.sessions_completed,
            total_focus_time: model.total_focus_time,
            is_active: model.is_active,
        }
    }
}

impl From<&TimerState> for TimerStateDto {
    fn from(model: &TimerState) -> Self {
        Self {
            is_running: model.is_running,
            current_session: model.current_session.into(),
            time_remaining: model.time_remaining,
            sessions_completed: model.sessions_completed,
            start_time: model.start_time.map(|t| t.value()),
            end_time: model.end_time.map(|t| t.value()),
        }
    }
}

impl From<&Room> for RoomSnapshotDto {
    fn from(model: &Room) -> Self {
        Self {
            id: model.id.as_str().to_string(),
            creator: model.creator.as_str().to_string(),
            participants: model.participants.iter().map(ParticipantDto::from).collect(),
            timer_state: (&model.timer).into(),
            stats: RoomStatsDto {
                total_focus_time: model.stats.total_focus_time,
                total_sessions: model.stats.total_sessions,
                participant_count: model.stats.participant_count,
            },
        }
    }
}

impl From<&Room> for RoomSummaryDto {
    fn from(model: &Room) -> Self {
        Self {
            id: model.id.as_str().to_string(),
            creator: model.creator.as_str().to_string(),
            participant_count: model.stats.participant_count,
            is_running: model.timer.is_running,
            current_session: model.timer.current_session.into(),
            created_at: timestamp_to_jst_rfc3339(model.created_at.value()),
        }
    }
}

impl From<&RoomEvent> for ServerMessage {
    fn from(event: &RoomEvent) -> Self {
        match event {
            RoomEvent::RoomState(room) => Self::RoomState { room: room.into() },
            RoomEvent::TimerStarted(room) => Self::TimerStarted { room: room.into() },
            RoomEvent::TimerPaused(room) => Self::TimerPaused { room: room.into() },
            RoomEvent::TimerReset(room) => Self::TimerReset { room: room.into() },
            RoomEvent::TimerTick { room_id, timer } => Self::TimerTick {
                room_id: room_id.as_str().to_string(),
                timer_state: timer.into(),
            },
            RoomEvent::SessionCompleted(room) => Self::SessionCompleted { room: room.into() },
            RoomEvent::ParticipantJoined { participant, room } => Self::ParticipantJoined {
                participant: participant.into(),
                room: room.into(),
            },
            RoomEvent::ParticipantLeft {
                participant_id,
                room,
            } => Self::ParticipantLeft {
                participant_id: participant_id.as_str().to_string(),
                room: room.into(),
            },
            RoomEvent::AchievementUnlocked {
                room_id,
                achievement,
            } => Self::AchievementUnlocked {
                room_id: room_id.as_str().to_string(),
                achievement: achievement.id().to_string(),
                message: achievement.message().to_string(),
            },
            RoomEvent::CommandError { reason, room_id } => Self::CommandError {
                reason: reason.clone(),
                room_id: room_id.clone(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        Achievement, ParticipantId, ParticipantName, RoomId, TimerAction, Timestamp,
    };
    use serde_json::json;

    fn create_test_room() -> Room {
        let mut room = Room::new(
            RoomId::new("ab12cd34".to_string()).unwrap(),
            ParticipantName::new("alice".to_string()).unwrap(),
            Timestamp::new(1_000),
        );
        room.add_participant(Participant::new(
            ParticipantId::new("p1".to_string()).unwrap(),
            ParticipantName::new("alice".to_string()).unwrap(),
            Timestamp::new(2_000),
        ));
        room
    }

    #[test]
    fn test_snapshot_wire_shape() {
        // テスト項目: スナップショットが camelCase の決められた形で出力される
        // given (前提条件):
        let room = create_test_room();

        // when (操作):
        let value = serde_json::to_value(RoomSnapshotDto::from(&room)).unwrap();

        // then (期待する結果):
        assert_eq!(
            value,
            json!({
                "id": "ab12cd34",
                "creator": "alice",
                "participants": [{
                    "id": "p1",
                    "name": "alice",
                    "joinedAt": 2000,
                    "sessionsCompleted": 0,
                    "totalFocusTime": 0,
                    "isActive": true
                }],
                "timerState": {
                    "isRunning": false,
                    "currentSession": "focus",
                    "timeRemaining": 1500000,
                    "sessionsCompleted": 0,
                    "startTime": null,
                    "endTime": null
                },
                "stats": {
                    "totalFocusTime": 0,
                    "totalSessions": 0,
                    "participantCount": 1
                }
            })
        );
    }

    #[test]
    fn test_running_timer_exposes_start_and_end() {
        // テスト項目: 実行中のタイマーは startTime / endTime を持つ
        // given (前提条件):
        let mut room = create_test_room();
        room.apply_timer_action(TimerAction::Start, Timestamp::new(10_000));

        // when (操作):
        let dto = TimerStateDto::from(&room.timer);

        // then (期待する結果):
        assert!(dto.is_running);
        assert_eq!(dto.start_time, Some(10_000));
        assert_eq!(dto.end_time, Some(1_510_000));
    }

    #[test]
    fn test_timer_tick_carries_timer_state_only() {
        // テスト項目: timer-tick はタイマー部分だけを運ぶ
        // given (前提条件):
        let room = create_test_room();
        let event = RoomEvent::TimerTick {
            room_id: room.id.clone(),
            timer: room.timer.clone(),
        };

        // when (操作):
        let value = serde_json::to_value(ServerMessage::from(&event)).unwrap();

        // then (期待する結果):
        assert_eq!(value["type"], "timer-tick");
        assert_eq!(value["roomId"], "ab12cd34");
        assert_eq!(value["timerState"]["timeRemaining"], 1500000);
        assert!(value.get("room").is_none());
    }

    #[test]
    fn test_event_names_match_message_tags() {
        // テスト項目: RoomEvent::name と ServerMessage の type タグが一致する
        // given (前提条件):
        let room = create_test_room();
        let participant = room.participants[0].clone();
        let events = vec![
            RoomEvent::RoomState(room.clone()),
            RoomEvent::TimerStarted(room.clone()),
            RoomEvent::TimerPaused(room.clone()),
            RoomEvent::TimerReset(room.clone()),
            RoomEvent::SessionCompleted(room.clone()),
            RoomEvent::ParticipantJoined {
                participant: participant.clone(),
                room: room.clone(),
            },
            RoomEvent::ParticipantLeft {
                participant_id: participant.id.clone(),
                room: room.clone(),
            },
            RoomEvent::AchievementUnlocked {
                room_id: room.id.clone(),
                achievement: Achievement::Marathon,
            },
            RoomEvent::CommandError {
                reason: "Room not found".to_string(),
                room_id: Some("zzz".to_string()),
            },
        ];

        for event in events {
            // when (操作):
            let value = serde_json::to_value(ServerMessage::from(&event)).unwrap();

            // then (期待する結果):
            assert_eq!(value["type"], event.name());
        }
    }

    #[test]
    fn test_room_summary_formats_created_at() {
        // テスト項目: ルーム一覧の createdAt が JST の RFC 3339 になる
        // given (前提条件):
        let room = create_test_room();

        // when (操作):
        let summary = RoomSummaryDto::from(&room);

        // then (期待する結果):
        assert_eq!(summary.participant_count, 1);
        assert_eq!(summary.current_session, SessionKindDto::Focus);
        assert!(summary.created_at.starts_with("1970-01-01T09:00:01"));
    }
}
