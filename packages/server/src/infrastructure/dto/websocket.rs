//! WebSocket message DTOs.
//!
//! Every frame is a JSON object with a kebab-case `type` tag; other fields are camelCase.

use serde::{Deserialize, Serialize};

use super::room::{ParticipantDto, RoomSnapshotDto, TimerStateDto};

/// Command sent by a client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum ClientCommand {
    JoinRoom {
        room_id: String,
        #[serde(default)]
        user_name: Option<String>,
    },
    StartTimer {
        room_id: String,
    },
    PauseTimer {
        room_id: String,
    },
    /// Skip: finish the current session now
    CompleteSession {
        room_id: String,
    },
    ResetTimer {
        room_id: String,
    },
    LeaveRoom {
        room_id: String,
    },
}

impl ClientCommand {
    pub fn room_id(&self) -> &str {
        match self {
            ClientCommand::JoinRoom { room_id, .. }
            | ClientCommand::StartTimer { room_id }
            | ClientCommand::PauseTimer { room_id }
            | ClientCommand::CompleteSession { room_id }
            | ClientCommand::ResetTimer { room_id }
            | ClientCommand::LeaveRoom { room_id } => room_id,
        }
    }
}

/// Event sent by the server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum ServerMessage {
    RoomState {
        room: RoomSnapshotDto,
    },
    TimerStarted {
        room: RoomSnapshotDto,
    },
    TimerPaused {
        room: RoomSnapshotDto,
    },
    TimerReset {
        room: RoomSnapshotDto,
    },
    TimerTick {
        room_id: String,
        timer_state: TimerStateDto,
    },
    SessionCompleted {
        room: RoomSnapshotDto,
    },
    ParticipantJoined {
        participant: ParticipantDto,
        room: RoomSnapshotDto,
    },
    ParticipantLeft {
        participant_id: String,
        room: RoomSnapshotDto,
    },
    AchievementUnlocked {
        room_id: String,
        achievement: String,
        message: String,
    },
    CommandError {
        reason: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        room_id: Option<String>,
    },
}

impl ServerMessage {
    /// Encode as a JSON text frame
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_join_room_command() {
        // テスト項目: join-room コマンドが camelCase のフィールドで解析される
        // given (前提条件):
        let json = r#"{"type":"join-room","roomId":"ab12cd34","userName":"alice"}"#;

        // when (操作):
        let command: ClientCommand = serde_json::from_str(json).unwrap();

        // then (期待する結果):
        assert_eq!(
            command,
            ClientCommand::JoinRoom {
                room_id: "ab12cd34".to_string(),
                user_name: Some("alice".to_string()),
            }
        );
        assert_eq!(command.room_id(), "ab12cd34");
    }

    #[test]
    fn test_parse_join_room_without_name() {
        // テスト項目: userName は省略できる
        let command: ClientCommand =
            serde_json::from_str(r#"{"type":"join-room","roomId":"x1"}"#).unwrap();
        assert_eq!(
            command,
            ClientCommand::JoinRoom {
                room_id: "x1".to_string(),
                user_name: None,
            }
        );
    }

    #[test]
    fn test_parse_timer_commands() {
        // テスト項目: タイマー操作コマンドの type 名が kebab-case で解析される
        // given (前提条件):
        let cases = [
            ("start-timer", "StartTimer"),
            ("pause-timer", "PauseTimer"),
            ("complete-session", "CompleteSession"),
            ("reset-timer", "ResetTimer"),
            ("leave-room", "LeaveRoom"),
        ];

        for (tag, variant) in cases {
            // when (操作):
            let json = format!(r#"{{"type":"{tag}","roomId":"r1"}}"#);
            let command: ClientCommand = serde_json::from_str(&json).unwrap();

            // then (期待する結果):
            assert!(format!("{command:?}").starts_with(variant));
            assert_eq!(command.room_id(), "r1");
        }
    }

    #[test]
    fn test_unknown_command_type_is_rejected() {
        // テスト項目: 未知の type は解析エラーになる
        let result = serde_json::from_str::<ClientCommand>(r#"{"type":"dance","roomId":"r1"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_command_error_omits_missing_room_id() {
        // テスト項目: roomId のない command-error は roomId フィールドを出力しない
        // given (前提条件):
        let message = ServerMessage::CommandError {
            reason: "invalid command".to_string(),
            room_id: None,
        };

        // when (操作):
        let json = message.to_json().unwrap();

        // then (期待する結果):
        assert_eq!(json, r#"{"type":"command-error","reason":"invalid command"}"#);
    }
}
