//! Room snapshot DTOs (camelCase wire shape).

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SessionKindDto {
    Focus,
    ShortBreak,
    LongBreak,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantDto {
    pub id: String,
    pub name: String,
    pub joined_at: i64,
    pub sessions_completed: u32,
    pub total_focus_time: u64,
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerStateDto {
    pub is_running: bool,
    pub current_session: SessionKindDto,
    pub time_remaining: u64,
    pub sessions_completed: u32,
    pub start_time: Option<i64>,
    pub end_time: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomStatsDto {
    pub total_focus_time: u64,
    pub total_sessions: u32,
    pub participant_count: usize,
}

/// Full serializable view of a room
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomSnapshotDto {
    pub id: String,
    pub creator: String,
    pub participants: Vec<ParticipantDto>,
    pub timer_state: TimerStateDto,
    pub stats: RoomStatsDto,
}
