//! Outbound room events.
//!
//! UseCase 層はこの enum を MessagePusher に渡し、ワイヤ形式への変換は
//! Infrastructure 層が担当する。

use super::{
    achievement::Achievement,
    entity::{Participant, Room, TimerState},
    value_object::{ParticipantId, RoomId},
};

/// Event pushed to participants of a room
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoomEvent {
    /// Full state, sent to a participant right after joining
    RoomState(Room),
    TimerStarted(Room),
    TimerPaused(Room),
    TimerReset(Room),
    /// Lightweight progress update carrying only the timer
    TimerTick { room_id: RoomId, timer: TimerState },
    SessionCompleted(Room),
    ParticipantJoined { participant: Participant, room: Room },
    ParticipantLeft { participant_id: ParticipantId, room: Room },
    AchievementUnlocked { room_id: RoomId, achievement: Achievement },
    /// Rejected command, sent to the issuing client only
    CommandError { reason: String, room_id: Option<String> },
}

impl RoomEvent {
    /// Wire name of the event
    pub fn name(&self) -> &'static str {
        match self {
            RoomEvent::RoomState(_) => "room-state",
            RoomEvent::TimerStarted(_) => "timer-started",
            RoomEvent::TimerPaused(_) => "timer-paused",
            RoomEvent::TimerReset(_) => "timer-reset",
            RoomEvent::TimerTick { .. } => "timer-tick",
            RoomEvent::SessionCompleted(_) => "session-completed",
            RoomEvent::ParticipantJoined { .. } => "participant-joined",
            RoomEvent::ParticipantLeft { .. } => "participant-left",
            RoomEvent::AchievementUnlocked { .. } => "achievement-unlocked",
            RoomEvent::CommandError { .. } => "command-error",
        }
    }
}
