//! Entities
//!
//! 識別子を持ち、状態が変化するドメインオブジェクト。
//!
//! - `TimerState`: ルームのカウントダウン（1 ルームに 1 つ）
//! - `Participant`: ルームの参加者
//! - `Room`: タイマー・参加者・統計をまとめる集約ルート

use super::{
    achievement::Achievement,
    value_object::{
        FOCUS_DURATION_MS, ParticipantId, ParticipantName, RoomId, SessionKind, Timestamp,
    },
};

/// Countdown state of one room.
///
/// While running, `end_time` is authoritative and `time_remaining` is only a cached
/// display value; while stopped, `time_remaining` is authoritative and both
/// `start_time` and `end_time` are `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerState {
    pub is_running: bool,
    pub current_session: SessionKind,
    pub time_remaining: u64,
    pub sessions_completed: u32,
    pub start_time: Option<Timestamp>,
    pub end_time: Option<Timestamp>,
}

impl Default for TimerState {
    fn default() -> Self {
        Self::new()
    }
}

impl TimerState {
    /// A stopped timer at the beginning of a focus session
    pub fn new() -> Self {
        Self {
            is_running: false,
            current_session: SessionKind::Focus,
            time_remaining: SessionKind::Focus.duration_ms(),
            sessions_completed: 0,
            start_time: None,
            end_time: None,
        }
    }

    /// True remaining time at `now`.
    pub fn remaining_at(&self, now: Timestamp) -> u64 {
        match (self.is_running, self.end_time) {
            (true, Some(end_time)) => now.millis_until(end_time),
            _ => self.time_remaining,
        }
    }

    /// Start counting down. Returns `false` (no change) if already running.
    ///
    /// A zero `time_remaining` is accepted; the next tick completes the session.
    pub fn start(&mut self, now: Timestamp) -> bool {
        if self.is_running {
            return false;
        }
        self.is_running = true;
        self.start_time = Some(now);
        self.end_time = Some(now.add_millis(self.time_remaining));
        true
    }

    /// Freeze the countdown. Returns `false` (no change) if not running.
    pub fn pause(&mut self, now: Timestamp) -> bool {
        if !self.is_running {
            return false;
        }
        self.time_remaining = self.remaining_at(now);
        self.stop();
        true
    }

    /// Discard progress of the current session.
    pub fn reset(&mut self) {
        self.time_remaining = self.current_session.duration_ms();
        self.stop();
    }

    /// Write the recomputed remaining time into `time_remaining` and return it.
    pub fn refresh(&mut self, now: Timestamp) -> u64 {
        self.time_remaining = self.remaining_at(now);
        self.time_remaining
    }

    pub fn is_expired(&self, now: Timestamp) -> bool {
        self.is_running && self.remaining_at(now) == 0
    }

    /// Count the current session as done and move to the next one (stopped).
    ///
    /// Returns the kind of the session that just finished.
    fn advance_session(&mut self) -> SessionKind {
        let finished = self.current_session;
        self.sessions_completed += 1;
        self.current_session = finished.next(self.sessions_completed);
        self.time_remaining = self.current_session.duration_ms();
        self.stop();
        finished
    }

    fn stop(&mut self) {
        self.is_running = false;
        self.start_time = None;
        self.end_time = None;
    }
}

/// A connected user within a room
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    pub id: ParticipantId,
    pub name: ParticipantName,
    pub joined_at: Timestamp,
    pub sessions_completed: u32,
    pub total_focus_time: u64,
    pub is_active: bool,
}

impl Participant {
    pub fn new(id: ParticipantId, name: ParticipantName, joined_at: Timestamp) -> Self {
        Self {
            id,
            name,
            joined_at,
            sessions_completed: 0,
            total_focus_time: 0,
            is_active: true,
        }
    }
}

/// Aggregate counters of a room
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoomStats {
    /// Focus time summed over participants (person-milliseconds)
    pub total_focus_time: u64,
    pub total_sessions: u32,
    pub participant_count: usize,
}

/// Timer command issued by a participant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerAction {
    Start,
    Pause,
    /// Complete the current session early
    Skip,
    Reset,
}

/// Result of completing one session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionCompletion {
    pub finished: SessionKind,
    pub next: SessionKind,
    pub sessions_completed: u32,
    pub unlocked: Vec<Achievement>,
}

/// Result of applying a [`TimerAction`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerTransition {
    pub action: TimerAction,
    /// `false` when the action was a no-op (e.g. pause while paused)
    pub changed: bool,
    pub completion: Option<SessionCompletion>,
}

/// Result of one ticker pass over a room
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickResult {
    NotRunning,
    Progress { time_remaining: u64 },
    Completed(SessionCompletion),
}

/// Room aggregate: one timer, its participants and their stats.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Room {
    pub id: RoomId,
    pub creator: ParticipantName,
    pub created_at: Timestamp,
    /// Participants in join order
    pub participants: Vec<Participant>,
    pub timer: TimerState,
    pub stats: RoomStats,
}

impl Room {
    pub fn new(id: RoomId, creator: ParticipantName, created_at: Timestamp) -> Self {
        Self {
            id,
            creator,
            created_at,
            participants: Vec::new(),
            timer: TimerState::new(),
            stats: RoomStats::default(),
        }
    }

    /// Add a participant. Returns `false` if the id was already present (no change).
    pub fn add_participant(&mut self, participant: Participant) -> bool {
        if self.has_participant(&participant.id) {
            return false;
        }
        self.participants.push(participant);
        self.sync_participant_count();
        true
    }

    pub fn remove_participant(&mut self, participant_id: &ParticipantId) -> Option<Participant> {
        let index = self
            .participants
            .iter()
            .position(|p| &p.id == participant_id)?;
        let removed = self.participants.remove(index);
        self.sync_participant_count();
        Some(removed)
    }

    pub fn has_participant(&self, participant_id: &ParticipantId) -> bool {
        self.participants.iter().any(|p| &p.id == participant_id)
    }

    pub fn participant(&self, participant_id: &ParticipantId) -> Option<&Participant> {
        self.participants.iter().find(|p| &p.id == participant_id)
    }

    pub fn participant_ids(&self) -> Vec<ParticipantId> {
        self.participants.iter().map(|p| p.id.clone()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    pub fn apply_timer_action(&mut self, action: TimerAction, now: Timestamp) -> TimerTransition {
        let (changed, completion) = match action {
            TimerAction::Start => (self.timer.start(now), None),
            TimerAction::Pause => (self.timer.pause(now), None),
            TimerAction::Reset => {
                self.timer.reset();
                (true, None)
            }
            TimerAction::Skip => (true, Some(self.complete_session())),
        };
        TimerTransition {
            action,
            changed,
            completion,
        }
    }

    /// Advance a running timer to `now`, completing the session when it expires.
    pub fn advance(&mut self, now: Timestamp) -> TickResult {
        if !self.timer.is_running {
            return TickResult::NotRunning;
        }
        if self.timer.is_expired(now) {
            return TickResult::Completed(self.complete_session());
        }
        TickResult::Progress {
            time_remaining: self.timer.refresh(now),
        }
    }

    /// Finish the current session and credit focus time.
    ///
    /// Focus completions credit every active participant with one session and
    /// a full focus duration; the room total grows by the same amount per participant.
    pub fn complete_session(&mut self) -> SessionCompletion {
        let before = self.timer.sessions_completed;
        let finished = self.timer.advance_session();
        self.stats.total_sessions += 1;

        if finished == SessionKind::Focus {
            for participant in self.participants.iter_mut().filter(|p| p.is_active) {
                participant.sessions_completed += 1;
                participant.total_focus_time += FOCUS_DURATION_MS;
                self.stats.total_focus_time += FOCUS_DURATION_MS;
            }
        }

        SessionCompletion {
            finished,
            next: self.timer.current_session,
            sessions_completed: self.timer.sessions_completed,
            unlocked: Achievement::unlocked_between(before, self.timer.sessions_completed),
        }
    }

    fn sync_participant_count(&mut self) {
        self.stats.participant_count = self.participants.len();
    }
}
