//! Value Objects
//!
//! 値そのものに意味を持つ不変のドメインオブジェクト。
//! 生成時にバリデーションを行い、不正な値を持つインスタンスを作らせない。

use std::fmt;

use super::error::ValueObjectError;

/// Focus session length (25 minutes)
pub const FOCUS_DURATION_MS: u64 = 25 * 60 * 1000;
/// Short break length (5 minutes)
pub const SHORT_BREAK_DURATION_MS: u64 = 5 * 60 * 1000;
/// Long break length (15 minutes)
pub const LONG_BREAK_DURATION_MS: u64 = 15 * 60 * 1000;
/// Number of focus sessions per cycle; every N-th completion is followed by a long break
pub const SESSIONS_PER_CYCLE: u32 = 4;

/// Maximum length of a room identifier
pub const ROOM_ID_MAX_LENGTH: usize = 32;
/// Maximum length of a display name (in characters)
pub const PARTICIPANT_NAME_MAX_LENGTH: usize = 64;
/// Name used when a client does not provide one
pub const ANONYMOUS_NAME: &str = "Anonymous";

/// Kind of a Pomodoro interval
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionKind {
    Focus,
    ShortBreak,
    LongBreak,
}

impl SessionKind {
    /// Fixed length of this session kind in milliseconds
    pub fn duration_ms(self) -> u64 {
        match self {
            SessionKind::Focus => FOCUS_DURATION_MS,
            SessionKind::ShortBreak => SHORT_BREAK_DURATION_MS,
            SessionKind::LongBreak => LONG_BREAK_DURATION_MS,
        }
    }

    /// The session that follows this one.
    ///
    /// `sessions_completed` is the room counter *after* the finishing session was counted.
    pub fn next(self, sessions_completed: u32) -> SessionKind {
        match self {
            SessionKind::Focus if sessions_completed % SESSIONS_PER_CYCLE == 0 => {
                SessionKind::LongBreak
            }
            SessionKind::Focus => SessionKind::ShortBreak,
            SessionKind::ShortBreak | SessionKind::LongBreak => SessionKind::Focus,
        }
    }
}

impl fmt::Display for SessionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SessionKind::Focus => "focus",
            SessionKind::ShortBreak => "shortBreak",
            SessionKind::LongBreak => "longBreak",
        };
        f.write_str(label)
    }
}

/// Unix timestamp in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn new(millis: i64) -> Self {
        Self(millis)
    }

    pub fn value(&self) -> i64 {
        self.0
    }

    /// `self + millis`, saturating at `i64::MAX`
    pub fn add_millis(&self, millis: u64) -> Self {
        Self(self.0.saturating_add_unsigned(millis))
    }

    /// Milliseconds from `self` until `later`, clamped to zero
    pub fn millis_until(&self, later: Timestamp) -> u64 {
        u64::try_from(later.0.saturating_sub(self.0)).unwrap_or(0)
    }
}

/// Short alphanumeric room code (e.g. `"3f9a1c2b"`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RoomId(String);

impl RoomId {
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        if value.is_empty() {
            return Err(ValueObjectError::EmptyRoomId);
        }
        if value.len() > ROOM_ID_MAX_LENGTH {
            return Err(ValueObjectError::RoomIdTooLong {
                max: ROOM_ID_MAX_LENGTH,
                actual: value.len(),
            });
        }
        if !value.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(ValueObjectError::InvalidRoomId(value));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for RoomId {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of one connected participant (one per WebSocket connection)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ParticipantId(String);

impl ParticipantId {
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        if value.trim().is_empty() {
            return Err(ValueObjectError::EmptyParticipantId);
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for ParticipantId {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Display name of a participant or room creator.
///
/// Surrounding whitespace is trimmed and a blank name becomes [`ANONYMOUS_NAME`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ParticipantName(String);

impl ParticipantName {
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Ok(Self::anonymous());
        }
        let length = trimmed.chars().count();
        if length > PARTICIPANT_NAME_MAX_LENGTH {
            return Err(ValueObjectError::NameTooLong {
                max: PARTICIPANT_NAME_MAX_LENGTH,
                actual: length,
            });
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Build a name from an optional client-supplied value
    pub fn from_optional(value: Option<String>) -> Result<Self, ValueObjectError> {
        match value {
            Some(value) => Self::new(value),
            None => Ok(Self::anonymous()),
        }
    }

    pub fn anonymous() -> Self {
        Self(ANONYMOUS_NAME.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for ParticipantName {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}
