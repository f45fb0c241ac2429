//! Factories for domain identifiers.

use uuid::Uuid;

use super::{
    error::ValueObjectError,
    value_object::{ParticipantId, RoomId},
};

/// Length of a generated room code
pub const ROOM_CODE_LENGTH: usize = 8;

/// RoomId を生成するファクトリ
pub struct RoomIdFactory;

impl RoomIdFactory {
    /// Generate a short room code: the first 8 hex digits of a random v4 UUID.
    pub fn generate() -> Result<RoomId, ValueObjectError> {
        let uuid = Uuid::new_v4().simple().to_string();
        RoomId::new(uuid[..ROOM_CODE_LENGTH].to_string())
    }
}

/// ParticipantId を生成するファクトリ（接続ごとに 1 つ）
pub struct ParticipantIdFactory;

impl ParticipantIdFactory {
    pub fn generate() -> Result<ParticipantId, ValueObjectError> {
        ParticipantId::new(Uuid::new_v4().to_string())
    }
}
