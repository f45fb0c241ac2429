//! Domain errors.

use thiserror::Error;

/// Value Object の生成時エラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueObjectError {
    #[error("room id must not be empty")]
    EmptyRoomId,

    #[error("room id is too long (max {max}, got {actual})")]
    RoomIdTooLong { max: usize, actual: usize },

    #[error("room id '{0}' must be alphanumeric")]
    InvalidRoomId(String),

    #[error("participant id must not be empty")]
    EmptyParticipantId,

    #[error("name is too long (max {max} characters, got {actual})")]
    NameTooLong { max: usize, actual: usize },
}

/// Repository 操作のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    #[error("room '{0}' not found")]
    RoomNotFound(String),

    #[error("room '{0}' already exists")]
    DuplicateRoomId(String),

    #[error("participant '{0}' not found")]
    ParticipantNotFound(String),
}

/// MessagePusher 操作のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessagePushError {
    #[error("client '{0}' not found")]
    ClientNotFound(String),

    #[error("failed to push message: {0}")]
    PushFailed(String),

    #[error("failed to encode message: {0}")]
    EncodeFailed(String),
}
