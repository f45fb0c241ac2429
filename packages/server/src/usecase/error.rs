//! UseCase 層のエラー定義

use thiserror::Error;

use crate::domain::{MessagePushError, RepositoryError, ValueObjectError};

/// Reason sent to clients for commands that target an unknown room
pub const ROOM_NOT_FOUND_REASON: &str = "Room not found";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConnectError {
    #[error("failed to allocate participant id: {0}")]
    InvalidParticipantId(ValueObjectError),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CreateRoomError {
    #[error("invalid creator name: {0}")]
    InvalidName(ValueObjectError),

    #[error("failed to generate room id: {0}")]
    IdGeneration(ValueObjectError),

    #[error("could not allocate a unique room id after {0} attempts")]
    RoomIdExhausted(usize),

    #[error("repository error: {0}")]
    Repository(RepositoryError),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoomLookupError {
    #[error("Room not found")]
    RoomNotFound(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JoinRoomError {
    #[error("Room not found")]
    RoomNotFound(String),

    #[error("invalid user name: {0}")]
    InvalidName(ValueObjectError),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LeaveRoomError {
    #[error("Room not found")]
    RoomNotFound(String),

    #[error("participant '{0}' is not in the room")]
    NotAParticipant(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimerControlError {
    #[error("Room not found")]
    RoomNotFound(String),
}

/// Failure while ticking a single room
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TickError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error(transparent)]
    Push(#[from] MessagePushError),
}
