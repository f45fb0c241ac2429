//! Domain layer: room timer model and the interfaces it needs.

pub mod achievement;
pub mod entity;
pub mod error;
pub mod event;
pub mod factory;
pub mod message_pusher;
pub mod repository;
pub mod value_object;

pub use achievement::Achievement;
pub use entity::{
    Participant, Room, RoomStats, SessionCompletion, TickResult, TimerAction, TimerState,
    TimerTransition,
};
pub use error::{MessagePushError, RepositoryError, ValueObjectError};
pub use event::RoomEvent;
pub use factory::{ParticipantIdFactory, RoomIdFactory};
pub use message_pusher::{MessagePusher, PusherChannel};
pub use repository::{JoinOutcome, LeaveOutcome, RoomRepository, TickOutcome, TimerOutcome};
pub use value_object::{ParticipantId, ParticipantName, RoomId, SessionKind, Timestamp};

#[cfg(test)]
pub use message_pusher::MockMessagePusher;
