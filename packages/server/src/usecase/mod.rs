//! UseCase layer: one struct per operation, depending only on domain interfaces.

mod connect_client;
mod control_timer;
mod create_room;
mod disconnect_client;
mod error;
mod get_room;
mod join_room;
mod leave_room;
mod notify;
mod tick_timers;

pub use connect_client::ConnectClientUseCase;
pub use control_timer::ControlTimerUseCase;
pub use create_room::{CreateRoomUseCase, MAX_ROOM_ID_ATTEMPTS};
pub use disconnect_client::DisconnectClientUseCase;
pub use error::{
    ConnectError, CreateRoomError, JoinRoomError, LeaveRoomError, ROOM_NOT_FOUND_REASON,
    RoomLookupError, TickError, TimerControlError,
};
pub use get_room::{GetRoomUseCase, GetRoomsUseCase};
pub use join_room::JoinRoomUseCase;
pub use leave_room::LeaveRoomUseCase;
pub use tick_timers::{TickReport, TickTimersUseCase};

use crate::domain::RoomId;

/// Parse a client-supplied room id. Malformed ids can never name a room.
fn parse_room_id(raw: &str) -> Option<RoomId> {
    RoomId::new(raw.to_string()).ok()
}
