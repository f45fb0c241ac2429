//! Shared application state.

use std::sync::Arc;

use shuchu_shared::time::Clock;

use crate::{
    domain::{MessagePusher, RoomRepository},
    usecase::{
        ConnectClientUseCase, ControlTimerUseCase, CreateRoomUseCase, DisconnectClientUseCase,
        GetRoomUseCase, GetRoomsUseCase, JoinRoomUseCase, LeaveRoomUseCase,
    },
};

/// Use cases reachable from the HTTP and WebSocket handlers
pub struct AppState {
    pub connect_client_usecase: Arc<ConnectClientUseCase>,
    pub disconnect_client_usecase: Arc<DisconnectClientUseCase>,
    pub create_room_usecase: Arc<CreateRoomUseCase>,
    pub get_room_usecase: Arc<GetRoomUseCase>,
    pub get_rooms_usecase: Arc<GetRoomsUseCase>,
    pub join_room_usecase: Arc<JoinRoomUseCase>,
    pub leave_room_usecase: Arc<LeaveRoomUseCase>,
    pub control_timer_usecase: Arc<ControlTimerUseCase>,
}

impl AppState {
    /// Build every handler-facing use case over one registry, pusher and clock.
    pub fn new(
        repository: Arc<dyn RoomRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let leave_room_usecase = Arc::new(LeaveRoomUseCase::new(
            repository.clone(),
            message_pusher.clone(),
        ));

        Self {
            connect_client_usecase: Arc::new(ConnectClientUseCase::new(message_pusher.clone())),
            disconnect_client_usecase: Arc::new(DisconnectClientUseCase::new(
                leave_room_usecase.clone(),
                message_pusher.clone(),
            )),
            create_room_usecase: Arc::new(CreateRoomUseCase::new(
                repository.clone(),
                clock.clone(),
            )),
            get_room_usecase: Arc::new(GetRoomUseCase::new(repository.clone(), clock.clone())),
            get_rooms_usecase: Arc::new(GetRoomsUseCase::new(repository.clone())),
            join_room_usecase: Arc::new(JoinRoomUseCase::new(
                repository.clone(),
                message_pusher.clone(),
                clock.clone(),
            )),
            leave_room_usecase,
            control_timer_usecase: Arc::new(ControlTimerUseCase::new(
                repository,
                message_pusher,
                clock,
            )),
        }
    }
}
