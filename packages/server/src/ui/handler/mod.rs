mod http;
mod websocket;

pub use http::{create_room, get_room, get_rooms, health_check};
pub use websocket::websocket_handler;
