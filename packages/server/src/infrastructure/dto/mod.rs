//! Data Transfer Objects (DTOs) for the room server.
//!
//! DTOs are organized by protocol:
//! - `room`: room snapshot shared by both protocols
//! - `websocket`: inbound commands and outbound events
//! - `http`: HTTP API request/response bodies

pub mod conversion;
pub mod http;
pub mod room;
pub mod websocket;
