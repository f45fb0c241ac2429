//! HTTP / WebSocket surface of the room server.

mod handler;
mod server;
mod signal;
pub mod state;
mod ticker;

pub use server::{Server, ServerConfig, router};
pub use ticker::spawn_ticker;
