//! Shared Pomodoro room server.
//!
//! Layers, from the inside out:
//!
//! - [`domain`]: rooms, timers and the interfaces the core depends on
//! - [`infrastructure`]: in-memory registry, WebSocket pusher, wire DTOs
//! - [`usecase`]: one struct per operation
//! - [`ui`]: axum router, handlers and the ticker task

pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
