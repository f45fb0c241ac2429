//! Utilities shared across the Shuchu packages.

pub mod logger;
pub mod time;
