//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (intervals, timeouts, default endpoint set)
//! - The `Config` struct, which doubles as the CLI parser
//! - Endpoint list loading and validation

mod constants;
mod types;

// Re-export all constants
pub use constants::*;
pub use types::{Config, LogFormat, LogLevel, ScheduleSettings};
