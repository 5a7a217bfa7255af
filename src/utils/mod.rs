//! Utility functions.
//!
//! This module provides timing helpers shared by the probe and the scheduler.

mod timing;

pub use timing::{duration_to_ms, jittered_delay};
