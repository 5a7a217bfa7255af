//! Scheduling of batch checks and identity refreshes.
//!
//! `MonitorEngine` owns all mutable state and two timelines: a fixed-period
//! monitoring timeline toggled by the operator, and an always-on identity
//! timeline with a randomized period.

mod engine;
mod timeline;

pub use engine::MonitorEngine;
