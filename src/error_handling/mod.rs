//! Error handling and failure statistics.
//!
//! This module provides:
//! - Error type definitions (initialization, configuration, identity lookup)
//! - Probe failure classification (`Timeout` / `No response`)
//! - Session failure statistics by category
//!
//! No per-endpoint or identity failure is ever fatal; they are all converted to
//! typed results and counted here.

mod categorization;
mod stats;
mod types;

// Re-export public API
pub use categorization::{categorize_identity_error, categorize_probe_error};
pub use stats::FailureStats;
pub use types::{ConfigError, ErrorType, IdentityError, InitializationError, ProbeFailure};
