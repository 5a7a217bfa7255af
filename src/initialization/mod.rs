//! Application initialization and resource setup.
//!
//! This module provides functions to initialize all shared resources:
//! - Logger (plain or JSON)
//! - HTTP client for reachability probes
//! - HTTP client for identity lookups
//!
//! All initialization functions return proper error types for error handling.

mod client;
mod logger;

// Re-export public API
pub use client::{init_identity_client, init_probe_client};
pub use logger::init_logger_with;
