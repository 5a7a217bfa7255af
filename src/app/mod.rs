//! Main application modules.
//!
//! This module provides URL validation, operator commands, summary logging,
//! shutdown handling and statistics printing used by the main application.

pub mod commands;
pub mod logging;
pub mod shutdown;
pub mod statistics;
pub mod url;

// Re-export public API
pub use commands::{apply_command, OperatorCommand};
pub use logging::spawn_summary_logger;
pub use shutdown::shutdown_gracefully;
pub use statistics::print_final_statistics;
pub use url::validate_and_normalize_url;
