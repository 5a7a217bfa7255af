//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `net_status` library that handles:
//! - Command-line argument parsing
//! - Environment variable loading (.env file)
//! - Logger initialization
//! - User-facing output formatting
//!
//! All core functionality is implemented in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use std::process;

use net_status::initialization::init_logger_with;
use net_status::{run_monitor, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file (if it exists), so RUST_LOG can
    // be set there
    let _ = dotenvy::dotenv();

    let config = Config::parse();

    let log_level = config.log_level.clone();
    let log_format = config.log_format.clone();
    init_logger_with(log_level.into(), log_format).context("Failed to initialize logger")?;

    match run_monitor(config).await {
        Ok(report) => {
            println!(
                "✅ Ran {} cycle{} over {} endpoint{} in {:.1}s ({} online, {} failed in the last cycle, {} failures total)",
                report.cycles_completed,
                if report.cycles_completed == 1 { "" } else { "s" },
                report.endpoints,
                if report.endpoints == 1 { "" } else { "s" },
                report.elapsed_seconds,
                report.final_metrics.online_count,
                report.final_metrics.failed_count,
                report.total_failures
            );
            Ok(())
        }
        Err(e) => {
            eprintln!("net_status error: {:#}", e);
            process::exit(1);
        }
    }
}
