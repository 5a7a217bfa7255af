//! Operator commands read from stdin.

use std::str::FromStr;

use log::info;

use super::logging::log_summary;
use crate::scheduler::MonitorEngine;

/// One line of operator input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperatorCommand {
    Start,
    Stop,
    /// Also produced by an empty line.
    Toggle,
    Status,
    Quit,
}

impl FromStr for OperatorCommand {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        match line.trim().to_ascii_lowercase().as_str() {
            "start" => Ok(OperatorCommand::Start),
            "stop" => Ok(OperatorCommand::Stop),
            "" | "toggle" | "t" => Ok(OperatorCommand::Toggle),
            "status" | "s" => Ok(OperatorCommand::Status),
            "quit" | "exit" | "q" => Ok(OperatorCommand::Quit),
            other => Err(format!(
                "Unknown command '{}' (expected start, stop, toggle, status or quit)",
                other
            )),
        }
    }
}

/// Applies `command` to the engine. Returns `false` when the session should end.
pub async fn apply_command(engine: &MonitorEngine, command: OperatorCommand) -> bool {
    match command {
        OperatorCommand::Start => {
            if !engine.start_monitoring().await {
                info!("Monitoring is already running");
            }
        }
        OperatorCommand::Stop => {
            if !engine.stop_monitoring().await {
                info!("Monitoring is already stopped");
            }
        }
        OperatorCommand::Toggle => {
            engine.toggle_monitoring().await;
        }
        OperatorCommand::Status => log_summary(engine).await,
        OperatorCommand::Quit => return false,
    }
    true
}
