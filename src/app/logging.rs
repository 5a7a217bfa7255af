//! Summary logging utilities.

use std::sync::Arc;
use std::time::Duration;

use log::info;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::scheduler::MonitorEngine;

/// Logs one summary line for the current state of the engine.
pub async fn log_summary(engine: &MonitorEngine) {
    let metrics = engine.summarize().await;
    let identity = engine.identity().await;
    let state = if engine.is_monitoring() {
        "running"
    } else {
        "stopped"
    };

    info!(
        "Monitoring {}: {}/{} online, {} failed, {} pending, avg {:.0}ms over {} cycles | {}",
        state,
        metrics.online_count,
        metrics.total,
        metrics.failed_count,
        metrics.pending_count,
        metrics.mean_response_time_ms,
        engine.cycles_completed(),
        identity.summary()
    );
}

/// Logs a summary every `interval` while monitoring is running, until `cancel` fires.
pub fn spawn_summary_logger(
    engine: Arc<MonitorEngine>,
    interval: Duration,
    cancel: CancellationToken,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        // The first tick completes immediately; skip it.
        ticker.tick().await;
        loop {
            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = ticker.tick() => {
                    if engine.is_monitoring() {
                        log_summary(&engine).await;
                    }
                }
            }
        }
    })
}
