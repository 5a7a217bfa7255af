//! Statistics printing.

use log::info;

use crate::error_handling::FailureStats;
use crate::scheduler::MonitorEngine;

/// Logs the session summary and failure statistics.
pub async fn print_final_statistics(engine: &MonitorEngine, elapsed_seconds: f64) {
    let metrics = engine.summarize().await;
    info!(
        "✅ Ran {} cycle{} over {} endpoint{} in {:.1}s (last cycle: {} online, {} failed, avg {:.0}ms)",
        engine.cycles_completed(),
        if engine.cycles_completed() == 1 { "" } else { "s" },
        metrics.total,
        if metrics.total == 1 { "" } else { "s" },
        elapsed_seconds,
        metrics.online_count,
        metrics.failed_count,
        metrics.mean_response_time_ms
    );
    info!("Identity refreshed {} times", engine.identity_refreshes());

    print_error_statistics(&engine.failure_stats());
}

/// Prints failure counts by category to the log.
pub fn print_error_statistics(stats: &FailureStats) {
    let total = stats.total_errors();
    if total == 0 {
        info!("No probe or identity failures recorded");
        return;
    }

    info!(
        "Failure statistics ({} total: {} probe, {} identity):",
        total,
        stats.total_probe_failures(),
        stats.total_identity_failures()
    );
    for (error_type, count) in stats.non_zero() {
        info!("   {}: {}", error_type, count);
    }
}
