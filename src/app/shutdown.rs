//! Graceful shutdown handling.

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::scheduler::MonitorEngine;

/// Shuts down all background tasks gracefully.
///
/// Stops the summary logger, aborts the status server and then shuts the
/// engine down, letting an in-flight batch cycle commit.
pub async fn shutdown_gracefully(
    engine: &MonitorEngine,
    cancel: CancellationToken,
    logging_task: Option<JoinHandle<()>>,
    status_server_task: Option<JoinHandle<()>>,
) {
    // Signal logging task to stop and await it
    cancel.cancel();
    if let Some(logging_task) = logging_task {
        let _ = logging_task.await;
    }

    if let Some(server) = status_server_task {
        server.abort();
    }

    engine.shutdown().await;
}
