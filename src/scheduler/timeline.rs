//! The two periodic timelines driven by the engine.
//!
//! Both loops run as spawned tasks and exit when their cancellation token
//! fires. The monitoring loop ticks on a fixed grid; the identity loop picks a
//! fresh random delay after every refresh.

use std::sync::atomic::Ordering;
use std::sync::Arc;

use log::{debug, info};
use tokio::time::{interval, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use super::engine::EngineShared;
use crate::identity::refresh_identity;
use crate::utils::jittered_delay;

/// Fixed-period batch cycles until `cancel` fires.
///
/// The first tick completes immediately, so entering the loop runs one cycle
/// right away. Ticks missed while a cycle overruns are skipped.
pub(crate) async fn monitoring_loop(shared: Arc<EngineShared>, cancel: CancellationToken) {
    let mut ticker = interval(shared.settings.batch_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            _ = ticker.tick() => {}
        }

        // Serializes with a cycle left in flight by a previous stop.
        let _cycle = shared.cycle_lock.lock().await;
        if !shared.try_begin_cycle(&cancel).await {
            break;
        }
        shared.run_monitoring_cycle().await;
    }

    debug!("Monitoring timeline exited");
}

/// Identity refreshes with a jittered delay between them, until `cancel` fires.
pub(crate) async fn identity_loop(shared: Arc<EngineShared>, cancel: CancellationToken) {
    loop {
        let snapshot = tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            snapshot = refresh_identity(shared.identity_fetcher.as_ref(), &shared.failure_stats) => snapshot,
        };
        *shared.identity.write().await = snapshot;
        shared.identity_refreshes.fetch_add(1, Ordering::SeqCst);

        let delay = jittered_delay(
            shared.settings.identity_refresh_min,
            shared.settings.identity_refresh_max,
        );
        debug!("Next identity refresh in {}ms", delay.as_millis());

        tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            _ = tokio::time::sleep(delay) => {}
        }
    }

    info!("Identity timeline stopped");
}
