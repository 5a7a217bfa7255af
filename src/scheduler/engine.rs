//! The monitoring engine: shared state plus timeline ownership.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use log::{debug, info, warn};
use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use super::timeline::{identity_loop, monitoring_loop};
use crate::batch::run_cycle;
use crate::config::ScheduleSettings;
use crate::error_handling::{ConfigError, FailureStats};
use crate::identity::{IdentityFetcher, IdentitySnapshot};
use crate::metrics::{HistoryEntry, Metrics, MetricsAggregator};
use crate::models::{Endpoint, StatusSnapshot};
use crate::probe::ReachabilityProbe;

/// State shared between the engine and its timeline tasks.
///
/// Metrics are written only by the monitoring timeline and identity only by the
/// identity timeline.
pub(crate) struct EngineShared {
    pub(crate) endpoints: Vec<Endpoint>,
    pub(crate) probe: Arc<dyn ReachabilityProbe>,
    pub(crate) identity_fetcher: Arc<dyn IdentityFetcher>,
    pub(crate) settings: ScheduleSettings,
    pub(crate) metrics: RwLock<MetricsAggregator>,
    pub(crate) identity: RwLock<IdentitySnapshot>,
    pub(crate) failure_stats: Arc<FailureStats>,
    /// Held for the whole duration of a monitoring cycle.
    pub(crate) cycle_lock: Mutex<()>,
    /// Held while deciding whether a cycle may start, and while cancelling.
    start_gate: Mutex<()>,
    pub(crate) cycles_started: AtomicUsize,
    pub(crate) cycles_completed: AtomicUsize,
    pub(crate) identity_refreshes: AtomicUsize,
}

impl EngineShared {
    /// Registers a cycle start unless `cancel` has fired.
    ///
    /// Cancellation goes through the same gate, so once a stop has returned no
    /// cycle can pass this check.
    pub(crate) async fn try_begin_cycle(&self, cancel: &CancellationToken) -> bool {
        let _gate = self.start_gate.lock().await;
        if cancel.is_cancelled() {
            return false;
        }
        self.cycles_started.fetch_add(1, Ordering::SeqCst);
        true
    }

    async fn cancel_gated(&self, cancel: &CancellationToken) {
        let _gate = self.start_gate.lock().await;
        cancel.cancel();
    }

    /// Runs one batch cycle and commits its snapshot.
    pub(crate) async fn run_monitoring_cycle(&self) {
        debug!("Starting batch cycle over {} endpoints", self.endpoints.len());
        let snapshot = run_cycle(&self.probe, &self.endpoints, self.settings.probe_timeout).await;

        for (endpoint, result) in snapshot.iter() {
            if let Some(category) = result.failure_category() {
                debug!("{}: {} ({})", endpoint, result.message, category);
                self.failure_stats.increment_error(category);
            }
        }

        let entry = self.metrics.write().await.commit(snapshot);
        let completed = self.cycles_completed.fetch_add(1, Ordering::SeqCst) + 1;
        info!(
            "Cycle {} complete: {}/{} online",
            completed, entry.online_count, entry.total
        );
    }
}

struct TimelineHandle {
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

/// Owns the monitored endpoint set, all derived state and both timelines.
///
/// The identity timeline runs from `start` until `shutdown`. The monitoring
/// timeline is switched on and off by the operator; switching it off cancels
/// the pending tick but lets an in-flight cycle finish and commit.
pub struct MonitorEngine {
    shared: Arc<EngineShared>,
    monitoring: Mutex<Option<TimelineHandle>>,
    monitoring_active: AtomicBool,
    identity_timeline: Mutex<Option<TimelineHandle>>,
    shutdown: CancellationToken,
}

impl MonitorEngine {
    /// # Errors
    ///
    /// Returns a `ConfigError` if `settings` holds a zero period or inverted
    /// identity bounds.
    pub fn new(
        endpoints: Vec<Endpoint>,
        probe: Arc<dyn ReachabilityProbe>,
        identity_fetcher: Arc<dyn IdentityFetcher>,
        settings: ScheduleSettings,
    ) -> Result<Self, ConfigError> {
        settings.validate()?;
        let metrics = MetricsAggregator::new(&endpoints);
        Ok(Self {
            shared: Arc::new(EngineShared {
                endpoints,
                probe,
                identity_fetcher,
                settings,
                metrics: RwLock::new(metrics),
                identity: RwLock::new(IdentitySnapshot::Pending),
                failure_stats: Arc::new(FailureStats::new()),
                cycle_lock: Mutex::new(()),
                start_gate: Mutex::new(()),
                cycles_started: AtomicUsize::new(0),
                cycles_completed: AtomicUsize::new(0),
                identity_refreshes: AtomicUsize::new(0),
            }),
            monitoring: Mutex::new(None),
            monitoring_active: AtomicBool::new(false),
            identity_timeline: Mutex::new(None),
            shutdown: CancellationToken::new(),
        })
    }

    /// Starts the identity timeline. Calling it again is a no-op.
    pub async fn start(&self) {
        let mut slot = self.identity_timeline.lock().await;
        if slot.is_some() || self.shutdown.is_cancelled() {
            return;
        }
        let cancel = self.shutdown.child_token();
        let task = tokio::spawn(identity_loop(Arc::clone(&self.shared), cancel.clone()));
        *slot = Some(TimelineHandle { cancel, task });
        info!("Identity timeline started");
    }

    /// Enters the Running state: one cycle now, then one per batch interval.
    ///
    /// Returns `false` if monitoring was already running or the engine is shut down.
    pub async fn start_monitoring(&self) -> bool {
        let mut slot = self.monitoring.lock().await;
        self.start_locked(&mut slot)
    }

    /// Enters the Stopped state.
    ///
    /// No cycle starts after this returns. A cycle already in flight runs to
    /// completion and its result is committed. Returns `false` if monitoring
    /// was not running.
    pub async fn stop_monitoring(&self) -> bool {
        let mut slot = self.monitoring.lock().await;
        self.stop_locked(&mut slot).await
    }

    /// Flips the monitoring state and returns the new one (`true` = running).
    pub async fn toggle_monitoring(&self) -> bool {
        let mut slot = self.monitoring.lock().await;
        if slot.is_some() {
            self.stop_locked(&mut slot).await;
        } else {
            self.start_locked(&mut slot);
        }
        slot.is_some()
    }

    fn start_locked(&self, slot: &mut Option<TimelineHandle>) -> bool {
        if slot.is_some() || self.shutdown.is_cancelled() {
            return false;
        }
        let cancel = self.shutdown.child_token();
        let task = tokio::spawn(monitoring_loop(Arc::clone(&self.shared), cancel.clone()));
        *slot = Some(TimelineHandle { cancel, task });
        self.monitoring_active.store(true, Ordering::SeqCst);
        info!(
            "Monitoring started: {} endpoints every {}ms",
            self.shared.endpoints.len(),
            self.shared.settings.batch_interval.as_millis()
        );
        true
    }

    async fn stop_locked(&self, slot: &mut Option<TimelineHandle>) -> bool {
        let Some(handle) = slot.take() else {
            return false;
        };
        self.shared.cancel_gated(&handle.cancel).await;
        // Detached: the task exits on its own once any in-flight cycle commits.
        drop(handle.task);
        self.monitoring_active.store(false, Ordering::SeqCst);
        info!("Monitoring stopped");
        true
    }

    pub fn is_monitoring(&self) -> bool {
        self.monitoring_active.load(Ordering::SeqCst)
    }

    /// Current snapshot; every configured endpoint has exactly one entry.
    pub async fn status_snapshot(&self) -> Arc<StatusSnapshot> {
        self.shared.metrics.read().await.snapshot()
    }

    pub async fn summarize(&self) -> Metrics {
        self.shared.metrics.read().await.summarize()
    }

    /// Snapshot and its summary, read under one lock so both describe the same cycle.
    pub async fn status_view(&self) -> (Arc<StatusSnapshot>, Metrics) {
        let metrics = self.shared.metrics.read().await;
        (metrics.snapshot(), metrics.summarize())
    }

    /// Cycle history, oldest first.
    pub async fn history(&self) -> Vec<HistoryEntry> {
        self.shared.metrics.read().await.history()
    }

    pub async fn identity(&self) -> IdentitySnapshot {
        self.shared.identity.read().await.clone()
    }

    pub fn endpoints(&self) -> &[Endpoint] {
        &self.shared.endpoints
    }

    pub fn settings(&self) -> ScheduleSettings {
        self.shared.settings
    }

    pub fn failure_stats(&self) -> Arc<FailureStats> {
        Arc::clone(&self.shared.failure_stats)
    }

    pub fn cycles_started(&self) -> usize {
        self.shared.cycles_started.load(Ordering::SeqCst)
    }

    pub fn cycles_completed(&self) -> usize {
        self.shared.cycles_completed.load(Ordering::SeqCst)
    }

    pub fn identity_refreshes(&self) -> usize {
        self.shared.identity_refreshes.load(Ordering::SeqCst)
    }

    /// Stops both timelines and waits for them to exit.
    ///
    /// An in-flight monitoring cycle is allowed to finish and commit; an
    /// in-flight identity fetch is abandoned.
    pub async fn shutdown(&self) {
        self.shared.cancel_gated(&self.shutdown).await;
        self.monitoring_active.store(false, Ordering::SeqCst);

        let monitoring = self.monitoring.lock().await.take();
        let identity = self.identity_timeline.lock().await.take();
        for (name, handle) in [("monitoring", monitoring), ("identity", identity)] {
            if let Some(handle) = handle {
                handle.cancel.cancel();
                if let Err(e) = handle.task.await {
                    warn!("{} timeline task failed: {}", name, e);
                }
            }
        }
        debug!("Engine shut down");
    }
}
