//! Derived counters and history for committed cycles.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::history::{HistoryBuffer, HistoryEntry};
use crate::models::{CheckStatus, Endpoint, StatusSnapshot};

/// Summary counters over the current snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Metrics {
    pub total: usize,
    pub online_count: usize,
    pub failed_count: usize,
    pub pending_count: usize,
    pub online_ratio: f64,
    pub failed_ratio: f64,
    /// Mean over Online entries; 0 when nothing is online.
    pub mean_response_time_ms: f64,
    pub last_update: Option<DateTime<Utc>>,
}

/// Holds the published snapshot, its derived counters and the cycle history.
///
/// Only the monitoring timeline commits; readers take `Arc` clones of the
/// snapshot, so a commit never exposes a half-updated map.
#[derive(Debug, Clone)]
pub struct MetricsAggregator {
    snapshot: Arc<StatusSnapshot>,
    history: HistoryBuffer,
    online_count: usize,
    failed_count: usize,
    mean_response_time_ms: f64,
    last_update: Option<DateTime<Utc>>,
}

impl MetricsAggregator {
    /// Starts with every endpoint pending and an empty history.
    pub fn new(endpoints: &[Endpoint]) -> Self {
        Self::with_history(endpoints, HistoryBuffer::default())
    }

    pub fn with_history(endpoints: &[Endpoint], history: HistoryBuffer) -> Self {
        Self {
            snapshot: Arc::new(StatusSnapshot::pending(endpoints)),
            history,
            online_count: 0,
            failed_count: 0,
            mean_response_time_ms: 0.0,
            last_update: None,
        }
    }

    /// Publishes a completed cycle's snapshot and appends one history entry.
    pub fn commit(&mut self, snapshot: StatusSnapshot) -> HistoryEntry {
        let now = Utc::now();

        let mut online = 0usize;
        let mut failed = 0usize;
        let mut online_time_total = 0u64;
        for (_, result) in snapshot.iter() {
            match result.status {
                CheckStatus::Online => {
                    online += 1;
                    online_time_total = online_time_total.saturating_add(result.response_time_ms);
                }
                CheckStatus::Failed => failed += 1,
                CheckStatus::Pending => {}
            }
        }

        self.online_count = online;
        self.failed_count = failed;
        self.mean_response_time_ms = online_time_total as f64 / online.max(1) as f64;
        self.last_update = Some(now);

        let entry = HistoryEntry {
            time: now,
            online_count: online,
            total: snapshot.len(),
        };
        self.snapshot = Arc::new(snapshot);
        self.history.push(entry);
        entry
    }

    pub fn summarize(&self) -> Metrics {
        let total = self.snapshot.len();
        let pending_count = total.saturating_sub(self.online_count + self.failed_count);
        let ratio = |count: usize| {
            if total == 0 {
                0.0
            } else {
                count as f64 / total as f64
            }
        };

        Metrics {
            total,
            online_count: self.online_count,
            failed_count: self.failed_count,
            pending_count,
            online_ratio: ratio(self.online_count),
            failed_ratio: ratio(self.failed_count),
            mean_response_time_ms: self.mean_response_time_ms,
            last_update: self.last_update,
        }
    }

    pub fn snapshot(&self) -> Arc<StatusSnapshot> {
        Arc::clone(&self.snapshot)
    }

    pub fn history(&self) -> Vec<HistoryEntry> {
        self.history.to_vec()
    }

    pub fn latest_history(&self) -> Option<HistoryEntry> {
        self.history.latest().copied()
    }
}
