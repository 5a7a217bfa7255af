//! Status server data structures.

use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;

use crate::identity::IdentitySnapshot;
use crate::metrics::{HistoryEntry, Metrics};
use crate::models::CheckResult;
use crate::scheduler::MonitorEngine;

/// Shared state for the status server
#[derive(Clone)]
pub struct StatusState {
    pub engine: Arc<MonitorEngine>,
    pub start_time: Arc<Instant>,
}

impl StatusState {
    pub fn new(engine: Arc<MonitorEngine>) -> Self {
        Self {
            engine,
            start_time: Arc::new(Instant::now()),
        }
    }
}

/// JSON response for `/status` endpoint
#[derive(Serialize)]
pub struct StatusResponse {
    pub monitoring: bool,
    pub elapsed_seconds: f64,
    pub cycles_completed: usize,
    pub identity_refreshes: usize,
    pub summary: Metrics,
    /// In configured endpoint order.
    pub endpoints: Vec<EndpointStatus>,
    pub identity: IdentitySnapshot,
    pub errors: ErrorCounts,
}

#[derive(Serialize)]
pub struct EndpointStatus {
    pub endpoint: String,
    pub url: String,
    #[serde(flatten)]
    pub result: CheckResult,
}

#[derive(Serialize)]
pub struct ErrorCounts {
    pub total: usize,
    pub probe: usize,
    pub identity: usize,
    /// Non-zero counters keyed by category name.
    pub by_type: Vec<ErrorTypeCount>,
}

#[derive(Serialize)]
pub struct ErrorTypeCount {
    pub error_type: &'static str,
    pub count: usize,
}

/// JSON response for `/history`
#[derive(Serialize)]
pub struct HistoryResponse {
    pub capacity: usize,
    pub entries: Vec<HistoryEntry>,
}

/// JSON response for the monitoring control endpoints
#[derive(Serialize)]
pub struct ControlResponse {
    pub monitoring: bool,
    /// Whether the request changed the state.
    pub changed: bool,
}
