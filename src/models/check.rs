//! Per-endpoint check results.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error_handling::{ErrorType, ProbeFailure};

/// Reachability status of one endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    /// The last probe completed an HTTP exchange.
    Online,
    /// The last probe timed out or hit a transport error.
    Failed,
    /// No probe has completed for this endpoint in this session.
    Pending,
}

impl CheckStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckStatus::Online => "Online",
            CheckStatus::Failed => "Offline",
            CheckStatus::Pending => "Pending",
        }
    }
}

/// Result of checking one endpoint in one cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckResult {
    pub status: CheckStatus,
    /// Human-readable summary: latency, failure reason, or "Pending".
    pub message: String,
    /// Elapsed wall-clock time of the probe, also reported for failures.
    pub response_time_ms: u64,
    /// Completion time; `None` while pending.
    pub checked_at: Option<DateTime<Utc>>,
    /// Failure classification for `Failed` results.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<ProbeFailure>,
    /// Detailed failure category, when the probe could tell.
    #[serde(skip)]
    pub error_type: Option<ErrorType>,
}

impl CheckResult {
    /// Placeholder used before the first completed cycle.
    pub fn pending() -> Self {
        Self {
            status: CheckStatus::Pending,
            message: "Pending".to_string(),
            response_time_ms: 0,
            checked_at: None,
            failure: None,
            error_type: None,
        }
    }

    /// A probe that completed an HTTP exchange after `response_time_ms`.
    pub fn online(response_time_ms: u64) -> Self {
        Self {
            status: CheckStatus::Online,
            message: format!("Response in {}ms", response_time_ms),
            response_time_ms,
            checked_at: Some(Utc::now()),
            failure: None,
            error_type: None,
        }
    }

    /// A probe that failed after `response_time_ms`.
    pub fn failed(failure: ProbeFailure, response_time_ms: u64) -> Self {
        Self {
            status: CheckStatus::Failed,
            message: failure.to_string(),
            response_time_ms,
            checked_at: Some(Utc::now()),
            failure: Some(failure),
            error_type: None,
        }
    }

    /// Attaches the detailed failure category.
    pub fn with_error_type(mut self, error_type: ErrorType) -> Self {
        self.error_type = Some(error_type);
        self
    }

    /// Failure category used for the session statistics.
    ///
    /// Falls back to a category derived from the classification when the probe
    /// did not attach one. `None` for non-failed results.
    pub fn failure_category(&self) -> Option<ErrorType> {
        match (self.failure, self.error_type) {
            (None, _) => None,
            (Some(_), Some(error_type)) => Some(error_type),
            (Some(ProbeFailure::Timeout), None) => Some(ErrorType::ProbeTimeout),
            (Some(ProbeFailure::NoResponse), None) => Some(ErrorType::ProbeOtherError),
        }
    }

    pub fn is_online(&self) -> bool {
        self.status == CheckStatus::Online
    }

    pub fn is_failed(&self) -> bool {
        self.status == CheckStatus::Failed
    }
}
