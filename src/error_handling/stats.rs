//! Failure statistics tracking.
//!
//! Thread-safe counters for every probe and identity failure seen during the
//! monitoring session.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use strum::IntoEnumIterator;

use super::types::ErrorType;

/// Thread-safe failure statistics tracker.
///
/// Uses one atomic counter per `ErrorType`, all initialized to zero on creation,
/// so it can be shared across probe tasks through an `Arc`.
pub struct FailureStats {
    errors: HashMap<ErrorType, AtomicUsize>,
}

impl FailureStats {
    pub fn new() -> Self {
        let mut errors = HashMap::new();
        for error in ErrorType::iter() {
            errors.insert(error, AtomicUsize::new(0));
        }
        FailureStats { errors }
    }

    /// Increment an error counter.
    pub fn increment_error(&self, error: ErrorType) {
        if let Some(counter) = self.errors.get(&error) {
            counter.fetch_add(1, Ordering::Relaxed);
        } else {
            log::error!(
                "Attempted to increment error counter for {:?} which is not in the map. \
                 This indicates a bug in FailureStats initialization.",
                error
            );
        }
    }

    /// Get the count for an error type.
    pub fn get_error_count(&self, error: ErrorType) -> usize {
        self.errors
            .get(&error)
            .map(|c| c.load(Ordering::SeqCst))
            .unwrap_or(0)
    }

    /// Get total error count across all error types.
    pub fn total_errors(&self) -> usize {
        ErrorType::iter().map(|e| self.get_error_count(e)).sum()
    }

    /// Total probe failures (timeouts and transport errors).
    pub fn total_probe_failures(&self) -> usize {
        ErrorType::iter()
            .filter(ErrorType::is_probe)
            .map(|e| self.get_error_count(e))
            .sum()
    }

    /// Total identity lookup failures.
    pub fn total_identity_failures(&self) -> usize {
        ErrorType::iter()
            .filter(|e| !e.is_probe())
            .map(|e| self.get_error_count(e))
            .sum()
    }

    /// Non-zero counters in catalogue order, for reporting.
    pub fn non_zero(&self) -> Vec<(ErrorType, usize)> {
        ErrorType::iter()
            .map(|e| (e, self.get_error_count(e)))
            .filter(|(_, count)| *count > 0)
            .collect()
    }
}

impl Default for FailureStats {
    fn default() -> Self {
        Self::new()
    }
}
