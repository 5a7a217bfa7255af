//! Complete per-cycle result set.

use indexmap::IndexMap;
use serde::Serialize;

use super::check::{CheckResult, CheckStatus};
use super::endpoint::Endpoint;

/// Results for the full endpoint set, keyed by endpoint in configured order.
///
/// A snapshot is built in one piece (all pending, or from a finished batch
/// cycle) and never mutated afterwards; readers share it through an `Arc`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct StatusSnapshot {
    results: IndexMap<Endpoint, CheckResult>,
}

impl StatusSnapshot {
    /// A snapshot with every endpoint pending.
    pub fn pending(endpoints: &[Endpoint]) -> Self {
        endpoints
            .iter()
            .map(|endpoint| (endpoint.clone(), CheckResult::pending()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn get(&self, endpoint: &Endpoint) -> Option<&CheckResult> {
        self.results.get(endpoint)
    }

    /// Looks a result up by configured endpoint name.
    pub fn get_by_name(&self, name: &str) -> Option<&CheckResult> {
        self.results
            .iter()
            .find(|(endpoint, _)| endpoint.name() == name)
            .map(|(_, result)| result)
    }

    /// Iterates in configured endpoint order, independent of completion order.
    pub fn iter(&self) -> impl Iterator<Item = (&Endpoint, &CheckResult)> {
        self.results.iter()
    }

    /// Endpoints in configured order.
    pub fn endpoints(&self) -> impl Iterator<Item = &Endpoint> {
        self.results.keys()
    }

    /// Number of entries with the given status.
    pub fn count(&self, status: CheckStatus) -> usize {
        self.results
            .values()
            .filter(|result| result.status == status)
            .count()
    }
}

impl FromIterator<(Endpoint, CheckResult)> for StatusSnapshot {
    fn from_iter<I: IntoIterator<Item = (Endpoint, CheckResult)>>(iter: I) -> Self {
        Self {
            results: iter.into_iter().collect(),
        }
    }
}
