// Shared test helpers: scripted probe and identity implementations and
// polling utilities for engine state.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use net_status::error_handling::{IdentityError, ProbeFailure};
use net_status::{CheckResult, Endpoint, IdentityFetcher, IdentityInfo, MonitorEngine, ReachabilityProbe};

/// Probe that answers per endpoint name: `Some(delay)` = Online after delay,
/// `None` = never answers within the timeout.
#[allow(dead_code)] // Used by other test files
pub struct ScriptedProbe {
    delays: HashMap<String, Option<Duration>>,
    pub calls: AtomicUsize,
}

#[allow(dead_code)]
impl ScriptedProbe {
    pub fn new(delays: &[(&str, Option<Duration>)]) -> Arc<Self> {
        Arc::new(Self {
            delays: delays
                .iter()
                .map(|(name, delay)| (name.to_string(), *delay))
                .collect(),
            calls: AtomicUsize::new(0),
        })
    }
}

#[async_trait]
impl ReachabilityProbe for ScriptedProbe {
    async fn probe(&self, endpoint: &Endpoint, timeout: Duration) -> CheckResult {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.delays.get(endpoint.name()).copied().flatten() {
            Some(delay) if delay <= timeout => {
                tokio::time::sleep(delay).await;
                CheckResult::online(delay.as_millis() as u64)
            }
            _ => {
                tokio::time::sleep(timeout).await;
                CheckResult::failed(ProbeFailure::Timeout, timeout.as_millis() as u64)
            }
        }
    }
}

/// Identity fetcher that replays a queue of outcomes, repeating the last one.
#[allow(dead_code)]
pub struct QueuedIdentity {
    outcomes: Mutex<Vec<Result<&'static str, &'static str>>>,
}

#[allow(dead_code)]
impl QueuedIdentity {
    /// `Ok(ip)` for a located identity, `Err(reason)` for a service error.
    pub fn new(outcomes: Vec<Result<&'static str, &'static str>>) -> Arc<Self> {
        Arc::new(Self {
            outcomes: Mutex::new(outcomes),
        })
    }
}

#[async_trait]
impl IdentityFetcher for QueuedIdentity {
    async fn fetch(&self) -> Result<IdentityInfo, IdentityError> {
        let outcome = {
            let mut outcomes = self.outcomes.lock().unwrap();
            if outcomes.len() > 1 {
                outcomes.remove(0)
            } else {
                outcomes[0]
            }
        };
        match outcome {
            Ok(ip) => Ok(IdentityInfo {
                ip: Some(ip.to_string()),
                city: Some("Lisbon".to_string()),
                region: None,
                country_code: Some("PT".to_string()),
                country_name: None,
                org: None,
                timezone: None,
                fetched_at: chrono::Utc::now(),
            }),
            Err(reason) => Err(IdentityError::Service(reason.to_string())),
        }
    }
}

#[allow(dead_code)]
pub fn endpoints(names: &[&str]) -> Vec<Endpoint> {
    names.iter().map(|n| Endpoint::parse(n).unwrap()).collect()
}

/// Waits until `condition` holds, failing the test after `limit`.
#[allow(dead_code)]
pub async fn wait_until<F>(limit: Duration, mut condition: F)
where
    F: FnMut() -> bool,
{
    tokio::time::timeout(limit, async {
        while !condition() {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .expect("condition not reached in time");
}

#[allow(dead_code)]
pub async fn wait_for_cycles(engine: &MonitorEngine, n: usize) {
    wait_until(Duration::from_secs(10), || engine.cycles_completed() >= n).await;
}
