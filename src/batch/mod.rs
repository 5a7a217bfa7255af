//! Batch checker.
//!
//! Probes the full endpoint set concurrently and assembles one complete
//! `StatusSnapshot`. A cycle always yields a result for every endpoint: the outer
//! timeout and task failures are folded into `Failed` results.

use std::sync::Arc;
use std::time::{Duration, Instant};

use futures::stream::{FuturesUnordered, StreamExt};
use log::{debug, warn};

use crate::config::PROBE_TIMEOUT_GRACE;
use crate::error_handling::{ErrorType, ProbeFailure};
use crate::models::{CheckResult, CheckStatus, Endpoint, StatusSnapshot};
use crate::probe::ReachabilityProbe;
use crate::utils::duration_to_ms;

/// Runs one batch cycle over `endpoints`.
///
/// Every probe is spawned as its own task and bounded by `timeout` plus a small
/// grace period, so the cycle completes within roughly one probe timeout no
/// matter how many endpoints there are. The returned snapshot is keyed in
/// `endpoints` order, independent of completion order.
pub async fn run_cycle(
    probe: &Arc<dyn ReachabilityProbe>,
    endpoints: &[Endpoint],
    timeout: Duration,
) -> StatusSnapshot {
    let cycle_start = Instant::now();
    let mut tasks = FuturesUnordered::new();

    for (index, endpoint) in endpoints.iter().enumerate() {
        let probe = Arc::clone(probe);
        let endpoint = endpoint.clone();
        let handle = tokio::spawn(async move {
            let start = Instant::now();
            match tokio::time::timeout(timeout + PROBE_TIMEOUT_GRACE, probe.probe(&endpoint, timeout))
                .await
            {
                Ok(result) => result,
                Err(_) => {
                    debug!("{} exceeded the probe deadline", endpoint);
                    CheckResult::failed(ProbeFailure::Timeout, duration_to_ms(start.elapsed()))
                        .with_error_type(ErrorType::ProbeTimeout)
                }
            }
        });
        tasks.push(async move { (index, handle.await) });
    }

    let mut results: Vec<Option<CheckResult>> = vec![None; endpoints.len()];
    while let Some((index, joined)) = tasks.next().await {
        let result = match joined {
            Ok(result) => result,
            Err(e) => {
                warn!("Probe task for {} failed: {}", endpoints[index], e);
                CheckResult::failed(ProbeFailure::NoResponse, 0)
                    .with_error_type(ErrorType::ProbeTaskPanic)
            }
        };
        results[index] = Some(result);
    }

    let snapshot: StatusSnapshot = endpoints
        .iter()
        .cloned()
        .zip(results)
        .map(|(endpoint, result)| {
            let result = result.unwrap_or_else(|| {
                CheckResult::failed(ProbeFailure::NoResponse, 0)
                    .with_error_type(ErrorType::ProbeOtherError)
            });
            (endpoint, result)
        })
        .collect();

    debug!(
        "Cycle finished in {}ms: {} online, {} failed",
        duration_to_ms(cycle_start.elapsed()),
        snapshot.count(CheckStatus::Online),
        snapshot.count(CheckStatus::Failed)
    );
    snapshot
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    enum Script {
        Online(Duration),
        Fail(Duration),
        Hang,
        Panic,
    }

    /// Probe whose behaviour is scripted per endpoint name.
    struct ScriptedProbe {
        scripts: HashMap<String, Script>,
        calls: AtomicUsize,
    }

    impl ScriptedProbe {
        fn new(scripts: Vec<(&str, Script)>) -> Arc<dyn ReachabilityProbe> {
            Arc::new(Self {
                scripts: scripts
                    .into_iter()
                    .map(|(name, script)| (name.to_string(), script))
                    .collect(),
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl ReachabilityProbe for ScriptedProbe {
        async fn probe(&self, endpoint: &Endpoint, _timeout: Duration) -> CheckResult {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.scripts.get(endpoint.name()) {
                Some(Script::Online(delay)) => {
                    tokio::time::sleep(*delay).await;
                    CheckResult::online(duration_to_ms(*delay))
                }
                Some(Script::Fail(delay)) => {
                    tokio::time::sleep(*delay).await;
                    CheckResult::failed(ProbeFailure::NoResponse, duration_to_ms(*delay))
                }
                Some(Script::Hang) => {
                    tokio::time::sleep(Duration::from_secs(3600)).await;
                    CheckResult::online(0)
                }
                Some(Script::Panic) => panic!("scripted probe panic"),
                None => CheckResult::online(0),
            }
        }
    }

    fn endpoints(names: &[&str]) -> Vec<Endpoint> {
        names.iter().map(|n| Endpoint::parse(n).unwrap()).collect()
    }

    #[tokio::test]
    async fn test_snapshot_preserves_configured_order() {
        let probe = ScriptedProbe::new(vec![
            ("slow.example", Script::Online(Duration::from_millis(150))),
            ("fast.example", Script::Online(Duration::from_millis(5))),
            ("mid.example", Script::Fail(Duration::from_millis(50))),
        ]);
        let eps = endpoints(&["slow.example", "fast.example", "mid.example"]);

        let snapshot = run_cycle(&probe, &eps, Duration::from_secs(1)).await;

        let order: Vec<&str> = snapshot.endpoints().map(|e| e.name()).collect();
        assert_eq!(order, vec!["slow.example", "fast.example", "mid.example"]);
        assert!(snapshot.get_by_name("slow.example").unwrap().is_online());
        assert!(snapshot.get_by_name("mid.example").unwrap().is_failed());
    }

    #[tokio::test]
    async fn test_probes_run_concurrently() {
        let names: Vec<String> = (0..10).map(|i| format!("host{}.example", i)).collect();
        let scripts = names
            .iter()
            .map(|n| (n.as_str(), Script::Online(Duration::from_millis(200))))
            .collect();
        let probe = ScriptedProbe::new(scripts);
        let name_refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let eps = endpoints(&name_refs);

        let start = Instant::now();
        let snapshot = run_cycle(&probe, &eps, Duration::from_secs(1)).await;

        assert_eq!(snapshot.count(CheckStatus::Online), 10);
        assert!(
            start.elapsed() < Duration::from_millis(1_000),
            "cycle took {:?}",
            start.elapsed()
        );
    }

    #[tokio::test]
    async fn test_hanging_probe_is_cut_off() {
        let probe = ScriptedProbe::new(vec![
            ("hang.example", Script::Hang),
            ("ok.example", Script::Online(Duration::from_millis(10))),
        ]);
        let eps = endpoints(&["hang.example", "ok.example"]);

        let start = Instant::now();
        let snapshot = run_cycle(&probe, &eps, Duration::from_millis(100)).await;

        assert!(start.elapsed() < Duration::from_secs(2));
        let hung = snapshot.get_by_name("hang.example").unwrap();
        assert!(hung.is_failed());
        assert_eq!(hung.message, "Timeout");
        assert_eq!(hung.error_type, Some(ErrorType::ProbeTimeout));
        assert!(snapshot.get_by_name("ok.example").unwrap().is_online());
    }

    #[tokio::test]
    async fn test_panicking_probe_becomes_failure() {
        let probe = ScriptedProbe::new(vec![
            ("boom.example", Script::Panic),
            ("ok.example", Script::Online(Duration::from_millis(1))),
        ]);
        let eps = endpoints(&["boom.example", "ok.example"]);

        let snapshot = run_cycle(&probe, &eps, Duration::from_secs(1)).await;

        assert_eq!(snapshot.len(), 2);
        let failed = snapshot.get_by_name("boom.example").unwrap();
        assert_eq!(failed.message, "No response");
        assert_eq!(failed.error_type, Some(ErrorType::ProbeTaskPanic));
        assert!(snapshot.get_by_name("ok.example").unwrap().is_online());
    }

    #[tokio::test]
    async fn test_empty_endpoint_set() {
        let probe = ScriptedProbe::new(Vec::new());
        let snapshot = run_cycle(&probe, &[], Duration::from_secs(1)).await;
        assert!(snapshot.is_empty());
    }
}
