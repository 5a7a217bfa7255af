//! HTTP status server for the monitoring session.
//!
//! Read-only endpoints:
//! - `/status` - JSON summary, per-endpoint results and identity
//! - `/history` - JSON cycle history, oldest first
//! - `/identity` - JSON identity snapshot
//! - `/metrics` - Prometheus-compatible metrics
//!
//! Control endpoints: `POST /monitoring/start`, `/monitoring/stop`,
//! `/monitoring/toggle`.
//!
//! The server runs in the background and never blocks the timelines.

mod handlers;
mod types;

use axum::routing::{get, post};
use axum::Router;

use handlers::{
    history_handler, identity_handler, metrics_handler, start_handler, status_handler,
    stop_handler, toggle_handler,
};
pub use types::StatusState;

/// Builds the router with all status and control routes.
pub fn build_router(state: StatusState) -> Router {
    Router::new()
        .route("/metrics", get(metrics_handler))
        .route("/status", get(status_handler))
        .route("/history", get(history_handler))
        .route("/identity", get(identity_handler))
        .route("/monitoring/start", post(start_handler))
        .route("/monitoring/stop", post(stop_handler))
        .route("/monitoring/toggle", post(toggle_handler))
        .with_state(state)
}

/// Binds the status server to `127.0.0.1:{port}`.
///
/// Binding happens before returning so that a port conflict surfaces as a
/// startup error; the returned future serves until the process exits.
pub async fn bind_status_server(
    port: u16,
    state: StatusState,
) -> Result<impl std::future::Future<Output = Result<(), anyhow::Error>>, anyhow::Error> {
    let listener = tokio::net::TcpListener::bind(format!("127.0.0.1:{}", port))
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind status server to port {}: {}", port, e))?;
    let local = listener.local_addr()?;

    log::info!("Status server listening on http://{}/", local);
    log::info!("  - Status: http://{}/status", local);
    log::info!("  - Metrics: http://{}/metrics", local);
    log::info!("  - Toggle: POST http://{}/monitoring/toggle", local);

    let app = build_router(state);
    Ok(async move {
        axum::serve(listener, app)
            .await
            .map_err(|e| anyhow::anyhow!("Status server error: {}", e))
    })
}

#[cfg(test)]
mod tests {
    use super::handlers::*;
    use super::*;
    use crate::config::ScheduleSettings;
    use crate::error_handling::{IdentityError, ProbeFailure};
    use crate::identity::{IdentityFetcher, IdentityInfo};
    use crate::models::{CheckResult, Endpoint};
    use crate::probe::ReachabilityProbe;
    use crate::scheduler::MonitorEngine;
    use async_trait::async_trait;
    use axum::extract::State;
    use axum::http::StatusCode;
    use axum::response::Response;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    struct InstantProbe;

    #[async_trait]
    impl ReachabilityProbe for InstantProbe {
        async fn probe(&self, _endpoint: &Endpoint, _timeout: Duration) -> CheckResult {
            CheckResult::online(7)
        }
    }

    /// All endpoints online on even cycles, all timed out on odd ones.
    struct AlternatingProbe {
        calls: AtomicUsize,
        endpoints: usize,
    }

    #[async_trait]
    impl ReachabilityProbe for AlternatingProbe {
        async fn probe(&self, _endpoint: &Endpoint, timeout: Duration) -> CheckResult {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            if (call / self.endpoints) % 2 == 0 {
                CheckResult::online(1)
            } else {
                CheckResult::failed(ProbeFailure::Timeout, timeout.as_millis() as u64)
            }
        }
    }

    struct NoIdentity;

    #[async_trait]
    impl IdentityFetcher for NoIdentity {
        async fn fetch(&self) -> Result<IdentityInfo, IdentityError> {
            Err(IdentityError::Service("RateLimited".to_string()))
        }
    }

    fn state() -> StatusState {
        let endpoints = vec![
            Endpoint::parse("b.example").unwrap(),
            Endpoint::parse("a.example").unwrap(),
        ];
        let engine = MonitorEngine::new(
            endpoints,
            Arc::new(InstantProbe),
            Arc::new(NoIdentity),
            ScheduleSettings {
                batch_interval: Duration::from_secs(60),
                ..ScheduleSettings::default()
            },
        )
        .unwrap();
        StatusState::new(Arc::new(engine))
    }

    async fn body_json(response: Response) -> serde_json::Value {
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn body_text(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_status_before_first_cycle() {
        let state = state();
        let json = body_json(status_handler(State(state)).await).await;

        assert_eq!(json["monitoring"], false);
        assert_eq!(json["summary"]["total"], 2);
        assert_eq!(json["summary"]["pending_count"], 2);
        assert_eq!(json["identity"]["state"], "pending");
        // Configured order, not alphabetical.
        assert_eq!(json["endpoints"][0]["endpoint"], "b.example");
        assert_eq!(json["endpoints"][1]["endpoint"], "a.example");
        assert_eq!(json["endpoints"][0]["status"], "pending");
    }

    #[tokio::test]
    async fn test_control_and_status_after_cycle() {
        let state = state();

        let started = body_json(start_handler(State(state.clone())).await).await;
        assert_eq!(started["monitoring"], true);
        assert_eq!(started["changed"], true);

        let again = body_json(start_handler(State(state.clone())).await).await;
        assert_eq!(again["changed"], false);

        tokio::time::timeout(Duration::from_secs(2), async {
            while state.engine.cycles_completed() == 0 {
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        })
        .await
        .unwrap();

        let json = body_json(status_handler(State(state.clone())).await).await;
        assert_eq!(json["summary"]["online_count"], 2);
        assert_eq!(json["endpoints"][0]["message"], "Response in 7ms");

        let history = body_json(history_handler(State(state.clone())).await).await;
        assert_eq!(history["capacity"], 20);
        assert_eq!(history["entries"][0]["online_count"], 2);
        assert_eq!(history["entries"][0]["total"], 2);

        let toggled = body_json(toggle_handler(State(state.clone())).await).await;
        assert_eq!(toggled["monitoring"], false);

        let stopped = body_json(stop_handler(State(state.clone())).await).await;
        assert_eq!(stopped["changed"], false);

        state.engine.shutdown().await;
    }

    #[tokio::test]
    async fn test_identity_failure_reported() {
        let state = state();
        state.engine.start().await;
        tokio::time::timeout(Duration::from_secs(2), async {
            while state.engine.identity_refreshes() == 0 {
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        })
        .await
        .unwrap();

        let identity = body_json(identity_handler(State(state.clone())).await).await;
        assert_eq!(identity["state"], "unavailable");

        let status = body_json(status_handler(State(state.clone())).await).await;
        assert_eq!(status["errors"]["identity"], 1);
        assert_eq!(status["errors"]["by_type"][0]["error_type"], "Identity service error");

        state.engine.shutdown().await;
    }

    #[tokio::test]
    async fn test_metrics_text() {
        let state = state();
        let text = body_text(metrics_handler(State(state)).await).await;
        assert!(text.contains("# TYPE net_status_monitoring gauge"));
        assert!(text.contains("net_status_monitoring 0"));
        assert!(text.contains("net_status_endpoints_total 2"));
        assert!(text.contains("net_status_cycles_total 0"));
    }

    #[tokio::test]
    async fn test_bind_conflict_is_an_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();

        let result = bind_status_server(port, state()).await;
        let err = result.err().expect("binding a used port should fail");
        assert!(err.to_string().contains("Failed to bind status server"));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_status_consistent_while_cycles_commit() {
        let names = ["a.example", "b.example", "c.example", "d.example"];
        let endpoints = names.iter().map(|n| Endpoint::parse(n).unwrap()).collect();
        let engine = MonitorEngine::new(
            endpoints,
            Arc::new(AlternatingProbe {
                calls: AtomicUsize::new(0),
                endpoints: names.len(),
            }),
            Arc::new(NoIdentity),
            ScheduleSettings {
                batch_interval: Duration::from_millis(1),
                ..ScheduleSettings::default()
            },
        )
        .unwrap();
        let state = StatusState::new(Arc::new(engine));
        state.engine.start_monitoring().await;

        let deadline = tokio::time::Instant::now() + Duration::from_millis(300);
        while tokio::time::Instant::now() < deadline {
            let json = body_json(status_handler(State(state.clone())).await).await;
            let online = json["endpoints"]
                .as_array()
                .unwrap()
                .iter()
                .filter(|e| e["status"] == "online")
                .count();
            assert_eq!(json["summary"]["online_count"], online);

            assert_eq!(json["errors"]["identity"], 0);
        }

        assert!(state.engine.cycles_completed() > 1);
        state.engine.shutdown().await;
    }
}
