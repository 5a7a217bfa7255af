//! Prometheus metrics handler.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use super::super::types::StatusState;

/// Prometheus-compatible metrics endpoint
pub async fn metrics_handler(State(state): State<StatusState>) -> Response {
    let engine = &state.engine;
    let summary = engine.summarize().await;
    let stats = engine.failure_stats();

    let metrics = format!(
        r#"# HELP net_status_monitoring Whether the monitoring timeline is running (1) or stopped (0)
# TYPE net_status_monitoring gauge
net_status_monitoring {}

# HELP net_status_endpoints_total Number of monitored endpoints
# TYPE net_status_endpoints_total gauge
net_status_endpoints_total {}

# HELP net_status_endpoints_online Endpoints online in the last committed cycle
# TYPE net_status_endpoints_online gauge
net_status_endpoints_online {}

# HELP net_status_endpoints_failed Endpoints failed in the last committed cycle
# TYPE net_status_endpoints_failed gauge
net_status_endpoints_failed {}

# HELP net_status_mean_response_time_ms Mean response time of online endpoints
# TYPE net_status_mean_response_time_ms gauge
net_status_mean_response_time_ms {}

# HELP net_status_cycles_total Completed batch cycles
# TYPE net_status_cycles_total counter
net_status_cycles_total {}

# HELP net_status_identity_refreshes_total Completed identity refreshes
# TYPE net_status_identity_refreshes_total counter
net_status_identity_refreshes_total {}

# HELP net_status_probe_failures_total Probe failures (timeouts and transport errors)
# TYPE net_status_probe_failures_total counter
net_status_probe_failures_total {}

# HELP net_status_identity_failures_total Failed identity refreshes
# TYPE net_status_identity_failures_total counter
net_status_identity_failures_total {}
"#,
        u8::from(engine.is_monitoring()),
        summary.total,
        summary.online_count,
        summary.failed_count,
        summary.mean_response_time_ms,
        engine.cycles_completed(),
        engine.identity_refreshes(),
        stats.total_probe_failures(),
        stats.total_identity_failures(),
    );

    (StatusCode::OK, metrics).into_response()
}
