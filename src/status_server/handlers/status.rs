//! JSON status, history and identity handlers.

use axum::{extract::State, response::Response};

use super::super::types::{
    EndpointStatus, ErrorCounts, ErrorTypeCount, HistoryResponse, StatusResponse, StatusState,
};
use super::json_response;
use crate::config::HISTORY_CAPACITY;

/// JSON status endpoint: summary, per-endpoint results and identity
pub async fn status_handler(State(state): State<StatusState>) -> Response {
    let engine = &state.engine;
    let (snapshot, summary) = engine.status_view().await;
    let stats = engine.failure_stats();

    let endpoints = snapshot
        .iter()
        .map(|(endpoint, result)| EndpointStatus {
            endpoint: endpoint.name().to_string(),
            url: endpoint.url().to_string(),
            result: result.clone(),
        })
        .collect();

    let response = StatusResponse {
        monitoring: engine.is_monitoring(),
        elapsed_seconds: state.start_time.elapsed().as_secs_f64(),
        cycles_completed: engine.cycles_completed(),
        identity_refreshes: engine.identity_refreshes(),
        summary,
        endpoints,
        identity: engine.identity().await,
        errors: ErrorCounts {
            total: stats.total_errors(),
            probe: stats.total_probe_failures(),
            identity: stats.total_identity_failures(),
            by_type: stats
                .non_zero()
                .into_iter()
                .map(|(error_type, count)| ErrorTypeCount {
                    error_type: error_type.as_str(),
                    count,
                })
                .collect(),
        },
    };

    json_response(&response, "status")
}

/// Cycle history, oldest first
pub async fn history_handler(State(state): State<StatusState>) -> Response {
    json_response(
        &HistoryResponse {
            capacity: HISTORY_CAPACITY,
            entries: state.engine.history().await,
        },
        "history",
    )
}

/// Current identity snapshot
pub async fn identity_handler(State(state): State<StatusState>) -> Response {
    json_response(&state.engine.identity().await, "identity")
}
