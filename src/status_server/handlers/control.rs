//! Monitoring start/stop/toggle handlers.

use axum::{extract::State, response::Response};

use super::super::types::{ControlResponse, StatusState};
use super::json_response;

pub async fn start_handler(State(state): State<StatusState>) -> Response {
    let changed = state.engine.start_monitoring().await;
    respond(&state, changed)
}

pub async fn stop_handler(State(state): State<StatusState>) -> Response {
    let changed = state.engine.stop_monitoring().await;
    respond(&state, changed)
}

pub async fn toggle_handler(State(state): State<StatusState>) -> Response {
    let monitoring = state.engine.toggle_monitoring().await;
    json_response(
        &ControlResponse {
            monitoring,
            changed: true,
        },
        "control response",
    )
}

fn respond(state: &StatusState, changed: bool) -> Response {
    json_response(
        &ControlResponse {
            monitoring: state.engine.is_monitoring(),
            changed,
        },
        "control response",
    )
}
