//! Status server HTTP handlers.

mod control;
mod metrics;
mod status;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

pub use control::{start_handler, stop_handler, toggle_handler};
pub use metrics::metrics_handler;
pub use status::{history_handler, identity_handler, status_handler};

/// Pretty-printed JSON response, or a 500 if serialization fails.
fn json_response<T: Serialize>(value: &T, what: &str) -> Response {
    match serde_json::to_string_pretty(value) {
        Ok(json) => (StatusCode::OK, [("content-type", "application/json")], json).into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to serialize {}: {}", what, e),
        )
            .into_response(),
    }
}
