//! HTTP `HEAD` reachability probe.

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use log::debug;

use super::ReachabilityProbe;
use crate::error_handling::{categorize_probe_error, ErrorType, ProbeFailure};
use crate::models::{CheckResult, Endpoint};
use crate::utils::duration_to_ms;

/// Probe that issues one `HEAD` request per check over a shared client.
///
/// Any completed HTTP exchange counts as Online, whatever the status code. This
/// mirrors an opaque cross-origin check, which can not tell an error page from a
/// healthy one; the status code is only logged.
#[derive(Clone)]
pub struct HttpProbe {
    client: Arc<reqwest::Client>,
}

impl HttpProbe {
    pub fn new(client: Arc<reqwest::Client>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ReachabilityProbe for HttpProbe {
    async fn probe(&self, endpoint: &Endpoint, timeout: Duration) -> CheckResult {
        let start = Instant::now();
        // Dropping the request future on expiry aborts the in-flight request.
        let outcome = tokio::time::timeout(timeout, self.client.head(endpoint.url()).send()).await;
        let elapsed_ms = duration_to_ms(start.elapsed());

        match outcome {
            Ok(Ok(response)) => {
                debug!(
                    "{} answered {} in {}ms",
                    endpoint,
                    response.status(),
                    elapsed_ms
                );
                CheckResult::online(elapsed_ms)
            }
            Ok(Err(e)) => {
                let error_type = categorize_probe_error(&e);
                debug!("{} failed after {}ms: {} ({})", endpoint, elapsed_ms, e, error_type);
                let failure = error_type.probe_failure().unwrap_or(ProbeFailure::NoResponse);
                CheckResult::failed(failure, elapsed_ms).with_error_type(error_type)
            }
            Err(_) => {
                debug!("{} timed out after {}ms", endpoint, elapsed_ms);
                CheckResult::failed(ProbeFailure::Timeout, elapsed_ms)
                    .with_error_type(ErrorType::ProbeTimeout)
            }
        }
    }
}
