//! Reachability probing.
//!
//! A probe performs exactly one bounded-time existence check of one endpoint and
//! classifies the outcome into a `CheckResult`. It never retries and never
//! returns an error: timeouts and transport failures are results too.

mod http;

use std::time::Duration;

use async_trait::async_trait;

use crate::models::{CheckResult, Endpoint};

pub use http::HttpProbe;

/// One bounded-time check of one endpoint.
///
/// Implementations must resolve within roughly `timeout`; the batch checker
/// additionally enforces the bound from the outside.
#[async_trait]
pub trait ReachabilityProbe: Send + Sync {
    async fn probe(&self, endpoint: &Endpoint, timeout: Duration) -> CheckResult;
}
