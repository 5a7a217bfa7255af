//! HTTP client initialization.
//!
//! Probes and identity lookups use separate clients: probes are bounded per
//! request by the probe itself, identity lookups by the client timeout.

use std::sync::Arc;
use std::time::Duration;

use crate::config::{Config, PROBE_TIMEOUT_GRACE, TCP_CONNECT_TIMEOUT_SECS};
use crate::error_handling::InitializationError;
use reqwest::ClientBuilder;

/// Maximum redirect hops a probe follows before giving up.
const PROBE_MAX_REDIRECTS: usize = 5;

/// Initializes the shared HTTP client for reachability probes.
///
/// Creates a `reqwest::Client` configured with:
/// - User-Agent header from the config
/// - TCP connect timeout
/// - A request timeout slightly above the probe timeout, as a backstop
/// - Limited redirect following
///
/// # Errors
///
/// Returns `InitializationError::HttpClientError` if client creation fails.
pub fn init_probe_client(config: &Config) -> Result<Arc<reqwest::Client>, InitializationError> {
    let client = ClientBuilder::new()
        .connect_timeout(Duration::from_secs(TCP_CONNECT_TIMEOUT_SECS))
        .timeout(Duration::from_millis(config.probe_timeout_ms) + PROBE_TIMEOUT_GRACE)
        .redirect(reqwest::redirect::Policy::limited(PROBE_MAX_REDIRECTS))
        .user_agent(config.user_agent.clone())
        .build()?;
    Ok(Arc::new(client))
}

/// Initializes the HTTP client for identity lookups.
///
/// The request timeout (`--identity-timeout-seconds`) is the only bound on a
/// lookup.
///
/// # Errors
///
/// Returns `InitializationError::HttpClientError` if client creation fails.
pub fn init_identity_client(config: &Config) -> Result<Arc<reqwest::Client>, InitializationError> {
    let client = ClientBuilder::new()
        .connect_timeout(Duration::from_secs(TCP_CONNECT_TIMEOUT_SECS))
        .timeout(Duration::from_secs(config.identity_timeout_seconds))
        .user_agent(config.user_agent.clone())
        .build()?;
    Ok(Arc::new(client))
}

#[cfg(test)]
mod tests {
    use super::*;
    use httptest::{matchers::*, responders::*, Expectation, Server};

    #[tokio::test]
    async fn test_probe_client_sends_user_agent() {
        let server = Server::run();
        server.expect(
            Expectation::matching(all_of![
                request::method_path("HEAD", "/"),
                request::headers(contains(("user-agent", "net_status-test"))),
            ])
            .respond_with(status_code(200)),
        );

        let config = Config {
            user_agent: "net_status-test".to_string(),
            ..Config::default()
        };
        let client = init_probe_client(&config).unwrap();
        let response = client.head(server.url_str("/")).send().await.unwrap();
        assert_eq!(response.status(), 200);
    }

    #[tokio::test]
    async fn test_identity_client_times_out() {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("GET", "/json/"))
                .respond_with(delay_and_then(Duration::from_secs(2), status_code(200))),
        );

        let config = Config {
            identity_timeout_seconds: 1,
            ..Config::default()
        };
        let client = init_identity_client(&config).unwrap();
        let err = client
            .get(server.url_str("/json/"))
            .send()
            .await
            .unwrap_err();
        assert!(err.is_timeout());
    }
}
