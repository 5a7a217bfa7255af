//! Error categorization.
//!
//! This module maps transport and lookup errors onto the `ErrorType` catalogue
//! used by the failure statistics.

use super::types::{ErrorType, IdentityError};

/// Categorizes a `reqwest::Error` raised by a reachability probe.
///
/// Status codes are never inspected here: a probe that received any HTTP
/// response is Online, so only transport-level failures reach this function.
pub fn categorize_probe_error(error: &reqwest::Error) -> ErrorType {
    if error.is_timeout() {
        ErrorType::ProbeTimeout
    } else if error.is_connect() {
        ErrorType::ProbeConnectError
    } else if error.is_redirect() {
        ErrorType::ProbeRedirectError
    } else if error.is_builder() {
        ErrorType::ProbeBuilderError
    } else if error.is_request() {
        ErrorType::ProbeRequestError
    } else {
        ErrorType::ProbeOtherError
    }
}

/// Categorizes an identity lookup failure.
pub fn categorize_identity_error(error: &IdentityError) -> ErrorType {
    match error {
        IdentityError::Request(e) if e.is_status() => ErrorType::IdentityStatusError,
        IdentityError::Request(e) if e.is_decode() => ErrorType::IdentityDecodeError,
        IdentityError::Request(_) => ErrorType::IdentityRequestError,
        IdentityError::Decode(_) => ErrorType::IdentityDecodeError,
        IdentityError::Service(_) => ErrorType::IdentityServiceError,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    /// Returns an address nothing listens on.
    fn closed_local_addr() -> std::net::SocketAddr {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        addr
    }

    #[tokio::test]
    async fn test_categorize_connect_error() {
        let client = reqwest::Client::new();
        let err = client
            .head(format!("http://{}/", closed_local_addr()))
            .send()
            .await
            .unwrap_err();
        assert_eq!(categorize_probe_error(&err), ErrorType::ProbeConnectError);
    }

    #[tokio::test]
    async fn test_categorize_client_timeout() {
        let server = wiremock::MockServer::start().await;
        wiremock::Mock::given(wiremock::matchers::method("HEAD"))
            .respond_with(
                wiremock::ResponseTemplate::new(200).set_delay(Duration::from_millis(500)),
            )
            .mount(&server)
            .await;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(50))
            .build()
            .unwrap();
        let err = client.head(server.uri()).send().await.unwrap_err();
        assert_eq!(categorize_probe_error(&err), ErrorType::ProbeTimeout);
    }

    #[test]
    fn test_categorize_identity_decode_and_service() {
        let decode = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        assert_eq!(
            categorize_identity_error(&IdentityError::Decode(decode)),
            ErrorType::IdentityDecodeError
        );
        assert_eq!(
            categorize_identity_error(&IdentityError::Service("RateLimited".into())),
            ErrorType::IdentityServiceError
        );
    }

    #[tokio::test]
    async fn test_categorize_identity_status_error() {
        let server = httptest::Server::run();
        server.expect(
            httptest::Expectation::matching(httptest::matchers::request::method_path(
                "GET", "/json/",
            ))
            .respond_with(httptest::responders::status_code(429)),
        );

        let err = reqwest::get(server.url("/json/").to_string())
            .await
            .unwrap()
            .error_for_status()
            .unwrap_err();
        assert_eq!(
            categorize_identity_error(&IdentityError::Request(err)),
            ErrorType::IdentityStatusError
        );
    }
}
