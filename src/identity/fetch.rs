//! Identity lookup over HTTP.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use log::{info, warn};

use super::types::{IdentityInfo, IdentitySnapshot, IpApiResponse};
use crate::error_handling::{categorize_identity_error, FailureStats, IdentityError};

/// Source of the caller's network identity.
#[async_trait]
pub trait IdentityFetcher: Send + Sync {
    async fn fetch(&self) -> Result<IdentityInfo, IdentityError>;
}

/// Fetches identity from an ipapi.co compatible JSON endpoint.
pub struct HttpIdentityFetcher {
    client: Arc<reqwest::Client>,
    url: String,
}

impl HttpIdentityFetcher {
    /// The request timeout is taken from `client`.
    pub fn new(client: Arc<reqwest::Client>, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

#[async_trait]
impl IdentityFetcher for HttpIdentityFetcher {
    async fn fetch(&self) -> Result<IdentityInfo, IdentityError> {
        let body = self
            .client
            .get(&self.url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        parse_identity_response(&body)
    }
}

/// Parses a lookup response body.
///
/// # Errors
///
/// `IdentityError::Decode` for malformed JSON, `IdentityError::Service` when the
/// service reports an error in the payload.
pub fn parse_identity_response(body: &str) -> Result<IdentityInfo, IdentityError> {
    let response: IpApiResponse = serde_json::from_str(body)?;
    if response.error {
        let reason = response
            .reason
            .unwrap_or_else(|| "unspecified error".to_string());
        return Err(IdentityError::Service(reason));
    }
    Ok(response.into_info(Utc::now()))
}

/// Runs one identity refresh cycle.
///
/// Never fails: any error becomes `IdentitySnapshot::Unavailable` and is counted
/// in `stats`.
pub async fn refresh_identity(fetcher: &dyn IdentityFetcher, stats: &FailureStats) -> IdentitySnapshot {
    match fetcher.fetch().await {
        Ok(info) => {
            let snapshot = IdentitySnapshot::Located(info);
            info!("Identity refreshed: {}", snapshot.summary());
            snapshot
        }
        Err(e) => {
            stats.increment_error(categorize_identity_error(&e));
            warn!("Failed to fetch identity info: {}", e);
            IdentitySnapshot::Unavailable {
                error: e.to_string(),
                failed_at: Utc::now(),
            }
        }
    }
}
