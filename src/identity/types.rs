//! Identity data structures.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::UNKNOWN_PLACEHOLDER;

/// The caller's network identity as reported by the lookup service.
///
/// Every field is optional; missing values render as `"Unknown"`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IdentityInfo {
    pub ip: Option<String>,
    pub city: Option<String>,
    pub region: Option<String>,
    pub country_code: Option<String>,
    pub country_name: Option<String>,
    pub org: Option<String>,
    pub timezone: Option<String>,
    pub fetched_at: DateTime<Utc>,
}

fn or_unknown(value: &Option<String>) -> &str {
    value
        .as_deref()
        .filter(|v| !v.is_empty())
        .unwrap_or(UNKNOWN_PLACEHOLDER)
}

impl IdentityInfo {
    pub fn ip_display(&self) -> &str {
        or_unknown(&self.ip)
    }

    pub fn org_display(&self) -> &str {
        or_unknown(&self.org)
    }

    pub fn timezone_display(&self) -> &str {
        or_unknown(&self.timezone)
    }

    /// `"City, CC"`, with placeholders for missing parts.
    pub fn location_display(&self) -> String {
        format!("{}, {}", or_unknown(&self.city), or_unknown(&self.country_code))
    }
}

/// Current identity value, replaced wholesale on every refresh.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum IdentitySnapshot {
    /// No refresh has completed yet.
    Pending,
    /// The last refresh succeeded.
    Located(IdentityInfo),
    /// The last refresh failed.
    Unavailable {
        error: String,
        failed_at: DateTime<Utc>,
    },
}

impl IdentitySnapshot {
    pub fn info(&self) -> Option<&IdentityInfo> {
        match self {
            IdentitySnapshot::Located(info) => Some(info),
            _ => None,
        }
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self, IdentitySnapshot::Unavailable { .. })
    }

    /// One-line summary for logs.
    pub fn summary(&self) -> String {
        match self {
            IdentitySnapshot::Pending => "location pending".to_string(),
            IdentitySnapshot::Located(info) => format!(
                "{} via {} ({})",
                info.location_display(),
                info.org_display(),
                info.timezone_display()
            ),
            IdentitySnapshot::Unavailable { error, .. } => {
                format!("location unavailable: {}", error)
            }
        }
    }
}

/// Wire format of the ipapi.co JSON response (field names as received).
#[derive(Debug, Deserialize)]
pub(crate) struct IpApiResponse {
    pub ip: Option<String>,
    pub city: Option<String>,
    pub region: Option<String>,
    pub country_code: Option<String>,
    pub country_name: Option<String>,
    pub org: Option<String>,
    pub timezone: Option<String>,
    /// Set to `true` by the service on failures such as rate limiting.
    #[serde(default)]
    pub error: bool,
    pub reason: Option<String>,
}

impl IpApiResponse {
    pub(crate) fn into_info(self, fetched_at: DateTime<Utc>) -> IdentityInfo {
        IdentityInfo {
            ip: self.ip,
            city: self.city,
            region: self.region,
            country_code: self.country_code,
            country_name: self.country_name,
            org: self.org,
            timezone: self.timezone,
            fetched_at,
        }
    }
}
