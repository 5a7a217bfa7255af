//! Configuration constants.
//!
//! This module defines the compiled-in defaults used throughout the application:
//! the monitored endpoint set, scheduling intervals, timeouts and capacity limits.

use std::time::Duration;

/// Interval between batch checks while monitoring is running (5 seconds).
///
/// The monitoring timeline fires on a fixed grid with this period, independent of
/// how long an individual cycle takes.
pub const BATCH_INTERVAL: Duration = Duration::from_millis(5_000);

/// Hard bound for a single reachability probe (3 seconds).
///
/// A probe that has not completed within this bound is aborted and reported as
/// `Failed` with the message `"Timeout"`.
pub const PROBE_TIMEOUT: Duration = Duration::from_millis(3_000);

/// Extra time granted on top of the probe timeout before the batch checker gives
/// up on a probe implementation that ignores its own bound.
pub const PROBE_TIMEOUT_GRACE: Duration = Duration::from_millis(250);

/// Lower bound of the jittered identity refresh delay (30 seconds).
pub const IDENTITY_REFRESH_MIN: Duration = Duration::from_millis(30_000);

/// Upper bound of the jittered identity refresh delay (90 seconds).
pub const IDENTITY_REFRESH_MAX: Duration = Duration::from_millis(90_000);

/// Request timeout for the identity lookup in seconds.
///
/// A stalled lookup must not pin the identity timeline.
pub const IDENTITY_TIMEOUT_SECS: u64 = 10;

/// Identity lookup service (IP geolocation, JSON response).
pub const DEFAULT_IDENTITY_URL: &str = "https://ipapi.co/json/";

/// Capacity of the per-cycle history ring buffer.
pub const HISTORY_CAPACITY: usize = 20;

/// Interval of the periodic summary log line in seconds.
pub const SUMMARY_LOGGING_INTERVAL_SECS: u64 = 30;

/// TCP connection timeout for probe and identity clients in seconds.
pub const TCP_CONNECT_TIMEOUT_SECS: u64 = 3;

/// Placeholder shown for identity fields the lookup service did not return.
pub const UNKNOWN_PLACEHOLDER: &str = "Unknown";

/// Default User-Agent string for HTTP requests.
///
/// Users can override this via the `--user-agent` CLI flag.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36";

/// Endpoints monitored when neither `--endpoint` nor `--endpoints-file` is given.
pub const DEFAULT_ENDPOINTS: &[&str] = &[
    "google.com",
    "bing.com",
    "yahoo.com",
    "msn.com",
    "microsoft.com",
    "apple.com",
    "amazon.com",
    "linkedin.com",
    "ibm.com",
    "oracle.com",
    "salesforce.com",
    "adobe.com",
    "intel.com",
    "nvidia.com",
    "dell.com",
    "hp.com",
    "lenovo.com",
    "cisco.com",
    "sap.com",
    "zoom.us",
    "cloudflare.com",
    "slack.com",
    "dropbox.com",
    "box.com",
    "atlassian.com",
    "github.com",
    "stackoverflow.com",
    "trello.com",
    "airbnb.com",
    "uber.com",
    "paypal.com",
    "stripe.com",
    "walmart.com",
    "target.com",
    "costco.com",
    "fedex.com",
    "dhl.com",
    "ups.com",
    "bbc.com",
    "nytimes.com",
    "theguardian.com",
    "cnn.com",
    "bloomberg.com",
    "forbes.com",
    "reuters.com",
];
