//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and configuration.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use log::warn;

use crate::config::constants::{
    BATCH_INTERVAL, DEFAULT_ENDPOINTS, DEFAULT_IDENTITY_URL, DEFAULT_USER_AGENT,
    IDENTITY_REFRESH_MAX, IDENTITY_REFRESH_MIN, IDENTITY_TIMEOUT_SECS, PROBE_TIMEOUT,
    SUMMARY_LOGGING_INTERVAL_SECS,
};
use crate::error_handling::ConfigError;
use crate::models::Endpoint;
use crate::utils::duration_to_ms;

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// Controls how log messages are formatted:
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Library configuration, also used as the command-line parser.
///
/// Every compiled-in constant (endpoint set, batch interval, identity refresh
/// bounds, probe timeout) is the default of one of these options.
///
/// # Examples
///
/// ```no_run
/// use net_status::Config;
///
/// let config = Config {
///     endpoints: vec!["github.com".to_string(), "example.org".to_string()],
///     batch_interval_ms: 10_000,
///     ..Default::default()
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Parser)]
#[command(
    name = "net_status",
    about = "Continuously probes a set of endpoints and reports reachability and latency."
)]
pub struct Config {
    /// Endpoint to monitor (hostname or http(s) URL); may be repeated
    #[arg(long = "endpoint", value_name = "HOST")]
    pub endpoints: Vec<String>,

    /// File with one endpoint per line (blank lines and # comments are skipped)
    #[arg(long, value_parser)]
    pub endpoints_file: Option<PathBuf>,

    /// Log level: error|warn|info|debug|trace
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,

    /// Interval between batch checks in milliseconds
    #[arg(long, default_value_t = BATCH_INTERVAL.as_millis() as u64)]
    pub batch_interval_ms: u64,

    /// Per-endpoint probe timeout in milliseconds
    #[arg(long, default_value_t = PROBE_TIMEOUT.as_millis() as u64)]
    pub probe_timeout_ms: u64,

    /// Lower bound of the randomized identity refresh delay in milliseconds
    #[arg(long, default_value_t = IDENTITY_REFRESH_MIN.as_millis() as u64)]
    pub identity_min_interval_ms: u64,

    /// Upper bound of the randomized identity refresh delay in milliseconds
    #[arg(long, default_value_t = IDENTITY_REFRESH_MAX.as_millis() as u64)]
    pub identity_max_interval_ms: u64,

    /// Identity lookup service URL (must return ipapi.co style JSON)
    #[arg(long, default_value = DEFAULT_IDENTITY_URL)]
    pub identity_url: String,

    /// Identity lookup request timeout in seconds
    #[arg(long, default_value_t = IDENTITY_TIMEOUT_SECS)]
    pub identity_timeout_seconds: u64,

    /// HTTP User-Agent header value
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// HTTP status server port (optional, disabled by default)
    #[arg(long)]
    pub status_port: Option<u16>,

    /// Start monitoring immediately instead of waiting for a `start` command
    #[arg(long)]
    pub autostart: bool,

    /// Interval of the periodic summary log line in seconds (0 disables it)
    #[arg(long, default_value_t = SUMMARY_LOGGING_INTERVAL_SECS)]
    pub summary_interval_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoints: Vec::new(),
            endpoints_file: None,
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
            batch_interval_ms: BATCH_INTERVAL.as_millis() as u64,
            probe_timeout_ms: PROBE_TIMEOUT.as_millis() as u64,
            identity_min_interval_ms: IDENTITY_REFRESH_MIN.as_millis() as u64,
            identity_max_interval_ms: IDENTITY_REFRESH_MAX.as_millis() as u64,
            identity_url: DEFAULT_IDENTITY_URL.to_string(),
            identity_timeout_seconds: IDENTITY_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            status_port: None,
            autostart: false,
            summary_interval_secs: SUMMARY_LOGGING_INTERVAL_SECS,
        }
    }
}

impl Config {
    /// Checks the timing options for values the scheduler can not work with.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` naming the first offending option.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.batch_interval_ms == 0 {
            return Err(ConfigError::ZeroDuration("batch_interval_ms"));
        }
        if self.probe_timeout_ms == 0 {
            return Err(ConfigError::ZeroDuration("probe_timeout_ms"));
        }
        if self.identity_min_interval_ms == 0 {
            return Err(ConfigError::ZeroDuration("identity_min_interval_ms"));
        }
        if self.identity_timeout_seconds == 0 {
            return Err(ConfigError::ZeroDuration("identity_timeout_seconds"));
        }
        if self.identity_min_interval_ms > self.identity_max_interval_ms {
            return Err(ConfigError::InvertedIdentityBounds {
                min_ms: self.identity_min_interval_ms,
                max_ms: self.identity_max_interval_ms,
            });
        }
        if url::Url::parse(&self.identity_url).is_err() {
            return Err(ConfigError::InvalidIdentityUrl(self.identity_url.clone()));
        }
        Ok(())
    }

    /// Timing settings handed to the monitoring engine.
    pub fn schedule_settings(&self) -> ScheduleSettings {
        ScheduleSettings {
            batch_interval: Duration::from_millis(self.batch_interval_ms),
            probe_timeout: Duration::from_millis(self.probe_timeout_ms),
            identity_refresh_min: Duration::from_millis(self.identity_min_interval_ms),
            identity_refresh_max: Duration::from_millis(self.identity_max_interval_ms),
        }
    }

    /// Resolves the configured endpoint set.
    ///
    /// `--endpoint` values come first, followed by the lines of `--endpoints-file`.
    /// When neither is given, the compiled-in `DEFAULT_ENDPOINTS` are used. Each
    /// entry is normalized to an http(s) URL; invalid entries are skipped with a
    /// warning and duplicates keep their first position.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::EndpointsFile` if the endpoints file can not be read,
    /// or `ConfigError::NoEndpoints` if nothing valid remains.
    pub async fn load_endpoints(&self) -> Result<Vec<Endpoint>, ConfigError> {
        let mut raw: Vec<String> = self.endpoints.clone();

        if let Some(path) = &self.endpoints_file {
            let contents = tokio::fs::read_to_string(path).await.map_err(|e| {
                ConfigError::EndpointsFile {
                    path: path.clone(),
                    source: e,
                }
            })?;
            raw.extend(
                contents
                    .lines()
                    .map(str::trim)
                    .filter(|line| !line.is_empty() && !line.starts_with('#'))
                    .map(str::to_string),
            );
        }

        if raw.is_empty() {
            raw = DEFAULT_ENDPOINTS.iter().map(|s| s.to_string()).collect();
        }

        let mut endpoints: Vec<Endpoint> = Vec::with_capacity(raw.len());
        for entry in raw {
            let Some(endpoint) = Endpoint::parse(&entry) else {
                continue;
            };
            if endpoints.iter().any(|e| e.url() == endpoint.url()) {
                warn!("Ignoring duplicate endpoint: {}", endpoint);
                continue;
            }
            endpoints.push(endpoint);
        }

        if endpoints.is_empty() {
            return Err(ConfigError::NoEndpoints);
        }
        Ok(endpoints)
    }
}

/// Timing parameters of the two scheduler timelines and the probe bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleSettings {
    /// Fixed period of the monitoring timeline
    pub batch_interval: Duration,
    /// Hard bound for a single probe
    pub probe_timeout: Duration,
    /// Lower bound of the jittered identity refresh delay
    pub identity_refresh_min: Duration,
    /// Upper bound of the jittered identity refresh delay
    pub identity_refresh_max: Duration,
}

impl ScheduleSettings {
    /// Checks that every period is non-zero and the identity bounds are ordered.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` naming the first offending setting.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.batch_interval.is_zero() {
            return Err(ConfigError::ZeroDuration("batch_interval"));
        }
        if self.probe_timeout.is_zero() {
            return Err(ConfigError::ZeroDuration("probe_timeout"));
        }
        if self.identity_refresh_min.is_zero() {
            return Err(ConfigError::ZeroDuration("identity_refresh_min"));
        }
        if self.identity_refresh_min > self.identity_refresh_max {
            return Err(ConfigError::InvertedIdentityBounds {
                min_ms: duration_to_ms(self.identity_refresh_min),
                max_ms: duration_to_ms(self.identity_refresh_max),
            });
        }
        Ok(())
    }
}

impl Default for ScheduleSettings {
    fn default() -> Self {
        Self {
            batch_interval: BATCH_INTERVAL,
            probe_timeout: PROBE_TIMEOUT,
            identity_refresh_min: IDENTITY_REFRESH_MIN,
            identity_refresh_max: IDENTITY_REFRESH_MAX,
        }
    }
}
