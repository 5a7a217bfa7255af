//! Error type definitions.
//!
//! This module defines all error and failure types used throughout the application.

use std::path::PathBuf;

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use serde::Serialize;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing an HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),
}

/// Error types for invalid configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A duration option was set to zero.
    #[error("{0} must be greater than zero")]
    ZeroDuration(&'static str),

    /// The identity refresh bounds are inverted.
    #[error("identity refresh bounds are inverted: min {min_ms}ms > max {max_ms}ms")]
    InvertedIdentityBounds { min_ms: u64, max_ms: u64 },

    /// The identity lookup URL does not parse.
    #[error("invalid identity lookup URL: {0}")]
    InvalidIdentityUrl(String),

    /// The endpoints file could not be read.
    #[error("failed to read endpoints file {}: {source}", path.display())]
    EndpointsFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// No valid endpoint remained after loading.
    #[error("no valid endpoints configured")]
    NoEndpoints,
}

/// Error types for the identity lookup.
///
/// None of these are fatal: the identity timeline turns them into an
/// `IdentitySnapshot::Unavailable` and tries again on its next firing.
#[derive(Error, Debug)]
pub enum IdentityError {
    /// Network failure or non-success HTTP status.
    #[error("identity lookup request failed: {0}")]
    Request(#[from] ReqwestError),

    /// Response body was not the expected JSON document.
    #[error("identity lookup returned a malformed response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The service answered with an error payload (e.g. rate limited).
    #[error("identity lookup service error: {0}")]
    Service(String),
}

/// Classified outcome of a failed reachability probe.
///
/// The `Display` output is the message shown next to a failed endpoint.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ProbeFailure {
    /// No definitive response arrived within the probe timeout.
    #[error("Timeout")]
    Timeout,
    /// Any other transport failure (DNS, refused connection, TLS, reset, ...).
    #[error("No response")]
    NoResponse,
}

/// Types of failures tracked in the session failure statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum ErrorType {
    // Probe failures
    ProbeTimeout,
    ProbeConnectError,
    ProbeRequestError,
    ProbeRedirectError,
    ProbeBuilderError,
    ProbeTaskPanic,
    ProbeOtherError,
    // Identity lookup failures
    IdentityRequestError,
    IdentityStatusError,
    IdentityDecodeError,
    IdentityServiceError,
}

impl std::fmt::Display for ErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ErrorType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorType::ProbeTimeout => "Probe timeout",
            ErrorType::ProbeConnectError => "Probe connect error",
            ErrorType::ProbeRequestError => "Probe request error",
            ErrorType::ProbeRedirectError => "Probe redirect error",
            ErrorType::ProbeBuilderError => "Probe builder error",
            ErrorType::ProbeTaskPanic => "Probe task panic",
            ErrorType::ProbeOtherError => "Probe other error",
            ErrorType::IdentityRequestError => "Identity request error",
            ErrorType::IdentityStatusError => "Identity HTTP status error",
            ErrorType::IdentityDecodeError => "Identity decode error",
            ErrorType::IdentityServiceError => "Identity service error",
        }
    }

    /// Whether this type belongs to the probe family.
    pub fn is_probe(&self) -> bool {
        matches!(
            self,
            ErrorType::ProbeTimeout
                | ErrorType::ProbeConnectError
                | ErrorType::ProbeRequestError
                | ErrorType::ProbeRedirectError
                | ErrorType::ProbeBuilderError
                | ErrorType::ProbeTaskPanic
                | ErrorType::ProbeOtherError
        )
    }

    /// The probe failure classification this error type is reported as.
    ///
    /// Identity errors have no probe classification and return `None`.
    pub fn probe_failure(&self) -> Option<ProbeFailure> {
        match self {
            ErrorType::ProbeTimeout => Some(ProbeFailure::Timeout),
            other if other.is_probe() => Some(ProbeFailure::NoResponse),
            _ => None,
        }
    }
}
