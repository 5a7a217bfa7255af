//! Monitored endpoint identifier.

use std::fmt;
use std::sync::Arc;

use serde::{Serialize, Serializer};

use crate::app::validate_and_normalize_url;

/// One monitored endpoint.
///
/// Holds the name as configured (usually a bare hostname) and the normalized
/// URL the probe targets. Cloning is cheap: both strings are shared.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Endpoint {
    name: Arc<str>,
    url: Arc<str>,
}

impl Endpoint {
    /// Parses a configured endpoint (hostname or http(s) URL).
    ///
    /// Returns `None` (after logging a warning) if the entry is not usable.
    pub fn parse(raw: &str) -> Option<Self> {
        let url = validate_and_normalize_url(raw)?;
        Some(Self {
            name: Arc::from(raw.trim()),
            url: Arc::from(url),
        })
    }

    /// Name as configured.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// URL the probe targets.
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl Serialize for Endpoint {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.name)
    }
}
