//! Endpoint URL validation and normalization utilities.

use log::warn;

/// Maximum URL length (2048 characters), matching common browser and server limits.
const MAX_URL_LENGTH: usize = 2048;

/// Validates and normalizes an endpoint into the URL that gets probed.
///
/// Bare hostnames get an `https://` prefix (the probe always uses a secure
/// transport unless the caller spells out `http://`). Entries carrying any other
/// scheme, entries without a host, and entries longer than `MAX_URL_LENGTH` are
/// rejected with a warning.
///
/// # Returns
///
/// `Some(normalized_url)` if the endpoint is usable, `None` otherwise.
pub fn validate_and_normalize_url(url: &str) -> Option<String> {
    let url = url.trim();
    if url.len() > MAX_URL_LENGTH {
        warn!(
            "Skipping endpoint exceeding maximum length ({} > {}): {}...",
            url.len(),
            MAX_URL_LENGTH,
            url.chars().take(50).collect::<String>()
        );
        return None;
    }

    let has_http_scheme = url.starts_with("http://") || url.starts_with("https://");
    if !has_http_scheme && url.contains("://") {
        warn!("Skipping unsupported scheme for endpoint: {url}");
        return None;
    }

    let normalized = if has_http_scheme {
        url.to_string()
    } else {
        format!("https://{url}")
    };

    match url::Url::parse(&normalized) {
        Ok(parsed) => match (parsed.scheme(), parsed.host_str()) {
            ("http" | "https", Some(host)) if !host.is_empty() => Some(normalized),
            ("http" | "https", _) => {
                warn!("Skipping endpoint without a host: {url}");
                None
            }
            _ => {
                warn!("Skipping unsupported scheme for endpoint: {url}");
                None
            }
        },
        Err(_) => {
            warn!("Skipping invalid endpoint: {url}");
            None
        }
    }
}
