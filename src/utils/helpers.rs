/// Helper utilities

use std::time::Duration;

/// Turn a configured `host:port` into a base URL.
///
/// Consul and Nomad addresses are usually written without a scheme, in which
/// case plain HTTP is assumed. Explicit `http://` / `https://` is kept.
pub fn normalize_base_url(address: &str) -> String {
    let address = address.trim().trim_end_matches('/');

    if address.starts_with("http://") || address.starts_with("https://") {
        address.to_string()
    } else {
        format!("http://{}", address)
    }
}

/// Format duration to human-readable string
pub fn format_duration(duration: Duration) -> String {
    humantime::format_duration(duration).to_string()
}
