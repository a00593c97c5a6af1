//! Catalog base-URL resolution.
//!
//! The base URL is resolved once at startup and carried explicitly in
//! [`ApiConfig`], which the client is constructed with — no process-global
//! state, nothing re-read per request.

/// Fixed endpoint used for local development when no override is set.
pub const DEV_BASE_URL: &str = "http://localhost:5001";

/// Environment variable holding an optional base-URL override.
pub const OVERRIDE_ENV: &str = "KITABU_API_URL";

/// Resolved API configuration, passed into [`crate::client::CatalogClient`].
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Prefix for every API path. May be empty, meaning paths are issued
    /// relative to the ambient origin.
    pub base_url: String,
}

impl ApiConfig {
    /// Resolve the base URL from an optional override and the current host.
    pub fn resolve(override_url: Option<&str>, host: &str) -> Self {
        Self {
            base_url: resolve_base_url(override_url, host),
        }
    }
}

/// Pure resolution rule, evaluated once at load time:
///
/// 1. A present, non-empty override is used verbatim.
/// 2. Otherwise a loopback host selects the fixed dev endpoint.
/// 3. Otherwise the base is empty and paths resolve same-origin relative.
pub fn resolve_base_url(override_url: Option<&str>, host: &str) -> String {
    if let Some(url) = override_url {
        if !url.is_empty() {
            return url.to_string();
        }
    }
    match host {
        "localhost" | "127.0.0.1" => DEV_BASE_URL.to_string(),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn override_wins_verbatim() {
        let base = resolve_base_url(Some("https://books.example.com"), "localhost");
        assert_eq!(base, "https://books.example.com");
    }

    #[test]
    fn empty_override_is_ignored() {
        let base = resolve_base_url(Some(""), "localhost");
        assert_eq!(base, DEV_BASE_URL);
    }

    #[test]
    fn loopback_hosts_use_dev_endpoint() {
        assert_eq!(resolve_base_url(None, "localhost"), DEV_BASE_URL);
        assert_eq!(resolve_base_url(None, "127.0.0.1"), DEV_BASE_URL);
    }

    #[test]
    fn other_hosts_resolve_same_origin() {
        assert_eq!(resolve_base_url(None, "books.example.com"), "");
    }
}
