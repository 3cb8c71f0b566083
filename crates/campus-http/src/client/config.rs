//! Configuration for the campus HTTP client.

use std::collections::BTreeMap;

/// Configuration for the campus HTTP client.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpConfig {
    /// Base URL every request path is resolved against.
    pub base_url: String,
    /// Request timeout in milliseconds.
    pub request_timeout_ms: u64,
    /// Headers sent with every request.
    pub default_headers: BTreeMap<String, String>,
    pub user_agent: String,
    /// Enable request logging.
    pub enable_logging: bool,
}

impl Default for HttpConfig {
    fn default() -> Self {
        let mut default_headers = BTreeMap::new();
        default_headers.insert("Accept".to_string(), "application/json".to_string());
        HttpConfig {
            base_url: "http://localhost:8000/api".to_string(),
            request_timeout_ms: 10_000,
            default_headers,
            user_agent: concat!("campus-http/", env!("CARGO_PKG_VERSION")).to_string(),
            enable_logging: true,
        }
    }
}

impl HttpConfig {
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        HttpConfig {
            base_url: base_url.into(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = HttpConfig::default();
        assert_eq!(config.base_url, "http://localhost:8000/api");
        assert_eq!(config.request_timeout_ms, 10_000);
        assert_eq!(
            config.default_headers.get("Accept").map(String::as_str),
            Some("application/json")
        );
        assert!(config.user_agent.starts_with("campus-http/"));
    }

    #[test]
    fn test_partial_override() {
        let config = HttpConfig {
            request_timeout_ms: 500,
            ..HttpConfig::with_base_url("http://10.0.0.2/api")
        };
        assert_eq!(config.base_url, "http://10.0.0.2/api");
        assert_eq!(config.request_timeout_ms, 500);
        assert!(config.enable_logging);
    }
}
