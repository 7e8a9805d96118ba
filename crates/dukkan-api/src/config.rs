//! Environment configuration for the API client.

use std::env;

/// Environment variable selecting the API base URL.
pub const API_URL_ENV: &str = "DUKKAN_API_URL";

/// Placeholder base URL used when the environment variable is absent.
/// Not production-safe; deployments must set [`API_URL_ENV`].
pub const DEFAULT_API_URL: &str = "http://localhost:8000/api";

/// Configuration for [`crate::HttpClient`].
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
}

impl ApiConfig {
    /// Reads the configuration from the environment, falling back to the
    /// placeholder default.
    pub fn from_env() -> Self {
        let base_url = env::var(API_URL_ENV).unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        Self { base_url }
    }

    /// Creates a configuration with an explicit base URL.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_base_url() {
        let config = ApiConfig::with_base_url("https://api.dukkan.example/v1");
        assert_eq!(config.base_url, "https://api.dukkan.example/v1");
    }

    #[test]
    fn test_default_is_a_local_placeholder() {
        assert_eq!(DEFAULT_API_URL, "http://localhost:8000/api");
    }
}
