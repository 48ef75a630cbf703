use std::env;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Connection settings for the generation endpoint. `BACKEND_URL` is the
/// only externally configured value; everything else is programmatic.
#[derive(Debug, Clone)]
pub struct BackendConfig {
    pub base_url: Option<String>,
    pub timeout: Option<Duration>,
}

impl Default for BackendConfig {
    fn default() -> Self {
        BackendConfig {
            base_url: None,
            timeout: None,
        }
    }
}

impl BackendConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        let base_url = env::var("BACKEND_URL").ok();

        BackendConfig {
            base_url,
            timeout: None,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// The resolved base URL, without a trailing slash.
    pub fn resolved_base_url(&self) -> String {
        let base = self
            .base_url
            .as_deref()
            .filter(|url| !url.is_empty())
            .unwrap_or(DEFAULT_BASE_URL);
        base.trim_end_matches('/').to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_base_url() {
        let config = BackendConfig::new();
        assert_eq!(config.resolved_base_url(), "http://localhost:8000");
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let config = BackendConfig::new().with_base_url("https://art.example.com/");
        assert_eq!(config.resolved_base_url(), "https://art.example.com");
    }

    #[test]
    fn test_empty_base_url_falls_back() {
        let config = BackendConfig::new().with_base_url("");
        assert_eq!(config.resolved_base_url(), DEFAULT_BASE_URL);
    }
}
