//! API client configuration.

use std::env;
use std::time::Duration;

/// Where the API lives and how long to wait for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Base URL; endpoint paths are appended to it.
    pub base_url: String,
    /// Limit for a whole request, connection included.
    pub request_timeout: Duration,
}

impl ApiConfig {
    /// Default base URL, the development server.
    pub const DEFAULT_BASE_URL: &'static str = "http://localhost:5000";
    /// Default request limit.
    pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

    /// Builds a configuration from environment variables.
    ///
    /// Environment variables:
    /// - `POKEARENA_API_URL` - Base URL (default: `http://localhost:5000`)
    /// - `POKEARENA_TIMEOUT_SECS` - Request limit in seconds (default: 10)
    ///
    /// Unset or unparsable values fall back to the defaults.
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(url) = read_env::<String>("POKEARENA_API_URL") {
            config.base_url = url;
        }
        if let Some(secs) = read_env::<u64>("POKEARENA_TIMEOUT_SECS") {
            config.request_timeout = Duration::from_secs(secs.max(1));
        }

        config
    }

    /// Returns a copy pointing at `base_url`.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Returns a copy with the given request limit.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: Self::DEFAULT_BASE_URL.to_owned(),
            request_timeout: Self::DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
