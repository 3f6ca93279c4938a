use std::env;
use std::time::Duration;

use url::Url;

use crate::error::ConfigError;

pub const DEFAULT_BASE_URL: &str = "https://dnyanai-backend-1.onrender.com/api/progress";
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Where the remote progress service lives and how long to wait for it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProgressApiConfig {
    pub base_url: String,
    /// `None` disables the per-request timeout.
    pub timeout: Option<Duration>,
}

impl Default for ProgressApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Some(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
        }
    }
}

impl ProgressApiConfig {
    /// Validate a base URL and build a config.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidBaseUrl` unless the URL parses and uses
    /// `http` or `https`.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, ConfigError> {
        let trimmed = base_url.trim();
        let parsed =
            Url::parse(trimmed).map_err(|_| ConfigError::InvalidBaseUrl(trimmed.to_string()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidBaseUrl(trimmed.to_string()));
        }
        Ok(Self {
            base_url: trimmed.trim_end_matches('/').to_string(),
            timeout,
        })
    }

    /// Read `PROGRESS_API_URL` and `PROGRESS_API_TIMEOUT_SECS`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if either variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let base_url = lookup("PROGRESS_API_URL")
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let timeout = match lookup("PROGRESS_API_TIMEOUT_SECS") {
            None => Some(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
            Some(raw) => {
                let secs: u64 = raw
                    .trim()
                    .parse()
                    .map_err(|_| ConfigError::InvalidTimeout(raw.clone()))?;
                (secs > 0).then(|| Duration::from_secs(secs))
            }
        };

        Self::new(&base_url, timeout)
    }
}
