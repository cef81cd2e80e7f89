//! Execution-layer client configuration.
//!
//! The execution layer is optional: when `EXECUTOR_URL` is unset the service
//! runs without onchain operations and [`ExecutorConfig::from_env`] returns
//! `Ok(None)`.

use url::Url;

/// Configuration for connecting to the execution layer.
///
/// Custom `Debug` implementation redacts the `api_token` field
/// to prevent credential leakage in log output.
#[derive(Clone)]
pub struct ExecutorConfig {
    /// Base URL of the execution-layer service.
    pub base_url: Url,
    /// Bearer token for API authentication. `None` sends no `Authorization` header.
    pub api_token: Option<String>,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl std::fmt::Debug for ExecutorConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExecutorConfig")
            .field("base_url", &self.base_url)
            .field("api_token", &self.api_token.as_ref().map(|_| "[REDACTED]"))
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl ExecutorConfig {
    /// Build a configuration for `base_url` with the default timeout and no token.
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            api_token: None,
            timeout_secs: 30,
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `EXECUTOR_URL` (optional; absent means no execution layer)
    /// - `EXECUTOR_API_TOKEN` (optional)
    /// - `EXECUTOR_TIMEOUT_SECS` (default: 30)
    pub fn from_env() -> Result<Option<Self>, ConfigError> {
        let Some(base_url) = env_url("EXECUTOR_URL")? else {
            return Ok(None);
        };

        Ok(Some(Self {
            base_url,
            api_token: std::env::var("EXECUTOR_API_TOKEN")
                .ok()
                .filter(|t| !t.trim().is_empty()),
            timeout_secs: std::env::var("EXECUTOR_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(30),
        }))
    }
}

fn env_url(var: &str) -> Result<Option<Url>, ConfigError> {
    match std::env::var(var) {
        Ok(raw) if !raw.trim().is_empty() => Url::parse(raw.trim())
            .map(Some)
            .map_err(|e| ConfigError::InvalidUrl(var.to_string(), e.to_string())),
        _ => Ok(None),
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid URL for {0}: {1}")]
    InvalidUrl(String, String),
    #[error("EXECUTOR_API_TOKEN contains characters not allowed in a header")]
    InvalidToken,
}
