//! Analysis service client configuration.
//!
//! The analysis service hosts both AI endpoints (packaging analysis and
//! result summaries) under one base URL. Defaults point at a local
//! development server. Override via environment variables or explicit
//! construction.

use url::Url;

/// Default base URL for the analysis service.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:3001";

/// Default request timeout. Image analysis is slow; keep this generous.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Configuration for connecting to the analysis service.
///
/// Custom `Debug` implementation redacts the `api_token` field
/// to prevent credential leakage in log output.
#[derive(Clone)]
pub struct AnalysisConfig {
    /// Base URL of the analysis service.
    pub base_url: Url,
    /// Optional bearer token. Sent as `Authorization: Bearer <token>`.
    pub api_token: Option<String>,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl std::fmt::Debug for AnalysisConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnalysisConfig")
            .field("base_url", &self.base_url)
            .field("api_token", &self.api_token.as_ref().map(|_| "[REDACTED]"))
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl AnalysisConfig {
    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `FCC_ANALYSIS_URL` (default: `http://127.0.0.1:3001`)
    /// - `FCC_ANALYSIS_TOKEN` (optional)
    /// - `FCC_ANALYSIS_TIMEOUT_SECS` (default: 60)
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: env_url("FCC_ANALYSIS_URL", DEFAULT_BASE_URL)?,
            api_token: std::env::var("FCC_ANALYSIS_TOKEN")
                .ok()
                .filter(|t| !t.is_empty()),
            timeout_secs: std::env::var("FCC_ANALYSIS_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_TIMEOUT_SECS),
        })
    }

    /// Configuration for a service at `base_url`, no token, default timeout.
    pub fn with_base_url(base_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: Url::parse(base_url)
                .map_err(|e| ConfigError::InvalidUrl(base_url.to_string(), e.to_string()))?,
            api_token: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        })
    }

    /// Full URL for a path relative to the base URL.
    pub(crate) fn endpoint_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.as_str().trim_end_matches('/'), path)
    }
}

fn env_url(var: &str, default: &str) -> Result<Url, ConfigError> {
    let raw = std::env::var(var).unwrap_or_else(|_| default.to_string());
    Url::parse(&raw).map_err(|e| ConfigError::InvalidUrl(var.to_string(), e.to_string()))
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid URL for {0}: {1}")]
    InvalidUrl(String, String),
    #[error("API token contains characters not allowed in an HTTP header")]
    InvalidToken,
}
