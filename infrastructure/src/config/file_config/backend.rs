//! Backend configuration from TOML (`[backend]` section)

use super::ConfigValidationError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8001";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

/// Raw backend configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileBackendConfig {
    /// Base URL the `/api/...` paths are appended to
    pub base_url: String,
    /// Per-request timeout in seconds
    pub timeout_seconds: u64,
}

impl Default for FileBackendConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
        }
    }
}

impl FileBackendConfig {
    /// Base URL without trailing slash, or the default if invalid.
    pub fn parse_base_url(&self) -> (String, Option<ConfigValidationError>) {
        let url = self.base_url.trim().trim_end_matches('/');
        if url.is_empty() {
            return (
                DEFAULT_BASE_URL.to_string(),
                Some(ConfigValidationError::EmptyBaseUrl),
            );
        }
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return (
                DEFAULT_BASE_URL.to_string(),
                Some(ConfigValidationError::InvalidBaseUrl(self.base_url.clone())),
            );
        }
        (url.to_string(), None)
    }

    pub fn parse_timeout(&self) -> (Duration, Option<ConfigValidationError>) {
        match self.timeout_seconds {
            0 => (
                Duration::from_secs(DEFAULT_TIMEOUT_SECONDS),
                Some(ConfigValidationError::InvalidTimeout),
            ),
            secs => (Duration::from_secs(secs), None),
        }
    }
}
