//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly; parse helpers turn them into domain and
//! application types, falling back to defaults for invalid values.

mod backend;
mod logging;
mod output;
mod widget;

pub use backend::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECONDS, FileBackendConfig};
pub use logging::FileLoggingConfig;
pub use output::FileOutputConfig;
pub use widget::FileWidgetConfig;

use deskchat_application::BehaviorConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A problem found in the loaded configuration
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigValidationError {
    #[error("backend.base_url cannot be empty")]
    EmptyBaseUrl,

    #[error("backend.base_url must start with http:// or https://, got '{0}'")]
    InvalidBaseUrl(String),

    #[error("backend.timeout_seconds cannot be 0")]
    InvalidTimeout,

    #[error("widget.channel: unknown value '{0}', expected 'web' or 'whatsapp'")]
    UnknownChannel(String),

    #[error("widget.contact_phone cannot be empty")]
    EmptyContactPhone,
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Backend endpoint settings
    pub backend: FileBackendConfig,
    /// Widget behavior
    pub widget: FileWidgetConfig,
    /// Transcript logging
    pub logging: FileLoggingConfig,
    /// Output settings
    pub output: FileOutputConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut issues = Vec::new();
        issues.extend(self.backend.parse_base_url().1);
        issues.extend(self.backend.parse_timeout().1);
        issues.extend(self.widget.parse_channel().1);
        issues.extend(self.widget.parse_contact_phone().1);
        issues
    }

    /// Application behavior derived from the `[widget]` section.
    pub fn behavior(&self) -> BehaviorConfig {
        BehaviorConfig::default().with_contact_phone(self.widget.parse_contact_phone().0)
    }
}
