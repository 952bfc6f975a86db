//! Configuration file loading for deskchat
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `--config <path>` specified file
//! 2. Project root: `./deskchat.toml` or `./.deskchat.toml`
//! 3. XDG config: `$XDG_CONFIG_HOME/deskchat/config.toml`
//! 4. Fallback: `~/.config/deskchat/config.toml`
//! 5. Default values
//!
//! `DESKCHAT_` environment variables override every file.

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECONDS, FileBackendConfig,
    FileConfig, FileLoggingConfig, FileOutputConfig, FileWidgetConfig,
};
pub use loader::ConfigLoader;
