//! Presentation-level configuration
//!
//! Configuration for REPL behavior.

use std::path::PathBuf;

/// REPL configuration for the presentation layer
#[derive(Debug, Clone)]
pub struct ReplConfig {
    /// Path to the line-editor history file; no history when unset
    pub history_file: Option<PathBuf>,
}

impl Default for ReplConfig {
    fn default() -> Self {
        Self {
            history_file: dirs::data_dir().map(|p| p.join("deskchat").join("history.txt")),
        }
    }
}
