//! Presentation layer for deskchat
//!
//! This crate contains the CLI definition, console formatting, the typing
//! indicator, and the interactive chat REPL that plays the widget front end.

pub mod chat;
pub mod cli;
pub mod config;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use chat::{ReplCommand, WidgetRepl};
pub use cli::commands::{ChannelArg, Cli};
pub use config::ReplConfig;
pub use output::console::ConsoleFormatter;
pub use progress::reporter::TypingIndicator;
