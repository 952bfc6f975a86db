//! Interactive chat module
//!
//! Provides a readline-based chat interface that plays the role of the widget.

mod command;
mod input;
mod repl;

pub use command::ReplCommand;
pub use repl::WidgetRepl;
