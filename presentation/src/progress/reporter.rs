//! Typing indicator and live rendering of session updates

use crate::output::console::ConsoleFormatter;
use deskchat_application::ConversationObserver;
use deskchat_domain::{DeliveryStatus, Message, MessageId};
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

/// Prints appended messages and shows a spinner while the assistant is typing
///
/// User messages are not echoed since the line editor already shows them;
/// only their delivery ticks are printed as they advance.
pub struct TypingIndicator {
    spinner: Mutex<Option<ProgressBar>>,
    enabled: bool,
}

impl TypingIndicator {
    pub fn new() -> Self {
        Self {
            spinner: Mutex::new(None),
            enabled: true,
        }
    }

    /// Without a spinner; messages are still printed
    pub fn quiet() -> Self {
        Self {
            spinner: Mutex::new(None),
            enabled: false,
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg:.dim}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn spinner(&self) -> MutexGuard<'_, Option<ProgressBar>> {
        self.spinner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn stop(&self) {
        if let Some(pb) = self.spinner().take() {
            pb.finish_and_clear();
        }
    }

    /// Print above the spinner without tearing it
    fn print(&self, line: &str) {
        match self.spinner().as_ref() {
            Some(pb) => pb.suspend(|| println!("{}", line)),
            None => println!("{}", line),
        }
    }
}

impl Default for TypingIndicator {
    fn default() -> Self {
        Self::new()
    }
}

impl ConversationObserver for TypingIndicator {
    fn on_message_appended(&self, message: &Message) {
        if message.is_user() {
            return;
        }
        self.stop();
        println!("{}\n", ConsoleFormatter::format_message(message));
    }

    fn on_status_changed(&self, _id: &MessageId, status: DeliveryStatus) {
        self.print(&ConsoleFormatter::format_status(status));
    }

    fn on_turn_started(&self) {
        if !self.enabled {
            return;
        }
        let pb = ProgressBar::new_spinner();
        pb.set_style(Self::spinner_style());
        pb.set_message("Assistant is typing...");
        pb.enable_steady_tick(Duration::from_millis(100));
        *self.spinner() = Some(pb);
    }

    fn on_turn_finished(&self, _success: bool) {
        self.stop();
    }
}
