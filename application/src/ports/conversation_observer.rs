//! Conversation observer port
//!
//! Lets the presentation layer react to session changes (typing indicator,
//! re-rendering ticks) without polling.

use deskchat_domain::{DeliveryStatus, Message, MessageId};

/// Callback for session updates
///
/// Called after the session lock is released, in the order the changes
/// happened.
pub trait ConversationObserver: Send + Sync {
    /// Called when a message is appended to the log
    fn on_message_appended(&self, message: &Message);

    /// Called when a user message's delivery status advanced
    fn on_status_changed(&self, _id: &MessageId, _status: DeliveryStatus) {}

    /// Called when a turn is dispatched to the assistant
    fn on_turn_started(&self) {}

    /// Called when the in-flight turn resolved, successfully or not
    fn on_turn_finished(&self, _success: bool) {}
}

/// No-op observer for when nobody is watching
pub struct NoObserver;

impl ConversationObserver for NoObserver {
    fn on_message_appended(&self, _message: &Message) {}
}
