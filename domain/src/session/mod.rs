//! Conversation session domain.
//!
//! - [`entities::ConversationSession`]: one widget activation and its message log
//! - [`entities::Message`]: a single message within a session
//! - [`channel::Channel`]: presentation context (web widget or simulated WhatsApp)
//! - [`delivery::MessageLifecycleTracker`]: forward-only delivery status changes
//! - [`text`]: input normalization per channel
//! - [`canned::CannedText`]: greetings, quick replies and the fallback apology

pub mod canned;
pub mod channel;
pub mod delivery;
pub mod entities;
pub mod text;
