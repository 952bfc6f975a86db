//! Fixed assistant texts and quick replies.

use super::channel::Channel;

/// Phone number offered as the human-contact fallback.
pub const DEFAULT_CONTACT_PHONE: &str = "6222 8222";

const WEB_QUICK_REPLIES: &[&str] = &[
    "What courses do you offer?",
    "Primary school pricing?",
    "Location and schedule?",
    "How to enroll?",
];

const WEB_STUDENT_QUICK_REPLIES: &[&str] = &[
    "Check my fees",
    "My class schedule",
    "Update my profile",
    "General course info",
];

const WHATSAPP_QUICK_REPLIES: &[&str] = &[
    "What courses do you offer? 🎓",
    "P6 Math pricing? 💰",
    "Class locations? 📍",
    "Holiday schedule? 📅",
];

/// Canned assistant content that does not come from the backend.
pub struct CannedText;

impl CannedText {
    /// Opening greeting. Personalized when a display name is known.
    pub fn greeting(channel: Channel, display_name: Option<&str>) -> String {
        match (channel, display_name) {
            (Channel::Web, Some(name)) => format!(
                "Hi {}! I can help you with your personal information like fees, schedules, \
                 and general RMSS inquiries. How can I assist you today?",
                name
            ),
            (Channel::Web, None) => "Hi! I am RMSS AI Assistant. I can help you with course \
                 information, enrollment inquiries, study tips, and more. How can I assist you \
                 today?"
                .to_string(),
            (Channel::WhatsApp, name) => {
                let hello = match name {
                    Some(name) => format!("👋 Hello {}! I'm RMSS AI Assistant.", name),
                    None => "👋 Hello! I'm RMSS AI Assistant.".to_string(),
                };
                format!(
                    "{}\n\nI can help you with:\n🎓 Course information & pricing\n\
                     📅 Class schedules & holidays\n📍 Location details\n\
                     💰 Fee payments & enrollment\n\nHow can I assist you today?",
                    hello
                )
            }
        }
    }

    /// Greeting appended when a session is elevated mid-conversation.
    pub fn continuation_greeting(display_name: &str) -> String {
        format!(
            "Welcome back, {}! I can now help you with your personal information. \
             What would you like to know?",
            display_name
        )
    }

    pub fn logout_acknowledgement() -> &'static str {
        "You have been logged out. I can still help with general RMSS information. \
         How can I assist you?"
    }

    /// Apology shown for any failed conversation turn.
    pub fn fallback(contact_phone: &str) -> String {
        format!(
            "Sorry, I encountered an issue. Please try again or contact us at {}.",
            contact_phone
        )
    }

    pub fn quick_replies(channel: Channel, authenticated: bool) -> &'static [&'static str] {
        match (channel, authenticated) {
            (Channel::WhatsApp, _) => WHATSAPP_QUICK_REPLIES,
            (Channel::Web, true) => WEB_STUDENT_QUICK_REPLIES,
            (Channel::Web, false) => WEB_QUICK_REPLIES,
        }
    }
}
