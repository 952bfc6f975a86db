//! Channel and backend user type value objects

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Presentation context a session runs in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    /// Website chat widget. Preserves line breaks in user input.
    #[default]
    Web,
    /// Simulated messaging app. Single-line bubbles, full delivery ticks.
    #[serde(alias = "whatsapp-simulated")]
    WhatsApp,
}

impl Channel {
    /// Caller category reported to the assistant endpoint.
    pub fn user_type(&self, authenticated: bool) -> UserType {
        match (self, authenticated) {
            (Channel::WhatsApp, _) => UserType::WhatsAppParent,
            (Channel::Web, true) => UserType::Student,
            (Channel::Web, false) => UserType::Visitor,
        }
    }

    /// Whether user messages on this channel progress all the way to `read`.
    pub fn tracks_read_receipts(&self) -> bool {
        matches!(self, Channel::WhatsApp)
    }

    /// Whether this channel is restricted to single-line message bubbles.
    pub fn is_single_line(&self) -> bool {
        matches!(self, Channel::WhatsApp)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Channel::Web => "web",
            Channel::WhatsApp => "whatsapp",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Channel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "web" => Ok(Channel::Web),
            "whatsapp" | "whatsapp-simulated" | "wa" => Ok(Channel::WhatsApp),
            other => Err(format!(
                "unknown channel '{}' (expected 'web' or 'whatsapp')",
                other
            )),
        }
    }
}

/// Caller category sent as `user_type` on each conversation turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserType {
    Visitor,
    Student,
    #[serde(rename = "whatsapp_parent")]
    WhatsAppParent,
}

impl UserType {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserType::Visitor => "visitor",
            UserType::Student => "student",
            UserType::WhatsAppParent => "whatsapp_parent",
        }
    }
}

impl fmt::Display for UserType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
