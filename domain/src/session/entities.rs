//! Session domain entities

use super::channel::Channel;
use super::delivery::{DeliveryStatus, MessageLifecycleTracker, Transition};
use crate::auth::entities::{AuthResult, AuthToken};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque session identifier, stable for the session's lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(String);

impl SessionId {
    /// Generate a fresh id. WhatsApp sessions carry a `whatsapp-` prefix.
    pub fn generate(channel: Channel) -> Self {
        let id = uuid::Uuid::new_v4();
        match channel {
            Channel::Web => Self(id.to_string()),
            Channel::WhatsApp => Self(format!("whatsapp-{}", id)),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SessionId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Message identifier, unique within a session.
///
/// Server-assigned for assistant replies; `<millis>-<seq>` for messages created
/// locally.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageId(String);

impl MessageId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for MessageId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for MessageId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Who wrote a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Assistant,
}

impl Sender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sender::User => "user",
            Sender::Assistant => "assistant",
        }
    }
}

/// A message in a conversation (Entity)
///
/// Immutable once created, except for `delivery_status` which only moves
/// forward through [`MessageLifecycleTracker`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,
    pub sender: Sender,
    pub text: String,
    pub timestamp: DateTime<Utc>,
    pub delivery_status: DeliveryStatus,
}

impl Message {
    pub fn is_user(&self) -> bool {
        self.sender == Sender::User
    }
}

/// Current identity bound to a session
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Identity {
    #[default]
    Anonymous,
    Authenticated {
        subject_id: String,
        display_name: String,
        token: AuthToken,
    },
}

impl Identity {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Identity::Authenticated { .. })
    }

    pub fn token(&self) -> Option<&AuthToken> {
        match self {
            Identity::Anonymous => None,
            Identity::Authenticated { token, .. } => Some(token),
        }
    }

    pub fn display_name(&self) -> Option<&str> {
        match self {
            Identity::Anonymous => None,
            Identity::Authenticated { display_name, .. } => Some(display_name),
        }
    }
}

impl From<AuthResult> for Identity {
    fn from(result: AuthResult) -> Self {
        Identity::Authenticated {
            subject_id: result.subject_id,
            display_name: result.display_name,
            token: result.token,
        }
    }
}

/// One widget activation (Entity)
///
/// The message log is append-only and ordered by insertion; timestamps are
/// strictly increasing.
#[derive(Debug, Clone)]
pub struct ConversationSession {
    id: SessionId,
    channel: Channel,
    identity: Identity,
    messages: Vec<Message>,
    next_seq: u64,
}

impl ConversationSession {
    pub fn new(id: impl Into<SessionId>, channel: Channel) -> Self {
        Self {
            id: id.into(),
            channel,
            identity: Identity::Anonymous,
            messages: Vec::new(),
            next_seq: 0,
        }
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn channel(&self) -> Channel {
        self.channel
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn message(&self, id: &MessageId) -> Option<&Message> {
        self.messages.iter().find(|m| &m.id == id)
    }

    pub fn last_message(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// Append a user message with status `Sent`.
    pub fn push_user(&mut self, text: String) -> MessageId {
        let id = self.local_id();
        self.push(id, Sender::User, text)
    }

    /// Append an assistant message. `server_id` falls back to a local id.
    pub fn push_assistant(&mut self, server_id: Option<MessageId>, text: String) -> MessageId {
        let id = match server_id {
            Some(id) if !id.as_str().is_empty() && self.message(&id).is_none() => id,
            _ => self.local_id(),
        };
        self.push(id, Sender::Assistant, text)
    }

    /// Bind an authenticated identity, replacing the current one.
    pub fn bind(&mut self, result: AuthResult) {
        self.identity = result.into();
    }

    /// Drop back to anonymous. Returns whether an identity was bound.
    pub fn unbind(&mut self) -> bool {
        let was_authenticated = self.identity.is_authenticated();
        self.identity = Identity::Anonymous;
        was_authenticated
    }

    /// Move a message's delivery status forward.
    pub fn advance_status(&mut self, id: &MessageId, target: DeliveryStatus) -> Transition {
        MessageLifecycleTracker::advance(&mut self.messages, id, target)
    }

    #[cfg(test)]
    pub(crate) fn messages_mut(&mut self) -> &mut [Message] {
        &mut self.messages
    }

    fn push(&mut self, id: MessageId, sender: Sender, text: String) -> MessageId {
        let timestamp = self.next_timestamp();
        let delivery_status = match sender {
            Sender::User => DeliveryStatus::Sent,
            Sender::Assistant => DeliveryStatus::Delivered,
        };
        self.messages.push(Message {
            id: id.clone(),
            sender,
            text,
            timestamp,
            delivery_status,
        });
        id
    }

    fn local_id(&mut self) -> MessageId {
        self.next_seq += 1;
        MessageId(format!(
            "{}-{}",
            Utc::now().timestamp_millis(),
            self.next_seq
        ))
    }

    /// Wall clock, bumped past the previous message so ordering is strict.
    fn next_timestamp(&self) -> DateTime<Utc> {
        let now = Utc::now();
        match self.messages.last() {
            Some(last) if now <= last.timestamp => last.timestamp + Duration::microseconds(1),
            _ => now,
        }
    }
}
