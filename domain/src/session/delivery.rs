//! Delivery status progression for user messages.
//!
//! Mimics messaging-app ticks; this is presentation state, not a transport
//! acknowledgment. Status only ever moves forward: `Sent < Delivered < Read`.

use super::entities::{Message, MessageId, Sender};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Presentation-level delivery status of a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryStatus {
    Sent,
    Delivered,
    Read,
}

impl DeliveryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeliveryStatus::Sent => "sent",
            DeliveryStatus::Delivered => "delivered",
            DeliveryStatus::Read => "read",
        }
    }

    /// Tick marks shown next to the message.
    pub fn ticks(&self) -> &'static str {
        match self {
            DeliveryStatus::Sent => "✓",
            DeliveryStatus::Delivered | DeliveryStatus::Read => "✓✓",
        }
    }
}

impl fmt::Display for DeliveryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of a requested status change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Advanced {
        from: DeliveryStatus,
        to: DeliveryStatus,
    },
    /// Target equals the current status.
    Unchanged,
    /// Target is behind the current status; nothing changed.
    Rejected {
        current: DeliveryStatus,
        requested: DeliveryStatus,
    },
    /// Assistant messages have a fixed status; web messages never reach `Read`.
    NotTracked,
    UnknownMessage,
}

impl Transition {
    pub fn is_advanced(&self) -> bool {
        matches!(self, Transition::Advanced { .. })
    }
}

/// Forward-only status transitions. Pure, no I/O.
pub struct MessageLifecycleTracker;

impl MessageLifecycleTracker {
    /// Decide what moving from `current` to `target` means.
    ///
    /// Skipping forward (`Sent` → `Read`) is allowed since `Read` implies
    /// `Delivered`.
    pub fn check(current: DeliveryStatus, target: DeliveryStatus) -> Transition {
        if target > current {
            Transition::Advanced {
                from: current,
                to: target,
            }
        } else if target == current {
            Transition::Unchanged
        } else {
            Transition::Rejected {
                current,
                requested: target,
            }
        }
    }

    /// Apply a transition to the message with the given id.
    pub fn advance(messages: &mut [Message], id: &MessageId, target: DeliveryStatus) -> Transition {
        let Some(message) = messages.iter_mut().find(|m| &m.id == id) else {
            return Transition::UnknownMessage;
        };
        if message.sender != Sender::User {
            return Transition::NotTracked;
        }

        let transition = Self::check(message.delivery_status, target);
        if let Transition::Advanced { to, .. } = transition {
            message.delivery_status = to;
        }
        transition
    }
}
