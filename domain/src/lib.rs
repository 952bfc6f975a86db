//! Domain layer for deskchat
//!
//! This crate contains the core entities and value objects of the chat widget.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Session
//!
//! A [`ConversationSession`] is one widget activation: a stable id, a
//! [`Channel`], the current [`Identity`] and an append-only message log.
//!
//! ## Identity elevation
//!
//! Sessions start [`Identity::Anonymous`]. A successful password or
//! one-time-code login yields an [`AuthResult`] that the session binds as
//! [`Identity::Authenticated`]. [`LoginFlow`] tracks the login surface state.
//!
//! ## Delivery status
//!
//! User messages carry a [`DeliveryStatus`] (sent → delivered → read) that only
//! ever moves forward, enforced by [`MessageLifecycleTracker`].

pub mod auth;
pub mod core;
pub mod session;

// Re-export commonly used types
pub use auth::{
    entities::{
        AuthChallenge, AuthMode, AuthResult, AuthToken, OtpAck, PersonalData, PersonalDataKind,
    },
    flow::{LoginFlow, Notice},
};
pub use core::{error::DomainError, string::truncate};
pub use session::{
    canned::{CannedText, DEFAULT_CONTACT_PHONE},
    channel::{Channel, UserType},
    delivery::{DeliveryStatus, MessageLifecycleTracker, Transition},
    entities::{ConversationSession, Identity, Message, MessageId, Sender, SessionId},
    text::{normalize, normalize_reply},
};
