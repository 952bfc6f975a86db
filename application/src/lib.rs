//! Application layer for deskchat
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.
//!
//! - [`MessageProtocolClient`]: one conversation turn in, one reply out
//! - [`AuthenticationController`]: password and one-time-code logins
//! - [`SessionManager`]: owns a session and orchestrates the other two

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::BehaviorConfig;
pub use ports::{
    assistant_gateway::{AssistantGateway, GatewayError, HistoryEntry, TurnReply, TurnRequest},
    conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger},
    conversation_observer::{ConversationObserver, NoObserver},
    identity_gateway::{CodeIssuance, IdentityGateway, LoginOutcome},
};
pub use use_cases::authenticate::{AuthError, AuthOperation, AuthenticationController, Elevation};
pub use use_cases::login::LoginAttempt;
pub use use_cases::message_protocol::{ChatError, MessageProtocolClient};
pub use use_cases::session_manager::{
    IgnoreReason, OpenSessionInput, SendOutcome, SessionEnv, SessionManager,
};
