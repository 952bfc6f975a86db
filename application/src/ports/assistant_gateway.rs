//! Assistant Gateway port
//!
//! Defines the interface for exchanging conversation turns with the remote
//! assistant service.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use deskchat_domain::{AuthToken, Sender, UserType};
use thiserror::Error;

/// Errors that can occur while talking to a backend service
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Unexpected status: {0}")]
    Status(u16),

    #[error("Malformed response: {0}")]
    Decode(String),

    #[error("Timeout")]
    Timeout,
}

/// One outbound conversation turn
#[derive(Debug, Clone)]
pub struct TurnRequest {
    pub message: String,
    pub session_id: String,
    pub user_type: UserType,
    pub auth_token: Option<AuthToken>,
}

/// The assistant's reply to a turn
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnReply {
    pub text: String,
    pub server_message_id: String,
}

/// A stored message returned by the history endpoint
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    pub id: String,
    pub sender: Sender,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

/// Gateway for the assistant endpoint
///
/// Implementations perform exactly one network call per method invocation
/// and never retry.
#[async_trait]
pub trait AssistantGateway: Send + Sync {
    /// Send one turn and return the reply
    async fn send_turn(&self, request: &TurnRequest) -> Result<TurnReply, GatewayError>;

    /// Fetch the server-side transcript for a session
    async fn fetch_history(&self, session_id: &str) -> Result<Vec<HistoryEntry>, GatewayError>;
}
