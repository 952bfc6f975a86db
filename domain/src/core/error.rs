//! Domain error types

use crate::auth::entities::AuthMode;
use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A required field was empty. The message is shown inline to the user.
    #[error("{0}")]
    Validation(String),

    #[error("Cannot {action} while in {from} step")]
    InvalidTransition { from: AuthMode, action: &'static str },

    #[error("A request is already in progress")]
    RequestPending,
}
