//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod authenticate;
pub mod login;
pub mod message_protocol;
pub mod session_manager;
