//! Identity elevation domain.
//!
//! - [`entities::AuthChallenge`]: credentials collected by the login surface
//! - [`entities::AuthResult`]: the outcome of a successful login
//! - [`flow::LoginFlow`]: password / one-time-code surface state machine

pub mod entities;
pub mod flow;
