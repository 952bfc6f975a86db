//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod assistant_gateway;
pub mod conversation_logger;
pub mod conversation_observer;
pub mod identity_gateway;
