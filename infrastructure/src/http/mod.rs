//! HTTP adapters for the assistant and identity services
//!
//! Every call is a single request with no retries. Wire payloads are decoded
//! in [`protocol`] and never leave this module.

mod assistant;
mod client;
pub mod error;
mod identity;
mod protocol;

#[cfg(test)]
pub(crate) mod test_support;

pub use assistant::HttpAssistantGateway;
pub use client::BackendClient;
pub use error::HttpError;
pub use identity::HttpIdentityGateway;
