//! Infrastructure layer for deskchat
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer: HTTP gateways for the assistant and identity
//! services, configuration file loading, and the JSONL transcript logger.

pub mod config;
pub mod http;
pub mod logging;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileBackendConfig, FileConfig, FileLoggingConfig,
    FileOutputConfig, FileWidgetConfig,
};
pub use http::{BackendClient, HttpAssistantGateway, HttpError, HttpIdentityGateway};
pub use logging::JsonlConversationLogger;
