//! Error types for the HTTP adapters

use deskchat_application::GatewayError;
use thiserror::Error;

/// Result type alias for HTTP operations
pub type Result<T> = std::result::Result<T, HttpError>;

/// Errors that can occur while talking to the backend over HTTP
#[derive(Error, Debug)]
pub enum HttpError {
    #[error("Invalid base URL '{0}'")]
    InvalidBaseUrl(String),

    #[error("Failed to build HTTP client: {0}")]
    Client(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Request failed: {0}")]
    Request(String),

    #[error("Unexpected status {0}")]
    Status(u16),

    #[error("Failed to parse response: {error}\nRaw response: {raw}")]
    ParseError { error: String, raw: String },

    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),
}

impl From<reqwest::Error> for HttpError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            HttpError::Timeout
        } else {
            HttpError::Request(e.to_string())
        }
    }
}

impl From<HttpError> for GatewayError {
    fn from(e: HttpError) -> Self {
        match e {
            HttpError::Timeout => GatewayError::Timeout,
            HttpError::Status(code) => GatewayError::Status(code),
            HttpError::ParseError { error, .. } => GatewayError::Decode(error),
            HttpError::UnexpectedResponse(msg) => GatewayError::Decode(msg),
            other => GatewayError::ConnectionError(other.to_string()),
        }
    }
}
