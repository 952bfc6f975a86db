//! Identity Gateway port
//!
//! Responses are decoded into tagged outcomes at the adapter boundary; nothing
//! above this port looks at raw payloads.

use super::assistant_gateway::GatewayError;
use async_trait::async_trait;
use deskchat_domain::{AuthToken, PersonalData, PersonalDataKind};

/// Outcome of a password login or code verification
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    Granted {
        message: String,
        token: AuthToken,
        display_name: Option<String>,
    },
    Refused {
        message: String,
    },
}

/// Outcome of a one-time-code issuance request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodeIssuance {
    Issued { message: String },
    Refused { message: String },
}

/// Gateway for the identity service
#[async_trait]
pub trait IdentityGateway: Send + Sync {
    async fn login(&self, subject_id: &str, password: &str) -> Result<LoginOutcome, GatewayError>;

    async fn request_code(&self, subject_id: &str, phone: &str)
    -> Result<CodeIssuance, GatewayError>;

    async fn verify_code(&self, subject_id: &str, code: &str) -> Result<LoginOutcome, GatewayError>;

    /// Look up personal records with a previously issued token
    async fn personal_data(
        &self,
        token: &AuthToken,
        kind: PersonalDataKind,
    ) -> Result<PersonalData, GatewayError>;
}
