//! Identity gateway over the `/api/demo/...` endpoints

use super::client::BackendClient;
use super::protocol::{
    AuthResponse, CodeRequest, LoginRequest, PersonalDataRequest, PersonalDataResponse,
    VerifyRequest,
};
use async_trait::async_trait;
use deskchat_application::{CodeIssuance, GatewayError, IdentityGateway, LoginOutcome};
use deskchat_domain::{AuthToken, PersonalData, PersonalDataKind};

/// [`IdentityGateway`] backed by the HTTP auth endpoints
pub struct HttpIdentityGateway {
    client: BackendClient,
}

impl HttpIdentityGateway {
    pub fn new(client: BackendClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl IdentityGateway for HttpIdentityGateway {
    async fn login(&self, subject_id: &str, password: &str) -> Result<LoginOutcome, GatewayError> {
        let body = LoginRequest {
            student_id: subject_id,
            password,
        };
        let response: AuthResponse = self.client.post_json(&["api", "demo", "login"], &body).await?;
        Ok(response.into_login_outcome()?)
    }

    async fn request_code(
        &self,
        subject_id: &str,
        phone: &str,
    ) -> Result<CodeIssuance, GatewayError> {
        let body = CodeRequest {
            student_id: subject_id,
            phone,
        };
        let response: AuthResponse = self
            .client
            .post_json(&["api", "demo", "whatsapp", "request-otp"], &body)
            .await?;
        Ok(response.into_code_issuance())
    }

    async fn verify_code(
        &self,
        subject_id: &str,
        code: &str,
    ) -> Result<LoginOutcome, GatewayError> {
        let body = VerifyRequest {
            student_id: subject_id,
            otp: code,
        };
        let response: AuthResponse = self
            .client
            .post_json(&["api", "demo", "whatsapp", "verify-otp"], &body)
            .await?;
        Ok(response.into_login_outcome()?)
    }

    async fn personal_data(
        &self,
        token: &AuthToken,
        kind: PersonalDataKind,
    ) -> Result<PersonalData, GatewayError> {
        let response: PersonalDataResponse = self
            .client
            .post_json(
                &["api", "demo", "student-data"],
                &PersonalDataRequest::new(token, kind),
            )
            .await?;
        Ok(response.into_personal_data()?)
    }
}
