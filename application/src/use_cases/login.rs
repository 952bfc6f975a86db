//! Login attempt use case
//!
//! Drives a [`LoginFlow`] with an [`AuthenticationController`]: marks the step
//! pending, dispatches, and applies the resulting transition. This is the
//! caller-side half of the flow; the controller itself stays stateless.

use super::authenticate::{AuthError, AuthenticationController, Elevation};
use crate::ports::identity_gateway::IdentityGateway;
use deskchat_domain::{AuthMode, DomainError, LoginFlow, OtpAck};
use tracing::{info, warn};

/// One open login surface
pub struct LoginAttempt<'a, G: IdentityGateway + 'static> {
    controller: &'a AuthenticationController<G>,
    flow: LoginFlow,
}

impl<'a, G: IdentityGateway + 'static> LoginAttempt<'a, G> {
    /// Open on the password step
    pub fn password(controller: &'a AuthenticationController<G>) -> Self {
        Self {
            controller,
            flow: LoginFlow::new(),
        }
    }

    /// Open on the one-time-code request step
    pub fn one_time_code(controller: &'a AuthenticationController<G>) -> Self {
        Self {
            controller,
            flow: LoginFlow::one_time_code(),
        }
    }

    pub fn flow(&self) -> &LoginFlow {
        &self.flow
    }

    pub fn mode(&self) -> AuthMode {
        self.flow.mode()
    }

    /// Switch to the password tab. Refused while a request is pending.
    pub fn use_password(&mut self) -> Result<(), AuthError> {
        self.flow.select_password().map_err(flow_error)
    }

    /// Switch to the one-time-code tab. Refused while a request is pending.
    pub fn use_one_time_code(&mut self) -> Result<(), AuthError> {
        self.flow.select_one_time_code().map_err(flow_error)
    }

    pub async fn submit_password(
        &mut self,
        subject_id: &str,
        password: &str,
    ) -> Result<Elevation, AuthError> {
        self.flow.begin(AuthMode::Password).map_err(flow_error)?;
        let result = self.controller.submit_password(subject_id, password).await;
        self.settle(result)
    }

    /// Request a code; on success the flow moves to the verify step.
    pub async fn request_code(
        &mut self,
        subject_id: &str,
        phone: &str,
    ) -> Result<OtpAck, AuthError> {
        self.flow.begin(AuthMode::OtpRequest).map_err(flow_error)?;
        match self.controller.request_one_time_code(subject_id, phone).await {
            Ok(ack) => {
                self.flow
                    .code_issued(subject_id.trim(), &ack)
                    .map_err(flow_error)?;
                Ok(ack)
            }
            Err(e) => Err(self.fail(e)),
        }
    }

    /// Verify a code for the subject it was issued to.
    pub async fn verify_code(&mut self, code: &str) -> Result<Elevation, AuthError> {
        self.flow.begin(AuthMode::OtpVerify).map_err(flow_error)?;
        let subject_id = self.flow.code_subject().unwrap_or_default().to_string();
        let result = self.controller.verify_one_time_code(&subject_id, code).await;
        self.settle(result)
    }

    /// Go back to the request step for a fresh code.
    pub fn request_new_code(&mut self) -> Result<(), AuthError> {
        self.flow.request_new_code().map_err(flow_error)
    }

    fn settle(&mut self, result: Result<Elevation, AuthError>) -> Result<Elevation, AuthError> {
        match result {
            Ok(elevation) => {
                self.flow.succeeded(elevation.message());
                Ok(elevation)
            }
            Err(e) => Err(self.fail(e)),
        }
    }

    fn fail(&mut self, error: AuthError) -> AuthError {
        if error.is_remote_rejection() {
            info!("Identity service refused {:?} step: {}", self.flow.mode(), error);
        } else {
            warn!("{:?} step failed: {}", self.flow.mode(), error);
        }
        self.flow.failed(error.user_message());
        error
    }
}

fn flow_error(error: DomainError) -> AuthError {
    AuthError::Validation(error.to_string())
}
