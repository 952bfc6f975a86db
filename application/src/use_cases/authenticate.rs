//! Authentication use case
//!
//! Password login and the one-time-code flow against the identity service.
//! The controller never binds anything to a session: success is returned as
//! an [`Elevation`] and the caller decides what to do with it.

use crate::ports::assistant_gateway::GatewayError;
use crate::ports::identity_gateway::{CodeIssuance, IdentityGateway, LoginOutcome};
use deskchat_domain::{
    AuthChallenge, AuthResult, AuthToken, DomainError, Identity, OtpAck, PersonalData,
    PersonalDataKind,
};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Identity service operation, used to pick the unreachable apology
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthOperation {
    Login,
    RequestCode,
    VerifyCode,
    PersonalData,
}

impl AuthOperation {
    /// Fixed text shown when the identity service cannot be reached.
    pub fn unreachable_message(&self) -> &'static str {
        match self {
            AuthOperation::Login => "Login failed. Please check your credentials.",
            AuthOperation::RequestCode => "OTP request failed. Please try again.",
            AuthOperation::VerifyCode => "OTP verification failed. Please try again.",
            AuthOperation::PersonalData => {
                "Data service temporarily unavailable. Please try again."
            }
        }
    }
}

impl fmt::Display for AuthOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AuthOperation::Login => "login",
            AuthOperation::RequestCode => "code request",
            AuthOperation::VerifyCode => "code verification",
            AuthOperation::PersonalData => "personal data lookup",
        })
    }
}

/// Errors that can occur during authentication
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Required field missing; never reached the network.
    #[error("{0}")]
    Validation(String),

    #[error("Invalid credentials: {0}")]
    InvalidCredentials(String),

    #[error("Invalid code: {0}")]
    InvalidCode(String),

    /// Code issuance refused (e.g. id and phone do not match).
    #[error("Code request refused: {0}")]
    Rejected(String),

    #[error("Identity service unreachable during {0}")]
    Unreachable(AuthOperation),

    #[error("Not signed in")]
    NotAuthenticated,
}

impl AuthError {
    /// Text for the login surface. Server messages are passed through verbatim.
    pub fn user_message(&self) -> String {
        match self {
            AuthError::Validation(message)
            | AuthError::InvalidCredentials(message)
            | AuthError::InvalidCode(message)
            | AuthError::Rejected(message) => message.clone(),
            AuthError::Unreachable(operation) => operation.unreachable_message().to_string(),
            AuthError::NotAuthenticated => "Please log in first.".to_string(),
        }
    }

    pub fn is_remote_rejection(&self) -> bool {
        matches!(
            self,
            AuthError::InvalidCredentials(_) | AuthError::InvalidCode(_) | AuthError::Rejected(_)
        )
    }
}

impl From<DomainError> for AuthError {
    fn from(error: DomainError) -> Self {
        AuthError::Validation(error.to_string())
    }
}

/// Proof of a successful login.
///
/// Only [`AuthenticationController`] can create one, so a session can only be
/// elevated after the identity service said yes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Elevation {
    result: AuthResult,
    message: String,
}

impl Elevation {
    pub(crate) fn new(result: AuthResult, message: String) -> Self {
        Self { result, message }
    }

    pub fn result(&self) -> &AuthResult {
        &self.result
    }

    /// Server welcome text, shown verbatim.
    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn into_result(self) -> AuthResult {
        self.result
    }
}

/// Controller for the two login flows
pub struct AuthenticationController<G: IdentityGateway + 'static> {
    gateway: Arc<G>,
}

impl<G: IdentityGateway + 'static> AuthenticationController<G> {
    pub fn new(gateway: Arc<G>) -> Self {
        Self { gateway }
    }

    /// Log in with a subject id and password.
    pub async fn submit_password(
        &self,
        subject_id: &str,
        password: &str,
    ) -> Result<Elevation, AuthError> {
        let challenge = AuthChallenge::password(subject_id, password);
        challenge.validate()?;

        info!("Password login for {}", challenge.subject_id);
        let outcome = self
            .gateway
            .login(&challenge.subject_id, &challenge.secret)
            .await
            .map_err(|e| service_unreachable(AuthOperation::Login, e))?;

        match outcome {
            LoginOutcome::Granted {
                message,
                token,
                display_name,
            } => Ok(grant(&challenge, message, token, display_name)),
            LoginOutcome::Refused { message } => {
                info!("Password login refused for {}", challenge.subject_id);
                Err(AuthError::InvalidCredentials(message))
            }
        }
    }

    /// Ask the identity service to issue a one-time code.
    ///
    /// On success the caller moves its login surface to the verify step.
    pub async fn request_one_time_code(
        &self,
        subject_id: &str,
        phone: &str,
    ) -> Result<OtpAck, AuthError> {
        let challenge = AuthChallenge::otp_request(subject_id, phone);
        challenge.validate()?;

        info!("Requesting one-time code for {}", challenge.subject_id);
        let issuance = self
            .gateway
            .request_code(&challenge.subject_id, &challenge.secret)
            .await
            .map_err(|e| service_unreachable(AuthOperation::RequestCode, e))?;

        match issuance {
            CodeIssuance::Issued { message } => Ok(OtpAck { message }),
            CodeIssuance::Refused { message } => Err(AuthError::Rejected(message)),
        }
    }

    /// Verify a received one-time code.
    pub async fn verify_one_time_code(
        &self,
        subject_id: &str,
        code: &str,
    ) -> Result<Elevation, AuthError> {
        let challenge = AuthChallenge::otp_verify(subject_id, code);
        challenge.validate()?;

        info!("Verifying one-time code for {}", challenge.subject_id);
        let outcome = self
            .gateway
            .verify_code(&challenge.subject_id, &challenge.secret)
            .await
            .map_err(|e| service_unreachable(AuthOperation::VerifyCode, e))?;

        match outcome {
            LoginOutcome::Granted {
                message,
                token,
                display_name,
            } => Ok(grant(&challenge, message, token, display_name)),
            LoginOutcome::Refused { message } => Err(AuthError::InvalidCode(message)),
        }
    }

    /// Look up personal records for an authenticated identity.
    pub async fn personal_data(
        &self,
        identity: &Identity,
        kind: PersonalDataKind,
    ) -> Result<PersonalData, AuthError> {
        let token = identity.token().ok_or(AuthError::NotAuthenticated)?;
        self.gateway
            .personal_data(token, kind)
            .await
            .map_err(|e| service_unreachable(AuthOperation::PersonalData, e))
    }
}

fn service_unreachable(operation: AuthOperation, error: GatewayError) -> AuthError {
    warn!("Identity service {} failed: {}", operation, error);
    AuthError::Unreachable(operation)
}

fn grant(
    challenge: &AuthChallenge,
    message: String,
    token: AuthToken,
    display_name: Option<String>,
) -> Elevation {
    // Fall back to the id when the service omits a name
    let display_name = display_name
        .filter(|name| !name.trim().is_empty())
        .unwrap_or_else(|| challenge.subject_id.clone());
    info!("Login granted for {}", challenge.subject_id);
    Elevation::new(
        AuthResult::new(challenge.subject_id.clone(), display_name, token),
        message,
    )
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// In-memory identity service mirroring the demo backend
    pub(crate) struct FakeIdentityService {
        pub(crate) calls: Mutex<Vec<String>>,
        pub(crate) offline: bool,
    }

    impl FakeIdentityService {
        pub(crate) fn new() -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                offline: false,
            }
        }

        pub(crate) fn offline() -> Self {
            Self {
                offline: true,
                ..Self::new()
            }
        }

        pub(crate) fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }

        fn record(&self, call: &str) -> Result<(), GatewayError> {
            self.calls.lock().unwrap().push(call.to_string());
            if self.offline {
                Err(GatewayError::ConnectionError("connection refused".to_string()))
            } else {
                Ok(())
            }
        }

        fn granted(subject_id: &str) -> LoginOutcome {
            LoginOutcome::Granted {
                message: "Welcome back, Emily Tan!".to_string(),
                token: AuthToken::new(format!("demo_token_{}_abcd1234", subject_id)),
                display_name: Some("Emily Tan".to_string()),
            }
        }
    }

    #[async_trait]
    impl IdentityGateway for FakeIdentityService {
        async fn login(
            &self,
            subject_id: &str,
            password: &str,
        ) -> Result<LoginOutcome, GatewayError> {
            self.record("login")?;
            if subject_id == "ST001" && password == "demo123" {
                Ok(Self::granted(subject_id))
            } else {
                Ok(LoginOutcome::Refused {
                    message: "Invalid student ID or password. Please try again.".to_string(),
                })
            }
        }

        async fn request_code(
            &self,
            subject_id: &str,
            phone: &str,
        ) -> Result<CodeIssuance, GatewayError> {
            self.record("request_code")?;
            if subject_id == "ST001" && phone == "+6591234567" {
                Ok(CodeIssuance::Issued {
                    message: "📱 OTP sent to 4567 (Demo OTP: 123456)".to_string(),
                })
            } else {
                Ok(CodeIssuance::Refused {
                    message: "Student ID and phone number do not match our records.".to_string(),
                })
            }
        }

        async fn verify_code(
            &self,
            subject_id: &str,
            code: &str,
        ) -> Result<LoginOutcome, GatewayError> {
            self.record("verify_code")?;
            if code == "123456" {
                Ok(Self::granted(subject_id))
            } else {
                Ok(LoginOutcome::Refused {
                    message: "❌ Invalid or expired OTP. Please request a new one.".to_string(),
                })
            }
        }

        async fn personal_data(
            &self,
            token: &AuthToken,
            kind: PersonalDataKind,
        ) -> Result<PersonalData, GatewayError> {
            self.record("personal_data")?;
            if token.as_str().starts_with("demo_token_") {
                Ok(PersonalData::Found(format!("{} for Emily Tan", kind.as_str())))
            } else {
                Ok(PersonalData::Denied("Session expired. Please login again.".to_string()))
            }
        }
    }

    fn controller(
        service: FakeIdentityService,
    ) -> (AuthenticationController<FakeIdentityService>, Arc<FakeIdentityService>) {
        let service = Arc::new(service);
        (AuthenticationController::new(service.clone()), service)
    }

    #[tokio::test]
    async fn test_password_success() {
        let (auth, _) = controller(FakeIdentityService::new());

        let elevation = auth.submit_password("ST001", "demo123").await.unwrap();
        assert_eq!(elevation.result().display_name, "Emily Tan");
        assert_eq!(elevation.result().subject_id, "ST001");
        assert_eq!(elevation.message(), "Welcome back, Emily Tan!");
        assert_eq!(elevation.result().token.as_str(), "demo_token_ST001_abcd1234");
    }

    #[tokio::test]
    async fn test_password_refusal_is_verbatim() {
        let (auth, _) = controller(FakeIdentityService::new());

        let err = auth.submit_password("ST001", "wrong").await.unwrap_err();
        assert_eq!(
            err,
            AuthError::InvalidCredentials(
                "Invalid student ID or password. Please try again.".to_string()
            )
        );
        assert_eq!(err.user_message(), "Invalid student ID or password. Please try again.");
        assert!(err.is_remote_rejection());
    }

    #[tokio::test]
    async fn test_empty_fields_never_reach_the_network() {
        let (auth, service) = controller(FakeIdentityService::new());

        assert!(matches!(
            auth.submit_password("", "demo123").await,
            Err(AuthError::Validation(_))
        ));
        assert!(matches!(
            auth.request_one_time_code("ST001", "").await,
            Err(AuthError::Validation(_))
        ));
        assert_eq!(
            auth.verify_one_time_code("ST001", " ").await,
            Err(AuthError::Validation("Please enter the OTP code".to_string()))
        );
        assert_eq!(service.call_count(), 0);
    }

    #[tokio::test]
    async fn test_transport_failure_is_unreachable_with_fixed_text() {
        let (auth, _) = controller(FakeIdentityService::offline());

        let err = auth.submit_password("ST001", "demo123").await.unwrap_err();
        assert_eq!(err, AuthError::Unreachable(AuthOperation::Login));
        assert_eq!(err.user_message(), "Login failed. Please check your credentials.");
        assert!(!err.is_remote_rejection());

        let err = auth.verify_one_time_code("ST001", "123456").await.unwrap_err();
        assert_eq!(err.user_message(), "OTP verification failed. Please try again.");
    }

    #[tokio::test]
    async fn test_otp_request_and_verify() {
        let (auth, _) = controller(FakeIdentityService::new());

        let ack = auth
            .request_one_time_code("ST001", " +6591234567 ")
            .await
            .unwrap();
        assert!(ack.message.contains("OTP sent"));

        let err = auth.request_one_time_code("ST001", "+6500000000").await.unwrap_err();
        assert_eq!(
            err.user_message(),
            "Student ID and phone number do not match our records."
        );

        let err = auth.verify_one_time_code("ST001", "000000").await.unwrap_err();
        assert_eq!(
            err,
            AuthError::InvalidCode(
                "❌ Invalid or expired OTP. Please request a new one.".to_string()
            )
        );

        let elevation = auth.verify_one_time_code("ST001", "123456").await.unwrap();
        assert_eq!(elevation.result().display_name, "Emily Tan");
    }

    #[tokio::test]
    async fn test_missing_display_name_falls_back_to_subject() {
        struct NamelessService;

        #[async_trait]
        impl IdentityGateway for NamelessService {
            async fn login(&self, _s: &str, _p: &str) -> Result<LoginOutcome, GatewayError> {
                Ok(LoginOutcome::Granted {
                    message: "ok".to_string(),
                    token: AuthToken::new("t"),
                    display_name: None,
                })
            }
            async fn request_code(&self, _s: &str, _p: &str) -> Result<CodeIssuance, GatewayError> {
                Err(GatewayError::Timeout)
            }
            async fn verify_code(&self, _s: &str, _c: &str) -> Result<LoginOutcome, GatewayError> {
                Err(GatewayError::Timeout)
            }
            async fn personal_data(
                &self,
                _t: &AuthToken,
                _k: PersonalDataKind,
            ) -> Result<PersonalData, GatewayError> {
                Err(GatewayError::Timeout)
            }
        }

        let auth = AuthenticationController::new(Arc::new(NamelessService));
        let elevation = auth.submit_password("ST009", "pw").await.unwrap();
        assert_eq!(elevation.result().display_name, "ST009");
    }

    #[tokio::test]
    async fn test_personal_data_requires_identity() {
        let (auth, service) = controller(FakeIdentityService::new());

        assert_eq!(
            auth.personal_data(&Identity::Anonymous, PersonalDataKind::Fees).await,
            Err(AuthError::NotAuthenticated)
        );
        assert_eq!(service.call_count(), 0);

        let elevation = auth.submit_password("ST001", "demo123").await.unwrap();
        let identity = Identity::from(elevation.into_result());
        assert_eq!(
            auth.personal_data(&identity, PersonalDataKind::Fees).await,
            Ok(PersonalData::Found("fees for Emily Tan".to_string()))
        );
    }
}
