//! Login surface state machine.
//!
//! ```text
//! Password ──submit──▶ done
//! OtpRequest ──code issued──▶ OtpVerify ──submit──▶ done
//!                 ▲                │
//!                 └── new code ────┘
//! ```
//!
//! The flow never holds an identity. A successful submit hands an
//! [`AuthResult`](super::entities::AuthResult) to the caller and the flow is
//! dropped.

use super::entities::{AuthMode, OtpAck};
use crate::core::error::DomainError;

/// Status line shown under the login form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Info(String),
    Error(String),
}

impl Notice {
    pub fn text(&self) -> &str {
        match self {
            Notice::Info(text) | Notice::Error(text) => text,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Notice::Error(_))
    }
}

/// State of one login attempt.
#[derive(Debug, Clone)]
pub struct LoginFlow {
    mode: AuthMode,
    /// Subject the current code was issued for.
    code_subject: Option<String>,
    pending: bool,
    notice: Option<Notice>,
}

impl Default for LoginFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl LoginFlow {
    /// Start on the password step.
    pub fn new() -> Self {
        Self::starting_at(AuthMode::Password)
    }

    /// Start on the one-time-code request step.
    pub fn one_time_code() -> Self {
        Self::starting_at(AuthMode::OtpRequest)
    }

    fn starting_at(mode: AuthMode) -> Self {
        Self {
            mode,
            code_subject: None,
            pending: false,
            notice: None,
        }
    }

    pub fn mode(&self) -> AuthMode {
        self.mode
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn code_subject(&self) -> Option<&str> {
        self.code_subject.as_deref()
    }

    /// Whether the "request new code" affordance is enabled.
    pub fn can_resend(&self) -> bool {
        self.mode == AuthMode::OtpVerify && !self.pending
    }

    /// Switch to the password tab.
    pub fn select_password(&mut self) -> Result<(), DomainError> {
        self.switch_tab(AuthMode::Password)
    }

    /// Switch to the one-time-code tab.
    pub fn select_one_time_code(&mut self) -> Result<(), DomainError> {
        self.switch_tab(AuthMode::OtpRequest)
    }

    fn switch_tab(&mut self, mode: AuthMode) -> Result<(), DomainError> {
        if self.pending {
            return Err(DomainError::RequestPending);
        }
        self.mode = mode;
        self.code_subject = None;
        self.notice = None;
        Ok(())
    }

    /// Mark a request for the current step as dispatched.
    pub fn begin(&mut self, step: AuthMode) -> Result<(), DomainError> {
        if self.pending {
            return Err(DomainError::RequestPending);
        }
        if step != self.mode {
            return Err(DomainError::InvalidTransition {
                from: self.mode,
                action: "submit a different step",
            });
        }
        self.pending = true;
        self.notice = None;
        Ok(())
    }

    /// A code was issued: move to verification.
    pub fn code_issued(
        &mut self,
        subject_id: impl Into<String>,
        ack: &OtpAck,
    ) -> Result<(), DomainError> {
        if self.mode != AuthMode::OtpRequest {
            return Err(DomainError::InvalidTransition {
                from: self.mode,
                action: "accept an issued code",
            });
        }
        self.mode = AuthMode::OtpVerify;
        self.code_subject = Some(subject_id.into());
        self.pending = false;
        self.notice = Some(Notice::Info(ack.message.clone()));
        Ok(())
    }

    /// A request failed or was rejected. The step does not change.
    pub fn failed(&mut self, message: impl Into<String>) {
        self.pending = false;
        self.notice = Some(Notice::Error(message.into()));
    }

    /// Login succeeded. The caller is expected to drop the flow.
    pub fn succeeded(&mut self, message: impl Into<String>) {
        self.pending = false;
        self.notice = Some(Notice::Info(message.into()));
    }

    /// Go back from verification to request a new code.
    pub fn request_new_code(&mut self) -> Result<(), DomainError> {
        if self.mode != AuthMode::OtpVerify {
            return Err(DomainError::InvalidTransition {
                from: self.mode,
                action: "request a new code",
            });
        }
        if self.pending {
            return Err(DomainError::RequestPending);
        }
        self.mode = AuthMode::OtpRequest;
        self.notice = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ack() -> OtpAck {
        OtpAck {
            message: "OTP sent to 4567".to_string(),
        }
    }

    #[test]
    fn test_otp_happy_path_transitions() {
        let mut flow = LoginFlow::one_time_code();
        assert_eq!(flow.mode(), AuthMode::OtpRequest);

        flow.begin(AuthMode::OtpRequest).unwrap();
        assert!(flow.is_pending());
        assert!(!flow.can_resend());

        flow.code_issued("ST001", &ack()).unwrap();
        assert_eq!(flow.mode(), AuthMode::OtpVerify);
        assert_eq!(flow.code_subject(), Some("ST001"));
        assert_eq!(flow.notice(), Some(&Notice::Info("OTP sent to 4567".to_string())));
        assert!(flow.can_resend());
    }

    #[test]
    fn test_failed_verify_stays_on_verify() {
        let mut flow = LoginFlow::one_time_code();
        flow.begin(AuthMode::OtpRequest).unwrap();
        flow.code_issued("ST001", &ack()).unwrap();

        flow.begin(AuthMode::OtpVerify).unwrap();
        flow.failed("❌ Invalid or expired OTP. Please request a new one.");

        assert_eq!(flow.mode(), AuthMode::OtpVerify);
        assert!(!flow.is_pending());
        let notice = flow.notice().unwrap();
        assert!(notice.is_error());
        assert_eq!(notice.text(), "❌ Invalid or expired OTP. Please request a new one.");
    }

    #[test]
    fn test_request_new_code_goes_back() {
        let mut flow = LoginFlow::one_time_code();
        flow.begin(AuthMode::OtpRequest).unwrap();
        flow.code_issued("ST001", &ack()).unwrap();

        flow.request_new_code().unwrap();
        assert_eq!(flow.mode(), AuthMode::OtpRequest);
        assert!(flow.notice().is_none());
    }

    #[test]
    fn test_resend_disabled_while_pending() {
        let mut flow = LoginFlow::one_time_code();
        flow.begin(AuthMode::OtpRequest).unwrap();
        flow.code_issued("ST001", &ack()).unwrap();
        flow.begin(AuthMode::OtpVerify).unwrap();

        assert!(!flow.can_resend());
        assert_eq!(flow.request_new_code(), Err(DomainError::RequestPending));
        assert_eq!(flow.mode(), AuthMode::OtpVerify);
    }

    #[test]
    fn test_invalid_transitions() {
        let mut flow = LoginFlow::new();
        assert!(matches!(
            flow.request_new_code(),
            Err(DomainError::InvalidTransition { from: AuthMode::Password, .. })
        ));
        assert!(flow.code_issued("ST001", &ack()).is_err());
        assert!(flow.begin(AuthMode::OtpVerify).is_err());
        assert!(!flow.is_pending());
    }

    #[test]
    fn test_double_begin_is_rejected() {
        let mut flow = LoginFlow::new();
        flow.begin(AuthMode::Password).unwrap();
        assert_eq!(flow.begin(AuthMode::Password), Err(DomainError::RequestPending));
        assert_eq!(flow.select_one_time_code(), Err(DomainError::RequestPending));
    }

    #[test]
    fn test_switching_tabs_resets_state() {
        let mut flow = LoginFlow::one_time_code();
        flow.begin(AuthMode::OtpRequest).unwrap();
        flow.code_issued("ST001", &ack()).unwrap();

        flow.select_password().unwrap();
        assert_eq!(flow.mode(), AuthMode::Password);
        assert!(flow.code_subject().is_none());
        assert!(flow.notice().is_none());
    }
}
