//! Authentication entities and value objects

use crate::core::error::DomainError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque bearer credential issued by the identity service.
///
/// `Debug` is redacted so tokens never end up in logs.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthToken(String);

impl AuthToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthToken(***)")
    }
}

/// Successful elevation: who the user is and the token proving it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthResult {
    pub subject_id: String,
    pub display_name: String,
    pub token: AuthToken,
}

impl AuthResult {
    pub fn new(
        subject_id: impl Into<String>,
        display_name: impl Into<String>,
        token: AuthToken,
    ) -> Self {
        Self {
            subject_id: subject_id.into(),
            display_name: display_name.into(),
            token,
        }
    }
}

/// Step of the login surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthMode {
    Password,
    OtpRequest,
    OtpVerify,
}

impl fmt::Display for AuthMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AuthMode::Password => "password",
            AuthMode::OtpRequest => "code request",
            AuthMode::OtpVerify => "code verification",
        })
    }
}

/// Credentials for one login step.
///
/// `secret` is the password, the phone number or the received code depending
/// on `mode`. `attempts_remaining` and `expiry` are display hints only; the
/// identity service owns the actual policy.
#[derive(Clone)]
pub struct AuthChallenge {
    pub mode: AuthMode,
    pub subject_id: String,
    pub secret: String,
    pub attempts_remaining: Option<u32>,
    pub expiry: Option<DateTime<Utc>>,
}

impl AuthChallenge {
    pub fn password(subject_id: impl Into<String>, password: impl Into<String>) -> Self {
        Self::new(AuthMode::Password, subject_id.into(), password.into())
    }

    pub fn otp_request(subject_id: impl Into<String>, phone: impl Into<String>) -> Self {
        Self::new(AuthMode::OtpRequest, subject_id.into(), phone.into())
    }

    pub fn otp_verify(subject_id: impl Into<String>, code: impl Into<String>) -> Self {
        Self::new(AuthMode::OtpVerify, subject_id.into(), code.into())
    }

    fn new(mode: AuthMode, subject_id: String, secret: String) -> Self {
        Self {
            mode,
            subject_id: subject_id.trim().to_string(),
            // Passwords are sent as typed; phone numbers and codes are trimmed.
            secret: match mode {
                AuthMode::Password => secret,
                AuthMode::OtpRequest | AuthMode::OtpVerify => secret.trim().to_string(),
            },
            attempts_remaining: None,
            expiry: None,
        }
    }

    /// Check required fields before anything is sent.
    ///
    /// Only emptiness is checked; code format is left to the server.
    pub fn validate(&self) -> Result<(), DomainError> {
        let missing_subject = self.subject_id.is_empty();
        let missing_secret = self.secret.is_empty();

        let message = match self.mode {
            AuthMode::Password if missing_subject || missing_secret => {
                "Please enter both Student ID and password"
            }
            AuthMode::OtpRequest if missing_subject || missing_secret => {
                "Please enter both Student ID and phone number"
            }
            AuthMode::OtpVerify if missing_secret => "Please enter the OTP code",
            AuthMode::OtpVerify if missing_subject => "Please enter your Student ID",
            _ => return Ok(()),
        };
        Err(DomainError::Validation(message.to_string()))
    }
}

impl fmt::Debug for AuthChallenge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthChallenge")
            .field("mode", &self.mode)
            .field("subject_id", &self.subject_id)
            .field("secret", &"***")
            .field("attempts_remaining", &self.attempts_remaining)
            .field("expiry", &self.expiry)
            .finish()
    }
}

/// Acknowledgment that a one-time code was issued.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OtpAck {
    /// Server text, shown verbatim.
    pub message: String,
}

/// Personal records an authenticated user may look up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PersonalDataKind {
    Profile,
    Fees,
    Schedule,
}

impl PersonalDataKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PersonalDataKind::Profile => "profile",
            PersonalDataKind::Fees => "fees",
            PersonalDataKind::Schedule => "schedule",
        }
    }
}

/// Result of a personal data lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersonalData {
    Found(String),
    /// The service refused, e.g. an expired token. Message shown verbatim.
    Denied(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_debug_is_redacted() {
        let token = AuthToken::new("demo_token_ST001_secret");
        assert_eq!(format!("{:?}", token), "AuthToken(***)");
        let result = AuthResult::new("ST001", "Emily Tan", token);
        assert!(!format!("{:?}", result).contains("secret"));
    }

    #[test]
    fn test_challenge_debug_hides_secret() {
        let challenge = AuthChallenge::password("ST001", "demo123");
        let debug = format!("{:?}", challenge);
        assert!(!debug.contains("demo123"));
        assert!(debug.contains("ST001"));
    }

    #[test]
    fn test_password_validation() {
        assert!(AuthChallenge::password("ST001", "demo123").validate().is_ok());
        for (sid, pw) in [("", "demo123"), ("ST001", ""), ("  ", "")] {
            let err = AuthChallenge::password(sid, pw).validate().unwrap_err();
            assert_eq!(
                err,
                DomainError::Validation("Please enter both Student ID and password".to_string())
            );
        }
    }

    #[test]
    fn test_otp_request_validation_trims() {
        assert!(
            AuthChallenge::otp_request("ST001", "+6591234567")
                .validate()
                .is_ok()
        );
        let err = AuthChallenge::otp_request("ST001", "   ").validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Please enter both Student ID and phone number"
        );
    }

    #[test]
    fn test_otp_verify_only_checks_non_empty() {
        // Format is server-owned: a short or non-numeric code is still dispatched.
        assert!(AuthChallenge::otp_verify("ST001", "12ab").validate().is_ok());
        assert_eq!(
            AuthChallenge::otp_verify("ST001", "").validate().unwrap_err().to_string(),
            "Please enter the OTP code"
        );
        assert_eq!(
            AuthChallenge::otp_verify("", "123456").validate().unwrap_err().to_string(),
            "Please enter your Student ID"
        );
    }
}
