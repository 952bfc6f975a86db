//! Wire types for the backend's JSON API
//!
//! Requests borrow from the caller; responses are decoded into the tagged
//! port types right here.

use super::error::{HttpError, Result};
use chrono::{DateTime, NaiveDateTime, Utc};
use deskchat_application::{CodeIssuance, HistoryEntry, LoginOutcome, TurnReply, TurnRequest};
use deskchat_domain::{AuthToken, PersonalData, PersonalDataKind, Sender, UserType};
use serde::{Deserialize, Serialize};

const DATA_SERVICE_UNAVAILABLE: &str = "Data service temporarily unavailable. Please try again.";

/// `POST /api/chat`
#[derive(Debug, Serialize)]
pub struct ChatRequest<'a> {
    pub message: &'a str,
    pub session_id: &'a str,
    pub user_type: UserType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth_token: Option<&'a str>,
}

impl<'a> From<&'a TurnRequest> for ChatRequest<'a> {
    fn from(request: &'a TurnRequest) -> Self {
        Self {
            message: &request.message,
            session_id: &request.session_id,
            user_type: request.user_type,
            auth_token: request.auth_token.as_ref().map(AuthToken::as_str),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    pub response: String,
    #[serde(default)]
    pub message_id: String,
}

impl From<ChatResponse> for TurnReply {
    fn from(response: ChatResponse) -> Self {
        TurnReply {
            text: response.response,
            server_message_id: response.message_id,
        }
    }
}

/// One element of `GET /api/chat/history/{session_id}`
#[derive(Debug, Deserialize)]
pub struct StoredMessage {
    pub id: String,
    pub message: String,
    pub sender: String,
    pub timestamp: String,
}

impl TryFrom<StoredMessage> for HistoryEntry {
    type Error = HttpError;

    fn try_from(stored: StoredMessage) -> Result<Self> {
        let sender = match stored.sender.as_str() {
            "user" => Sender::User,
            "assistant" => Sender::Assistant,
            other => {
                return Err(HttpError::UnexpectedResponse(format!(
                    "unknown sender '{}'",
                    other
                )));
            }
        };
        Ok(HistoryEntry {
            id: stored.id,
            sender,
            text: stored.message,
            timestamp: parse_timestamp(&stored.timestamp)?,
        })
    }
}

/// RFC 3339, or an ISO timestamp without offset taken as UTC.
fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Ok(parsed.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| naive.and_utc())
        .map_err(|_| HttpError::UnexpectedResponse(format!("invalid timestamp '{}'", raw)))
}

/// `POST /api/demo/login`
#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub student_id: &'a str,
    pub password: &'a str,
}

/// `POST /api/demo/whatsapp/request-otp`
#[derive(Debug, Serialize)]
pub struct CodeRequest<'a> {
    pub student_id: &'a str,
    pub phone: &'a str,
}

/// `POST /api/demo/whatsapp/verify-otp`
#[derive(Debug, Serialize)]
pub struct VerifyRequest<'a> {
    pub student_id: &'a str,
    pub otp: &'a str,
}

/// Shared response of the three auth endpoints
#[derive(Debug, Deserialize)]
pub struct AuthResponse {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    pub session_token: Option<String>,
    pub student_name: Option<String>,
}

impl AuthResponse {
    pub fn into_login_outcome(self) -> Result<LoginOutcome> {
        if !self.success {
            return Ok(LoginOutcome::Refused {
                message: self.message,
            });
        }
        match self.session_token.filter(|t| !t.is_empty()) {
            Some(token) => Ok(LoginOutcome::Granted {
                message: self.message,
                token: AuthToken::new(token),
                display_name: self.student_name.filter(|n| !n.trim().is_empty()),
            }),
            None => Err(HttpError::UnexpectedResponse(
                "login succeeded without a session token".to_string(),
            )),
        }
    }

    pub fn into_code_issuance(self) -> CodeIssuance {
        if self.success {
            CodeIssuance::Issued {
                message: self.message,
            }
        } else {
            CodeIssuance::Refused {
                message: self.message,
            }
        }
    }
}

/// `POST /api/demo/student-data`
#[derive(Debug, Serialize)]
pub struct PersonalDataRequest<'a> {
    pub session_token: &'a str,
    pub data_type: &'static str,
}

impl<'a> PersonalDataRequest<'a> {
    pub fn new(token: &'a AuthToken, kind: PersonalDataKind) -> Self {
        Self {
            session_token: token.as_str(),
            data_type: kind.as_str(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct PersonalDataResponse {
    pub success: bool,
    pub data: Option<String>,
    pub error: Option<String>,
}

impl PersonalDataResponse {
    pub fn into_personal_data(self) -> Result<PersonalData> {
        if !self.success {
            return Ok(PersonalData::Denied(
                self.error
                    .unwrap_or_else(|| DATA_SERVICE_UNAVAILABLE.to_string()),
            ));
        }
        self.data.map(PersonalData::Found).ok_or_else(|| {
            HttpError::UnexpectedResponse("student data succeeded without data".to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_chat_request_omits_missing_token() {
        let request = TurnRequest {
            message: "J1 math".to_string(),
            session_id: "s-1".to_string(),
            user_type: UserType::WhatsAppParent,
            auth_token: None,
        };
        let body = serde_json::to_value(ChatRequest::from(&request)).unwrap();
        assert_eq!(
            body,
            json!({"message": "J1 math", "session_id": "s-1", "user_type": "whatsapp_parent"})
        );
    }

    #[test]
    fn test_chat_request_carries_token() {
        let request = TurnRequest {
            message: "my fees".to_string(),
            session_id: "s-1".to_string(),
            user_type: UserType::Student,
            auth_token: Some(AuthToken::new("tok")),
        };
        let body = serde_json::to_value(ChatRequest::from(&request)).unwrap();
        assert_eq!(body["auth_token"], "tok");
        assert_eq!(body["user_type"], "student");
    }

    #[test]
    fn test_history_accepts_naive_and_offset_timestamps() {
        for raw in ["2026-01-05T09:30:00.123456", "2026-01-05T09:30:00.123456+00:00"] {
            let entry = HistoryEntry::try_from(StoredMessage {
                id: "m1".to_string(),
                message: "hi".to_string(),
                sender: "user".to_string(),
                timestamp: raw.to_string(),
            })
            .unwrap();
            assert_eq!(entry.timestamp.to_rfc3339(), "2026-01-05T09:30:00.123456+00:00");
            assert_eq!(entry.sender, Sender::User);
        }
    }

    #[test]
    fn test_history_rejects_unknown_sender() {
        let result = HistoryEntry::try_from(StoredMessage {
            id: "m1".to_string(),
            message: "hi".to_string(),
            sender: "bot".to_string(),
            timestamp: "2026-01-05T09:30:00Z".to_string(),
        });
        assert!(matches!(result, Err(HttpError::UnexpectedResponse(_))));
    }

    #[test]
    fn test_auth_response_variants() {
        let granted: AuthResponse = serde_json::from_value(json!({
            "success": true,
            "message": "Welcome back, Emily Tan!",
            "session_token": "demo_token_ST001_ab12cd34",
            "student_name": "Emily Tan"
        }))
        .unwrap();
        match granted.into_login_outcome().unwrap() {
            LoginOutcome::Granted {
                token,
                display_name,
                ..
            } => {
                assert_eq!(token.as_str(), "demo_token_ST001_ab12cd34");
                assert_eq!(display_name.as_deref(), Some("Emily Tan"));
            }
            other => panic!("unexpected outcome: {:?}", other),
        }

        let refused: AuthResponse = serde_json::from_value(json!({
            "success": false,
            "message": "Invalid student ID or password. Please try again."
        }))
        .unwrap();
        assert_eq!(
            refused.into_login_outcome().unwrap(),
            LoginOutcome::Refused {
                message: "Invalid student ID or password. Please try again.".to_string()
            }
        );

        let tokenless: AuthResponse =
            serde_json::from_value(json!({"success": true, "message": "ok"})).unwrap();
        assert!(tokenless.into_login_outcome().is_err());
    }

    #[test]
    fn test_personal_data_denial_without_error_text() {
        let response: PersonalDataResponse =
            serde_json::from_value(json!({"success": false})).unwrap();
        assert_eq!(
            response.into_personal_data().unwrap(),
            PersonalData::Denied(DATA_SERVICE_UNAVAILABLE.to_string())
        );
    }
}
