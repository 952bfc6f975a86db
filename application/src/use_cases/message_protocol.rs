//! Message protocol use case
//!
//! Turns one conversation turn into exactly one request to the assistant
//! gateway and interprets exactly one reply. No retries, no session state.

use crate::ports::assistant_gateway::{AssistantGateway, HistoryEntry, TurnReply, TurnRequest};
use deskchat_domain::{AuthToken, UserType, truncate};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

/// Errors surfaced by the message protocol
///
/// Transport failures, bad statuses and malformed bodies all collapse into
/// [`ChatError::Unreachable`]; the transcript only ever shows one apology.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChatError {
    #[error("Message is empty")]
    EmptyMessage,

    #[error("No session id")]
    MissingSession,

    #[error("Assistant service unreachable")]
    Unreachable,
}

/// Typed wrapper around the assistant endpoint
pub struct MessageProtocolClient<G: AssistantGateway + 'static> {
    gateway: Arc<G>,
}

impl<G: AssistantGateway + 'static> MessageProtocolClient<G> {
    pub fn new(gateway: Arc<G>) -> Self {
        Self { gateway }
    }

    /// Send one turn.
    ///
    /// `text` is expected to be normalized already; blank text is rejected
    /// without a network call.
    pub async fn send_turn(
        &self,
        session_id: &str,
        user_type: UserType,
        text: &str,
        token: Option<&AuthToken>,
    ) -> Result<TurnReply, ChatError> {
        if session_id.is_empty() {
            return Err(ChatError::MissingSession);
        }
        if text.trim().is_empty() {
            return Err(ChatError::EmptyMessage);
        }

        let request = TurnRequest {
            message: text.to_string(),
            session_id: session_id.to_string(),
            user_type,
            auth_token: token.cloned(),
        };

        debug!(
            "Sending turn for session {} as {}: {}",
            session_id,
            user_type,
            truncate(text, 60)
        );

        match self.gateway.send_turn(&request).await {
            Ok(reply) => {
                debug!("Received reply {} for session {}", reply.server_message_id, session_id);
                Ok(reply)
            }
            Err(e) => {
                warn!("Turn failed for session {}: {}", session_id, e);
                Err(ChatError::Unreachable)
            }
        }
    }

    /// Fetch the server-side transcript for a session.
    pub async fn history(&self, session_id: &str) -> Result<Vec<HistoryEntry>, ChatError> {
        if session_id.is_empty() {
            return Err(ChatError::MissingSession);
        }
        self.gateway.fetch_history(session_id).await.map_err(|e| {
            warn!("History fetch failed for session {}: {}", session_id, e);
            ChatError::Unreachable
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::assistant_gateway::GatewayError;
    use async_trait::async_trait;
    use chrono::Utc;
    use deskchat_domain::Sender;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Gateway that returns scripted results and records requests
    struct ScriptedGateway {
        replies: Mutex<VecDeque<Result<TurnReply, GatewayError>>>,
        requests: Mutex<Vec<TurnRequest>>,
    }

    impl ScriptedGateway {
        fn new(replies: Vec<Result<TurnReply, GatewayError>>) -> Self {
            Self {
                replies: Mutex::new(replies.into()),
                requests: Mutex::new(Vec::new()),
            }
        }

        fn request_count(&self) -> usize {
            self.requests.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl AssistantGateway for ScriptedGateway {
        async fn send_turn(&self, request: &TurnRequest) -> Result<TurnReply, GatewayError> {
            self.requests.lock().unwrap().push(request.clone());
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(Err(GatewayError::ConnectionError("no script".to_string())))
        }

        async fn fetch_history(&self, session_id: &str) -> Result<Vec<HistoryEntry>, GatewayError> {
            if session_id == "broken" {
                return Err(GatewayError::Status(500));
            }
            Ok(vec![HistoryEntry {
                id: "m1".to_string(),
                sender: Sender::Assistant,
                text: "Which location?".to_string(),
                timestamp: Utc::now(),
            }])
        }
    }

    fn reply(text: &str, id: &str) -> TurnReply {
        TurnReply {
            text: text.to_string(),
            server_message_id: id.to_string(),
        }
    }

    #[tokio::test]
    async fn test_send_turn_success_passes_fields_through() {
        let gateway = Arc::new(ScriptedGateway::new(vec![Ok(reply("Which location?", "m1"))]));
        let client = MessageProtocolClient::new(gateway.clone());
        let token = AuthToken::new("tok");

        let result = client
            .send_turn("s-1", UserType::Student, "J1 math", Some(&token))
            .await
            .unwrap();

        assert_eq!(result, reply("Which location?", "m1"));
        let requests = gateway.requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].message, "J1 math");
        assert_eq!(requests[0].session_id, "s-1");
        assert_eq!(requests[0].user_type, UserType::Student);
        assert_eq!(requests[0].auth_token.as_ref().map(|t| t.as_str()), Some("tok"));
    }

    #[tokio::test]
    async fn test_every_gateway_failure_collapses_to_unreachable() {
        let gateway = Arc::new(ScriptedGateway::new(vec![
            Err(GatewayError::ConnectionError("refused".to_string())),
            Err(GatewayError::Status(500)),
            Err(GatewayError::Decode("missing field".to_string())),
            Err(GatewayError::Timeout),
        ]));
        let client = MessageProtocolClient::new(gateway.clone());

        for _ in 0..4 {
            let err = client
                .send_turn("s-1", UserType::Visitor, "hello", None)
                .await
                .unwrap_err();
            assert_eq!(err, ChatError::Unreachable);
        }
        // One call per turn, no retries
        assert_eq!(gateway.request_count(), 4);
    }

    #[tokio::test]
    async fn test_blank_text_and_missing_session_never_reach_gateway() {
        let gateway = Arc::new(ScriptedGateway::new(vec![]));
        let client = MessageProtocolClient::new(gateway.clone());

        assert_eq!(
            client.send_turn("s-1", UserType::Visitor, "  ", None).await,
            Err(ChatError::EmptyMessage)
        );
        assert_eq!(
            client.send_turn("", UserType::Visitor, "hi", None).await,
            Err(ChatError::MissingSession)
        );
        assert_eq!(gateway.request_count(), 0);
    }

    #[tokio::test]
    async fn test_history() {
        let client = MessageProtocolClient::new(Arc::new(ScriptedGateway::new(vec![])));

        let entries = client.history("s-1").await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].sender, Sender::Assistant);

        assert_eq!(client.history("broken").await, Err(ChatError::Unreachable));
    }
}
