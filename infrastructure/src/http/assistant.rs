//! Assistant gateway over `POST /api/chat` and `GET /api/chat/history/{id}`

use super::client::BackendClient;
use super::error::HttpError;
use super::protocol::{ChatRequest, ChatResponse, StoredMessage};
use async_trait::async_trait;
use deskchat_application::{
    AssistantGateway, GatewayError, HistoryEntry, TurnReply, TurnRequest,
};

/// [`AssistantGateway`] backed by the HTTP chat endpoint
pub struct HttpAssistantGateway {
    client: BackendClient,
}

impl HttpAssistantGateway {
    pub fn new(client: BackendClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AssistantGateway for HttpAssistantGateway {
    async fn send_turn(&self, request: &TurnRequest) -> Result<TurnReply, GatewayError> {
        let response: ChatResponse = self
            .client
            .post_json(&["api", "chat"], &ChatRequest::from(request))
            .await?;
        Ok(response.into())
    }

    async fn fetch_history(&self, session_id: &str) -> Result<Vec<HistoryEntry>, GatewayError> {
        let stored: Vec<StoredMessage> = self
            .client
            .get_json(&["api", "chat", "history", session_id])
            .await?;
        stored
            .into_iter()
            .map(HistoryEntry::try_from)
            .collect::<Result<Vec<_>, HttpError>>()
            .map_err(GatewayError::from)
    }
}
