//! Session manager use case
//!
//! Owns one [`ConversationSession`] and is the only thing that mutates it.
//! At most one conversation turn is in flight per session; a second `send`
//! while one is pending is ignored. The session lock is never held across an
//! await, so reads stay available while a turn is pending.

use super::authenticate::Elevation;
use super::message_protocol::{ChatError, MessageProtocolClient};
use crate::config::BehaviorConfig;
use crate::ports::assistant_gateway::{AssistantGateway, HistoryEntry, TurnReply};
use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::ports::conversation_observer::{ConversationObserver, NoObserver};
use deskchat_domain::{
    CannedText, Channel, ConversationSession, DeliveryStatus, Identity, Message, MessageId,
    SessionId, Transition, normalize, normalize_reply, truncate,
};
use serde_json::json;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, info};

/// Why a `send` did nothing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// Text was blank after normalization
    Empty,
    /// Another turn is still pending
    TurnInFlight,
    /// The session was closed
    Closed,
    /// Quick replies are no longer offered, or the index is out of range
    NotOffered,
}

/// Result of a `send`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
    /// The assistant replied
    Replied { user: MessageId, reply: MessageId },
    /// The turn failed and the fallback apology was appended
    Failed {
        user: MessageId,
        fallback: MessageId,
        error: ChatError,
    },
    /// The session was closed while the turn was pending; the reply was dropped
    Abandoned { user: MessageId },
    /// Nothing was appended and no request was made
    Ignored(IgnoreReason),
}

/// Input for opening a session
#[derive(Debug, Clone)]
pub struct OpenSessionInput {
    pub channel: Channel,
    /// Identity carried over from an earlier login in the same widget
    pub prior: Option<Elevation>,
}

impl OpenSessionInput {
    pub fn new(channel: Channel) -> Self {
        Self {
            channel,
            prior: None,
        }
    }

    pub fn with_identity(mut self, elevation: Elevation) -> Self {
        self.prior = Some(elevation);
        self
    }
}

/// Collaborators shared by every session of a widget
#[derive(Clone)]
pub struct SessionEnv {
    pub behavior: BehaviorConfig,
    pub observer: Arc<dyn ConversationObserver>,
    pub logger: Arc<dyn ConversationLogger>,
}

impl Default for SessionEnv {
    fn default() -> Self {
        Self {
            behavior: BehaviorConfig::default(),
            observer: Arc::new(NoObserver),
            logger: Arc::new(NoConversationLogger),
        }
    }
}

impl SessionEnv {
    pub fn with_behavior(mut self, behavior: BehaviorConfig) -> Self {
        self.behavior = behavior;
        self
    }

    pub fn with_observer(mut self, observer: Arc<dyn ConversationObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn with_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.logger = logger;
        self
    }
}

struct SessionState {
    session: ConversationSession,
    in_flight: bool,
    closed: bool,
}

/// Changes to report once the lock is released
enum Change {
    Appended(Message),
    Status(MessageId, DeliveryStatus),
}

/// Clears the in-flight flag even if the pending future is dropped.
struct InFlightGuard<'a> {
    state: &'a Mutex<SessionState>,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        lock(self.state).in_flight = false;
    }
}

/// Manages one conversation session
pub struct SessionManager<G: AssistantGateway + 'static> {
    protocol: MessageProtocolClient<G>,
    env: SessionEnv,
    state: Mutex<SessionState>,
}

impl<G: AssistantGateway + 'static> SessionManager<G> {
    /// Open a fresh session seeded with the channel greeting.
    pub fn open(gateway: Arc<G>, input: OpenSessionInput, env: SessionEnv) -> Self {
        let channel = input.channel;
        let mut session = ConversationSession::new(SessionId::generate(channel), channel);
        if let Some(elevation) = input.prior {
            session.bind(elevation.into_result());
        }

        let greeting = CannedText::greeting(channel, session.identity().display_name());
        session.push_assistant(None, greeting);
        let greeting = session.last_message().cloned();

        info!("Opened {} session {}", channel, session.id());
        env.logger.log(ConversationEvent::new(
            "session_opened",
            json!({
                "session_id": session.id().as_str(),
                "channel": channel.as_str(),
                "authenticated": session.identity().is_authenticated(),
            }),
        ));

        if let Some(greeting) = &greeting {
            env.observer.on_message_appended(greeting);
        }

        Self {
            protocol: MessageProtocolClient::new(gateway),
            env,
            state: Mutex::new(SessionState {
                session,
                in_flight: false,
                closed: false,
            }),
        }
    }

    pub fn session_id(&self) -> SessionId {
        lock(&self.state).session.id().clone()
    }

    pub fn channel(&self) -> Channel {
        lock(&self.state).session.channel()
    }

    pub fn identity(&self) -> Identity {
        lock(&self.state).session.identity().clone()
    }

    pub fn messages(&self) -> Vec<Message> {
        lock(&self.state).session.messages().to_vec()
    }

    pub fn is_turn_in_flight(&self) -> bool {
        lock(&self.state).in_flight
    }

    /// Canned texts offered before the first real exchange.
    pub fn quick_replies(&self) -> Vec<&'static str> {
        let state = lock(&self.state);
        if state.session.messages().len() > 1 || state.in_flight || state.closed {
            return Vec::new();
        }
        CannedText::quick_replies(
            state.session.channel(),
            state.session.identity().is_authenticated(),
        )
        .to_vec()
    }

    /// Send the quick reply at `index`.
    pub async fn send_quick_reply(&self, index: usize) -> SendOutcome {
        match self.quick_replies().get(index) {
            Some(text) => self.send(text).await,
            None => SendOutcome::Ignored(IgnoreReason::NotOffered),
        }
    }

    /// Run one conversation turn.
    pub async fn send(&self, text: &str) -> SendOutcome {
        let (user_id, session_id, user_type, token, normalized, user_message) = {
            let mut state = lock(&self.state);
            if state.closed {
                return SendOutcome::Ignored(IgnoreReason::Closed);
            }
            let channel = state.session.channel();
            let normalized = normalize(text, channel);
            if normalized.is_empty() {
                return SendOutcome::Ignored(IgnoreReason::Empty);
            }
            if state.in_flight {
                debug!("Turn already in flight, ignoring send");
                return SendOutcome::Ignored(IgnoreReason::TurnInFlight);
            }

            let user_id = state.session.push_user(normalized.clone());
            state.in_flight = true;

            let identity = state.session.identity();
            let user_type = channel.user_type(identity.is_authenticated());
            let token = identity.token().cloned();
            let user_message = state.session.last_message().cloned();
            (
                user_id,
                state.session.id().clone(),
                user_type,
                token,
                normalized,
                user_message,
            )
        };
        let guard = InFlightGuard { state: &self.state };

        if let Some(message) = &user_message {
            self.env.observer.on_message_appended(message);
        }
        self.env.logger.log(ConversationEvent::new(
            "user_message",
            json!({
                "session_id": session_id.as_str(),
                "message_id": user_id.as_str(),
                "text": normalized,
            }),
        ));
        self.env.observer.on_turn_started();

        let result = self
            .protocol
            .send_turn(session_id.as_str(), user_type, &normalized, token.as_ref())
            .await;

        let success = result.is_ok();
        let (outcome, changes) = {
            let mut state = lock(&self.state);
            if state.closed {
                debug!(
                    "Session {} closed while turn was pending, dropping reply",
                    session_id
                );
                return SendOutcome::Abandoned { user: user_id };
            }
            match result {
                Ok(reply) => self.apply_reply(&mut state.session, user_id, reply),
                Err(error) => self.apply_failure(&mut state.session, user_id, error),
            }
        };
        drop(guard);

        self.notify(changes);
        self.env.observer.on_turn_finished(success);
        outcome
    }

    fn apply_reply(
        &self,
        session: &mut ConversationSession,
        user_id: MessageId,
        reply: TurnReply,
    ) -> (SendOutcome, Vec<Change>) {
        let mut changes = Vec::new();
        let channel = session.channel();

        if session
            .advance_status(&user_id, DeliveryStatus::Delivered)
            .is_advanced()
        {
            changes.push(Change::Status(user_id.clone(), DeliveryStatus::Delivered));
        }

        let mut text = normalize_reply(&reply.text, channel);
        if text.is_empty() {
            text = CannedText::fallback(&self.env.behavior.contact_phone);
        }
        let reply_id = session.push_assistant(Some(MessageId::from(reply.server_message_id)), text);
        if let Some(message) = session.message(&reply_id) {
            self.env.logger.log(ConversationEvent::new(
                "assistant_message",
                json!({
                    "session_id": session.id().as_str(),
                    "message_id": reply_id.as_str(),
                    "text": message.text,
                }),
            ));
            debug!("Assistant replied: {}", truncate(&message.text, 60));
            changes.push(Change::Appended(message.clone()));
        }

        (
            SendOutcome::Replied {
                user: user_id,
                reply: reply_id,
            },
            changes,
        )
    }

    fn apply_failure(
        &self,
        session: &mut ConversationSession,
        user_id: MessageId,
        error: ChatError,
    ) -> (SendOutcome, Vec<Change>) {
        let fallback_text = CannedText::fallback(&self.env.behavior.contact_phone);
        let fallback_id = session.push_assistant(None, fallback_text);
        self.env.logger.log(ConversationEvent::new(
            "turn_failed",
            json!({
                "session_id": session.id().as_str(),
                "message_id": user_id.as_str(),
                "error": error.to_string(),
            }),
        ));

        let changes = session
            .message(&fallback_id)
            .cloned()
            .map(Change::Appended)
            .into_iter()
            .collect();
        (
            SendOutcome::Failed {
                user: user_id,
                fallback: fallback_id,
                error,
            },
            changes,
        )
    }

    /// Bind an authenticated identity and greet the user by name.
    ///
    /// History is kept; nothing is replayed.
    pub fn elevate(&self, elevation: Elevation) {
        let changes = {
            let mut state = lock(&self.state);
            if state.closed {
                return;
            }
            let result = elevation.into_result();
            let greeting = CannedText::continuation_greeting(&result.display_name);
            info!(
                "Session {} elevated for {}",
                state.session.id(),
                result.subject_id
            );
            self.env.logger.log(ConversationEvent::new(
                "identity_elevated",
                json!({
                    "session_id": state.session.id().as_str(),
                    "subject_id": result.subject_id,
                }),
            ));
            state.session.bind(result);
            let id = state.session.push_assistant(None, greeting);
            state.session.message(&id).cloned().map(Change::Appended)
        };
        self.notify(changes.into_iter().collect());
    }

    /// Log out. Returns `false` if the session was already anonymous.
    pub fn revoke(&self) -> bool {
        let changes = {
            let mut state = lock(&self.state);
            if state.closed || !state.session.unbind() {
                return false;
            }
            info!("Session {} logged out", state.session.id());
            self.env.logger.log(ConversationEvent::new(
                "identity_revoked",
                json!({ "session_id": state.session.id().as_str() }),
            ));
            let id = state
                .session
                .push_assistant(None, CannedText::logout_acknowledgement().to_string());
            state.session.message(&id).cloned().map(Change::Appended)
        };
        self.notify(changes.into_iter().collect());
        true
    }

    /// Advance a user message to `read` once the reply has been shown.
    ///
    /// Only channels with read receipts track it; elsewhere this is
    /// [`Transition::NotTracked`] and the status stays put.
    pub fn mark_read(&self, id: &MessageId) -> Transition {
        let transition = {
            let mut state = lock(&self.state);
            if !state.session.channel().tracks_read_receipts() {
                return Transition::NotTracked;
            }
            state.session.advance_status(id, DeliveryStatus::Read)
        };
        if transition.is_advanced() {
            self.notify(vec![Change::Status(id.clone(), DeliveryStatus::Read)]);
        }
        transition
    }

    /// Close the widget. A reply that arrives afterwards is dropped.
    pub fn close(&self) {
        let mut state = lock(&self.state);
        if state.closed {
            return;
        }
        state.closed = true;
        info!("Closed session {}", state.session.id());
        self.env.logger.log(ConversationEvent::new(
            "session_closed",
            json!({
                "session_id": state.session.id().as_str(),
                "messages": state.session.messages().len(),
            }),
        ));
    }

    /// Server-side transcript of this session.
    pub async fn history(&self) -> Result<Vec<HistoryEntry>, ChatError> {
        let session_id = self.session_id();
        self.protocol.history(session_id.as_str()).await
    }

    fn notify(&self, changes: Vec<Change>) {
        for change in changes {
            match change {
                Change::Appended(message) => self.env.observer.on_message_appended(&message),
                Change::Status(id, status) => self.env.observer.on_status_changed(&id, status),
            }
        }
    }
}

fn lock(state: &Mutex<SessionState>) -> MutexGuard<'_, SessionState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}
