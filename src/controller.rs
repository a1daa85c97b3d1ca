// src/controller.rs

use crate::api::ChatClient;
use crate::errors::ChatResult;
use crate::models::{ChatReply, Message, MessageId, Role, WireMessage};
use crate::replies::{error_reply, failure_detail};
use chrono::{Local, Utc};
use tokio::sync::watch;

/// Hands out time-based ids that never repeat, even within one millisecond.
#[derive(Debug, Default)]
struct IdGenerator {
    last: i64,
}

impl IdGenerator {
    fn next(&mut self) -> i64 {
        self.last = Utc::now().timestamp_millis().max(self.last + 1);
        self.last
    }

    fn next_id(&mut self) -> MessageId {
        MessageId::Numeric(self.next())
    }

    fn next_loading_token(&mut self) -> MessageId {
        MessageId::Token(format!("loading-{}", self.next()))
    }
}

/// A submission whose request has not gone out yet. Holds no borrow on the
/// controller, so the UI can keep working while it settles.
#[derive(Debug)]
pub struct PendingReply {
    loading_id: MessageId,
    history: Vec<WireMessage>,
    client: ChatClient,
}

impl PendingReply {
    /// The role/content list that will be posted.
    pub fn history(&self) -> &[WireMessage] {
        &self.history
    }

    /// Performs the one network call of this submission.
    pub async fn settle(self) -> SettledReply {
        let outcome = self.client.send(&self.history).await;
        SettledReply {
            loading_id: self.loading_id,
            outcome,
        }
    }
}

/// A finished request, ready to be applied with [`ChatController::resolve`].
#[derive(Debug)]
pub struct SettledReply {
    loading_id: MessageId,
    outcome: ChatResult<ChatReply>,
}

/// Owns the conversation shown on the chat page.
#[derive(Debug)]
pub struct ChatController {
    messages: Vec<Message>,
    ids: IdGenerator,
    client: ChatClient,
    revision: watch::Sender<u64>,
}

impl ChatController {
    pub fn new(client: ChatClient, greeting: impl Into<String>) -> Self {
        let (revision, _) = watch::channel(0);
        Self {
            messages: vec![Message::ai(MessageId::Numeric(1), greeting, Local::now())],
            ids: IdGenerator::default(),
            client,
            revision,
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// True until the first exchange starts.
    pub fn shows_prompt_suggestions(&self) -> bool {
        self.messages.len() <= 1
    }

    pub fn is_awaiting_reply(&self) -> bool {
        self.messages.iter().any(|m| m.is_loading)
    }

    /// Receives the revision number after every change to the messages.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }

    /// Sends `text` and waits for the reply or the fallback bubble.
    pub async fn submit(&mut self, text: &str) {
        if let Some(pending) = self.begin_submit(text) {
            let settled = pending.settle().await;
            self.resolve(settled);
        }
    }

    pub async fn select_prompt(&mut self, prompt: &str) {
        self.submit(prompt).await;
    }

    /// Appends the user message and the loading placeholder. Returns `None`
    /// for blank text, or while another reply is still outstanding.
    pub fn begin_submit(&mut self, text: &str) -> Option<PendingReply> {
        if text.trim().is_empty() {
            return None;
        }
        if self.is_awaiting_reply() {
            log::warn!("Ignoring submission while a reply is outstanding");
            return None;
        }

        let mut history: Vec<WireMessage> = self.messages.iter().map(WireMessage::from).collect();
        history.push(WireMessage {
            role: Role::User,
            content: text.to_string(),
        });

        let user_id = self.ids.next_id();
        let loading_id = self.ids.next_loading_token();

        self.messages.push(Message::user(user_id, text));
        self.messages.push(Message::loading(loading_id.clone()));
        self.notify();

        log::debug!(
            "Submitting message {} with {} history entries",
            loading_id,
            history.len()
        );

        Some(PendingReply {
            loading_id,
            history,
            client: self.client.clone(),
        })
    }

    /// Swaps the loading placeholder for the reply or a fallback bubble.
    pub fn resolve(&mut self, settled: SettledReply) {
        let SettledReply {
            loading_id,
            outcome,
        } = settled;

        self.messages.retain(|m| m.id != loading_id);

        let message = match outcome {
            Ok(reply) => {
                let id = reply.id.unwrap_or_else(|| self.ids.next_id());
                let timestamp = reply.timestamp.unwrap_or_else(Local::now);
                Message::ai(id, reply.content, timestamp)
            }
            Err(err) => {
                log::error!("Chat request failed: {}", err);
                let detail = failure_detail(&err);
                Message::error(self.ids.next_id(), error_reply(&detail, &mut rand::rng()))
            }
        };

        self.messages.push(message);
        self.notify();
    }

    fn notify(&self) {
        self.revision.send_modify(|revision| *revision += 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::DEFAULT_GREETING;
    use crate::errors::ChatError;
    use crate::models::Sender;
    use serde_json::json;
    use wiremock::{
        matchers::{method, path},
        Mock, MockServer, Request, ResponseTemplate,
    };

    async fn controller_for(response: ResponseTemplate) -> (ChatController, MockServer) {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .respond_with(response)
            .mount(&mock_server)
            .await;

        let controller = ChatController::new(ChatClient::new(&mock_server.uri()), DEFAULT_GREETING);
        (controller, mock_server)
    }

    fn loading_count(controller: &ChatController) -> usize {
        controller.messages().iter().filter(|m| m.is_loading).count()
    }

    #[test]
    fn test_starts_with_greeting_and_suggestions() {
        let controller = ChatController::new(ChatClient::new("http://localhost:3000"), "hello");

        assert_eq!(controller.messages().len(), 1);
        assert_eq!(controller.messages()[0].sender, Sender::Ai);
        assert_eq!(controller.messages()[0].text, "hello");
        assert!(controller.shows_prompt_suggestions());
        assert!(!controller.is_awaiting_reply());
    }

    #[tokio::test]
    async fn test_blank_submission_is_ignored() {
        let (mut controller, _server) =
            controller_for(ResponseTemplate::new(200).set_body_json(json!({ "content": "x" }))).await;
        let before = controller.messages().to_vec();

        controller.submit("").await;
        controller.submit("   \n\t").await;

        assert_eq!(controller.messages(), before.as_slice());
        assert!(controller.shows_prompt_suggestions());
    }

    #[tokio::test]
    async fn test_successful_reply() {
        let (mut controller, _server) = controller_for(ResponseTemplate::new(200).set_body_json(
            json!({ "content": "Hello back", "id": 42, "timestamp": 1000 }),
        ))
        .await;

        controller.submit("Hi").await;

        let messages = controller.messages();
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[1].sender, Sender::User);
        assert_eq!(messages[1].text, "Hi");

        let last = messages.last().unwrap();
        assert_eq!(last.text, "Hello back");
        assert_eq!(last.sender, Sender::Ai);
        assert_eq!(last.id, MessageId::Numeric(42));
        assert_eq!(last.timestamp.timestamp_millis(), 1000);
        assert!(!last.is_error);
        assert_eq!(loading_count(&controller), 0);
        assert!(!controller.shows_prompt_suggestions());
    }

    #[tokio::test]
    async fn test_reply_without_metadata_gets_generated_id() {
        let (mut controller, _server) =
            controller_for(ResponseTemplate::new(200).set_body_json(json!({ "content": "ok" }))).await;

        controller.submit("Hi").await;

        let messages = controller.messages();
        let last = messages.last().unwrap();
        assert!(matches!(last.id, MessageId::Numeric(_)));
        assert_ne!(last.id, messages[1].id);
    }

    #[tokio::test]
    async fn test_quota_failure_shows_billing_guidance() {
        let (mut controller, _server) = controller_for(
            ResponseTemplate::new(500).set_body_json(json!({ "error": "quota exceeded" })),
        )
        .await;

        controller.submit("Hi").await;

        let last = controller.messages().last().unwrap();
        assert!(last.is_error);
        assert_eq!(last.sender, Sender::Ai);
        assert!(last.text.contains("billing status"));
        assert_eq!(loading_count(&controller), 0);
    }

    #[tokio::test]
    async fn test_malformed_reply_becomes_error_bubble() {
        let (mut controller, _server) =
            controller_for(ResponseTemplate::new(200).set_body_string("not json")).await;

        controller.submit("Hi").await;

        let last = controller.messages().last().unwrap();
        assert!(last.is_error);
        assert!(last.text.contains("200 OK"));
    }

    #[test]
    fn test_transport_failure_becomes_error_bubble() {
        let mut controller = ChatController::new(ChatClient::new("http://localhost:3000"), "hello");
        let pending = controller.begin_submit("Hi").unwrap();
        assert!(controller.is_awaiting_reply());

        controller.resolve(SettledReply {
            loading_id: pending.loading_id,
            outcome: Err(ChatError::transport("network down")),
        });

        let messages = controller.messages();
        assert_eq!(messages.len(), 3);
        let last = messages.last().unwrap();
        assert!(last.is_error);
        assert!(last.text.contains("network down"));
        assert_eq!(loading_count(&controller), 0);
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_becomes_error_bubble() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let uri = format!("http://{}", listener.local_addr().unwrap());
        drop(listener);

        let mut controller = ChatController::new(ChatClient::new(&uri), DEFAULT_GREETING);
        controller.submit("Hi").await;

        let last = controller.messages().last().unwrap();
        assert!(last.is_error);
        assert!(!controller.is_awaiting_reply());
    }

    #[tokio::test]
    async fn test_endpoint_path_does_not_trigger_billing_guidance() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let uri = format!("http://{}/quota-service", listener.local_addr().unwrap());
        drop(listener);

        let mut controller = ChatController::new(ChatClient::new(&uri), DEFAULT_GREETING);
        controller.submit("Hi").await;

        let last = controller.messages().last().unwrap();
        assert!(last.is_error);
        assert!(!last.text.contains("billing status"));
    }

    #[tokio::test]
    async fn test_two_round_trips_grow_by_four() {
        let (mut controller, server) =
            controller_for(ResponseTemplate::new(200).set_body_json(json!({ "content": "sure" }))).await;

        controller.submit("first").await;
        assert_eq!(controller.messages().len(), 3);
        assert_eq!(loading_count(&controller), 0);

        let pending = controller.begin_submit("second").unwrap();
        assert_eq!(loading_count(&controller), 1);
        let settled = pending.settle().await;
        controller.resolve(settled);

        assert_eq!(controller.messages().len(), 5);
        assert_eq!(loading_count(&controller), 0);
        assert_eq!(server.received_requests().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_history_sent_once_with_trailing_user_entry() {
        let (mut controller, server) =
            controller_for(ResponseTemplate::new(200).set_body_json(json!({ "content": "sure" }))).await;

        controller.submit("first").await;
        controller.submit("second").await;

        let requests: Vec<Request> = server.received_requests().await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&requests[1].body).unwrap();
        assert_eq!(
            body,
            json!({ "messages": [
                { "role": "assistant", "content": DEFAULT_GREETING },
                { "role": "user", "content": "first" },
                { "role": "assistant", "content": "sure" },
                { "role": "user", "content": "second" },
            ]})
        );
    }

    #[test]
    fn test_second_submission_refused_while_waiting() {
        let mut controller = ChatController::new(ChatClient::new("http://localhost:3000"), "hello");

        let pending = controller.begin_submit("one");
        assert!(pending.is_some());
        assert!(controller.begin_submit("two").is_none());
        assert_eq!(controller.messages().len(), 3);
        assert_eq!(loading_count(&controller), 1);
    }

    #[test]
    fn test_loading_id_is_fresh() {
        let mut controller = ChatController::new(ChatClient::new("http://localhost:3000"), "hello");
        let pending = controller.begin_submit("one").unwrap();

        let ids: Vec<&MessageId> = controller.messages().iter().map(|m| &m.id).collect();
        assert_eq!(ids.iter().filter(|id| ***id == pending.loading_id).count(), 1);
        assert_ne!(ids[0], ids[1]);
    }

    #[test]
    fn test_changes_are_published() {
        let mut controller = ChatController::new(ChatClient::new("http://localhost:3000"), "hello");
        let mut revisions = controller.subscribe();
        assert!(!revisions.has_changed().unwrap());

        let pending = controller.begin_submit("one").unwrap();
        assert!(revisions.has_changed().unwrap());
        let first = *revisions.borrow_and_update();

        controller.resolve(SettledReply {
            loading_id: pending.loading_id,
            outcome: Err(ChatError::transport("offline")),
        });
        assert!(*revisions.borrow_and_update() > first);
    }

    #[tokio::test]
    async fn test_select_prompt_submits() {
        let (mut controller, _server) =
            controller_for(ResponseTemplate::new(200).set_body_json(json!({ "content": "Here" }))).await;

        controller.select_prompt("Help me write a professional email").await;

        let messages = controller.messages();
        assert_eq!(messages[1].text, "Help me write a professional email");
        assert_eq!(messages.last().unwrap().text, "Here");
    }
}
