// src/models.rs

use crate::constants::LOADING_TEXT;
use chrono::{DateTime, Local, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Who wrote a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Ai,
}

/// List identity of a message. Never used for ordering.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageId {
    Numeric(i64),
    Token(String),
}

impl MessageId {
    /// Reads a server-supplied id; only integers and strings are accepted.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => n.as_i64().map(MessageId::Numeric),
            Value::String(s) if !s.is_empty() => Some(MessageId::Token(s.clone())),
            _ => None,
        }
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageId::Numeric(n) => write!(f, "{}", n),
            MessageId::Token(s) => f.write_str(s),
        }
    }
}

/// Represents one turn in the displayed conversation.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub id: MessageId,
    pub text: String,
    pub sender: Sender,
    pub timestamp: DateTime<Local>,
    pub is_loading: bool,
    pub is_error: bool,
}

impl Message {
    pub fn user(id: MessageId, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            sender: Sender::User,
            timestamp: Local::now(),
            is_loading: false,
            is_error: false,
        }
    }

    pub fn ai(id: MessageId, text: impl Into<String>, timestamp: DateTime<Local>) -> Self {
        Self {
            id,
            text: text.into(),
            sender: Sender::Ai,
            timestamp,
            is_loading: false,
            is_error: false,
        }
    }

    pub fn loading(id: MessageId) -> Self {
        Self {
            is_loading: true,
            ..Self::ai(id, LOADING_TEXT, Local::now())
        }
    }

    pub fn error(id: MessageId, text: impl Into<String>) -> Self {
        Self {
            is_error: true,
            ..Self::ai(id, text, Local::now())
        }
    }
}

/// Role label expected by the chat endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl From<Sender> for Role {
    fn from(sender: Sender) -> Self {
        match sender {
            Sender::User => Role::User,
            Sender::Ai => Role::Assistant,
        }
    }
}

/// One entry of the role/content list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireMessage {
    pub role: Role,
    pub content: String,
}

impl From<&Message> for WireMessage {
    fn from(message: &Message) -> Self {
        Self {
            role: message.sender.into(),
            content: message.text.clone(),
        }
    }
}

/// Request body for `POST /api/chat`.
#[derive(Debug, Serialize)]
pub struct ChatRequest<'a> {
    pub messages: &'a [WireMessage],
}

/// The parts of a successful reply the page displays.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatReply {
    pub content: String,
    pub id: Option<MessageId>,
    pub timestamp: Option<DateTime<Local>>,
}

impl ChatReply {
    /// Extracts a reply from a parsed response body. Returns `None` when
    /// `content` is missing or not a string.
    pub fn from_payload(payload: &Value) -> Option<Self> {
        let content = payload.get("content")?.as_str()?.to_string();
        let id = payload.get("id").and_then(MessageId::from_value);
        let timestamp = payload.get("timestamp").and_then(parse_timestamp);

        Some(Self {
            content,
            id,
            timestamp,
        })
    }
}

/// Numbers are epoch milliseconds, strings are RFC 3339.
fn parse_timestamp(value: &Value) -> Option<DateTime<Local>> {
    match value {
        Value::Number(n) => {
            let millis = n.as_i64()?;
            Utc.timestamp_millis_opt(millis)
                .single()
                .map(|ts| ts.with_timezone(&Local))
        }
        Value::String(s) => DateTime::parse_from_rfc3339(s)
            .ok()
            .map(|ts| ts.with_timezone(&Local)),
        _ => None,
    }
}

/// Logs details of each API call.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiCallLog {
    pub timestamp: DateTime<Utc>,
    pub endpoint: String,
    pub request_summary: String,
    pub response_status: u16,
    pub response_time_ms: u128,
}
