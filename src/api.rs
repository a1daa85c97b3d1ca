use crate::{
    config::Config,
    constants::CHAT_API_PATH,
    errors::{ChatError, ChatResult},
    logging::log_api_call,
    models::{ApiCallLog, ChatReply, ChatRequest, WireMessage},
};
use chrono::Utc;
use reqwest::Client;
use serde_json::Value;
use std::time::{Duration, Instant};

/// Client for the chat endpoint. Cheap to clone.
#[derive(Debug, Clone)]
pub struct ChatClient {
    http: Client,
    url: String,
}

impl ChatClient {
    pub fn new(endpoint: &str) -> Self {
        Self::with_client(Client::new(), endpoint)
    }

    pub fn from_config(config: &Config) -> ChatResult<Self> {
        let mut builder = Client::builder();
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http = builder
            .build()
            .map_err(|e| ChatError::config_error(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self::with_client(http, &config.endpoint))
    }

    fn with_client(http: Client, endpoint: &str) -> Self {
        Self {
            http,
            url: format!("{}{}", endpoint.trim_end_matches('/'), CHAT_API_PATH),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Posts the role/content list and returns the reply.
    pub async fn send(&self, messages: &[WireMessage]) -> ChatResult<ChatReply> {
        let start_time = Instant::now();

        let response = self
            .http
            .post(&self.url)
            .json(&ChatRequest { messages })
            .send()
            .await
            .map_err(|e| {
                log::warn!("Request to {} failed: {}", self.url, e);
                ChatError::from(e)
            })?;

        let status = response.status();
        let body = response.text().await?;

        log_api_call(&ApiCallLog {
            timestamp: Utc::now(),
            endpoint: self.url.clone(),
            request_summary: format!("chat ({} messages)", messages.len()),
            response_status: status.as_u16(),
            response_time_ms: start_time.elapsed().as_millis(),
        });

        // Body is read as text first so an HTML error page still reports its status.
        let payload: Value = serde_json::from_str(&body).map_err(|e| {
            log::warn!("Unparseable body from {} ({}): {}", self.url, status, e);
            ChatError::malformed(status)
        })?;

        if !status.is_success() {
            let message = server_message(&payload).unwrap_or_else(|| {
                format!("Request failed with status {}", status.as_u16())
            });
            return Err(ChatError::http(status.as_u16(), message));
        }

        ChatReply::from_payload(&payload).ok_or_else(|| {
            log::warn!("Reply from {} has no string content", self.url);
            ChatError::malformed(status)
        })
    }
}

/// `error` may be a plain string or an object carrying its own `message`.
fn server_message(payload: &Value) -> Option<String> {
    let error = payload.get("error");

    error
        .and_then(Value::as_str)
        .or_else(|| error.and_then(|e| e.get("message")).and_then(Value::as_str))
        .or_else(|| payload.get("message").and_then(Value::as_str))
        .filter(|m| !m.trim().is_empty())
        .map(str::to_string)
}
