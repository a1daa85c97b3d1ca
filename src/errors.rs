// src/errors.rs

use thiserror::Error;

pub type ChatResult<T> = Result<T, ChatError>;

#[derive(Debug, Error)]
pub enum ChatError {
    /// The request never produced an HTTP response.
    #[error("{0}")]
    Transport(String),

    /// The response body could not be parsed as JSON.
    #[error("Invalid response from server: {}", status_line(.status, .status_text))]
    MalformedResponse { status: u16, status_text: String },

    /// The endpoint answered with a non-2xx status.
    #[error("{message}")]
    Http { status: u16, message: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Logger error: {0}")]
    Logger(#[from] flexi_logger::FlexiLoggerError),
}

impl ChatError {
    pub fn transport(message: impl Into<String>) -> Self {
        ChatError::Transport(message.into())
    }

    pub fn config_error(message: impl Into<String>) -> Self {
        ChatError::Config(message.into())
    }

    pub fn malformed(status: reqwest::StatusCode) -> Self {
        ChatError::MalformedResponse {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or_default().to_string(),
        }
    }

    pub fn http(status: u16, message: impl Into<String>) -> Self {
        ChatError::Http {
            status,
            message: message.into(),
        }
    }
}

// Without the URL: replies match keywords against this text.
impl From<reqwest::Error> for ChatError {
    fn from(err: reqwest::Error) -> Self {
        ChatError::Transport(err.without_url().to_string())
    }
}

fn status_line(status: &u16, status_text: &str) -> String {
    if status_text.is_empty() {
        status.to_string()
    } else {
        format!("{} {}", status, status_text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_embeds_status_and_reason() {
        let err = ChatError::malformed(reqwest::StatusCode::BAD_GATEWAY);
        assert_eq!(err.to_string(), "Invalid response from server: 502 Bad Gateway");
    }

    #[test]
    fn test_malformed_without_reason_has_no_trailing_space() {
        let status = reqwest::StatusCode::from_u16(599).unwrap();
        let err = ChatError::malformed(status);
        assert_eq!(err.to_string(), "Invalid response from server: 599");
    }

    #[test]
    fn test_http_error_displays_server_message() {
        let err = ChatError::http(429, "slow down");
        assert_eq!(err.to_string(), "slow down");
    }
}
