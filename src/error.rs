use thiserror::Error;

pub type Result<T, E = ChatError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum ChatError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("HTTP {0}")]
    Status(u16),
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("websocket error: {0}")]
    WebSocket(#[from] tokio_tungstenite::tungstenite::Error),
    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("config error: {0}")]
    Config(String),
    #[error("no channel attached")]
    NotConnected,
    #[error("channel closed")]
    ChannelClosed,
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Composer validation failures, shown inline under the input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter a message to send!")]
    Required,
    #[error("Message must contain at least {min} character(s)")]
    TooShort { min: usize },
}

impl From<toml::de::Error> for ChatError {
    fn from(e: toml::de::Error) -> Self {
        ChatError::Config(e.to_string())
    }
}

impl From<toml::ser::Error> for ChatError {
    fn from(e: toml::ser::Error) -> Self {
        ChatError::Config(e.to_string())
    }
}
