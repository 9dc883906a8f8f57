use std::fmt;

use serde::{Deserialize, Serialize};

pub type TimerId = u64;
pub type Generation = u64;

/// Body of `POST /translate`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TranslationRequest {
    pub text: String,
    pub target_lang: String,
}

/// Success body of `POST /translate`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TranslationResponse {
    pub original_text: String,
    pub detected_language: String,
    pub translated_text: String,
    pub target_language: String,
    #[serde(default)]
    pub history_id: Option<i64>,
}

/// Error body the backend sends with non-2xx statuses. Every field is optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub(crate) error: Option<String>,
    #[serde(default)]
    pub(crate) message: Option<String>,
    #[serde(default)]
    pub(crate) retry_after: Option<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    TimerFired {
        timer_id: TimerId,
    },
    TranslationCompleted {
        generation: Generation,
        result: Result<TranslationResponse, TranslateError>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct TranslateError {
    pub kind: FailureKind,
    pub message: String,
    /// The `error` field of the response body, when the server sent one.
    pub server_message: Option<String>,
}

impl TranslateError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            server_message: None,
        }
    }

    pub(crate) fn with_server_message(mut self, server_message: Option<String>) -> Self {
        self.server_message = server_message;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    RateLimited,
    HttpStatus(u16),
    MalformedBody,
    Timeout,
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::RateLimited => write!(f, "rate limited"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::MalformedBody => write!(f, "malformed response body"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::Network => write!(f, "network error"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("failed to start engine runtime: {0}")]
    Runtime(#[from] std::io::Error),
    #[error("invalid base url {url:?}: {message}")]
    InvalidBaseUrl { url: String, message: String },
    #[error("failed to build translate client: {0}")]
    HttpClient(#[from] reqwest::Error),
}
