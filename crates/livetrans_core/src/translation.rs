/// Payload of one translate call: already trimmed, never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationRequest {
    pub text: String,
    pub target_lang: String,
}

/// A successful translation, handed to the result renderer as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translation {
    pub original_text: String,
    pub detected_language: String,
    pub translated_text: String,
    pub target_language: String,
    pub history_id: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureClass {
    /// HTTP 429.
    RateLimited,
    /// Any other non-2xx status, or a body that could not be decoded.
    RequestFailed { status: Option<u16> },
    /// No response at all: transport failure or timeout.
    Network,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationFailure {
    pub class: FailureClass,
    /// Server supplied `error` message, or the transport error text for
    /// `FailureClass::Network`.
    pub message: Option<String>,
}

impl TranslationFailure {
    pub fn new(class: FailureClass, message: Option<String>) -> Self {
        Self { class, message }
    }

    /// Message for the error banner shown after an explicit translate.
    pub fn banner_message(&self) -> String {
        match (self.class, self.message.as_deref()) {
            (FailureClass::Network, Some(detail)) => format!("Network error: {detail}"),
            (FailureClass::Network, None) => "Network error".to_string(),
            (_, Some(message)) if !message.trim().is_empty() => message.to_string(),
            (FailureClass::RateLimited, _) => {
                "Too many requests. Please wait a moment before trying again.".to_string()
            }
            (FailureClass::RequestFailed { .. }, _) => "Translation failed".to_string(),
        }
    }
}
