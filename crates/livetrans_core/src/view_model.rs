use crate::{CycleMode, Translation};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Typing,
    Translating,
    Translated,
    RateLimited,
    RequestFailed,
    NetworkError,
}

impl StatusKind {
    pub fn message(self) -> &'static str {
        match self {
            StatusKind::Typing => "Typing...",
            StatusKind::Translating => "Translating...",
            StatusKind::Translated => "Translated!",
            StatusKind::RateLimited => "Rate limit exceeded",
            StatusKind::RequestFailed => "Error",
            StatusKind::NetworkError => "Network error",
        }
    }

    pub fn is_error(self) -> bool {
        matches!(
            self,
            StatusKind::RateLimited | StatusKind::RequestFailed | StatusKind::NetworkError
        )
    }
}

/// What the real-time status region shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusView {
    pub kind: StatusKind,
    pub message: &'static str,
    pub is_error: bool,
}

impl From<StatusKind> for StatusView {
    fn from(kind: StatusKind) -> Self {
        Self {
            kind,
            message: kind.message(),
            is_error: kind.is_error(),
        }
    }
}

/// Immutable snapshot of the coordinator, the only input renderers get.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CoordinatorView {
    pub enabled: bool,
    pub target_lang: String,
    /// `None` means the status region is hidden.
    pub status: Option<StatusView>,
    pub in_flight: Option<CycleMode>,
    pub result: Option<Translation>,
    pub error_banner: Option<String>,
}
