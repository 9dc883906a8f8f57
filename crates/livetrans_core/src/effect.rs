use std::time::Duration;

use crate::{Generation, TimerId, TranslationRequest};

/// Side effects requested by [`crate::update`]; executed by the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Start a one-shot timer. Its expiry comes back as `Msg::TimerElapsed`.
    ArmTimer {
        timer_id: TimerId,
        kind: TimerKind,
        delay: Duration,
    },
    /// Cancel a timer armed earlier. Unknown or already fired ids are ignored.
    CancelTimer { timer_id: TimerId },
    /// Send one `/translate` request. Its result comes back as
    /// `Msg::TranslationFinished` carrying the same generation.
    StartTranslation {
        generation: Generation,
        request: TranslationRequest,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    Debounce,
    StatusClear,
}
