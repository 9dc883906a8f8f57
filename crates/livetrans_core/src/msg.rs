use crate::{Generation, TimerId, Translation, TranslationFailure};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User toggled real-time mode.
    SetEnabled(bool),
    /// Input text changed (raw, untrimmed).
    TextChanged(String),
    /// User picked another target language.
    TargetLanguageChanged(String),
    /// User asked for an explicit translation of the current input.
    TranslateClicked,
    /// A timer armed through `Effect::ArmTimer` expired.
    TimerElapsed { timer_id: TimerId },
    /// A request started through `Effect::StartTranslation` completed.
    TranslationFinished {
        generation: Generation,
        outcome: Result<Translation, TranslationFailure>,
    },
    /// The widget is going away.
    TornDown,
    /// UI/render tick.
    Tick,
    /// Fallback for placeholder wiring.
    NoOp,
}
