//! Livetrans engine: executes coordinator effects (timers and `/translate`
//! calls) on a background tokio runtime.
mod client;
mod engine;
mod timers;
mod types;

pub use client::{ClientSettings, ReqwestTranslator, Translator};
pub use engine::{EngineEvents, EngineHandle};
pub use types::{
    EngineError, EngineEvent, FailureKind, Generation, TimerId, TranslateError,
    TranslationRequest, TranslationResponse,
};
