//! Livetrans core: the real-time translation coordinator as a pure state
//! machine, plus the view snapshot renderers consume.
mod effect;
mod msg;
mod state;
mod translation;
mod update;
mod view_model;

pub use effect::{Effect, TimerKind};
pub use msg::Msg;
pub use state::{AppState, CoordinatorSettings, CycleMode, Generation, TimerId};
pub use translation::{FailureClass, Translation, TranslationFailure, TranslationRequest};
pub use update::update;
pub use view_model::{CoordinatorView, StatusKind, StatusView};
