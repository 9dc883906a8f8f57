use crate::view_model::StatusKind;
use crate::{AppState, CycleMode, Effect, FailureClass, Msg, Translation, TranslationFailure};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let mut effects = Vec::new();
    match msg {
        Msg::SetEnabled(true) => {
            state.set_enabled(true);
            state.cancel_debounce(&mut effects);
            if state.revive_in_flight() {
                // The cycle started before the last disable is relevant again.
                state.show_status(StatusKind::Translating, &mut effects);
            } else {
                start_cycle(&mut state, CycleMode::Realtime, &mut effects);
            }
        }
        Msg::SetEnabled(false) => {
            state.set_enabled(false);
            state.cancel_debounce(&mut effects);
            state.clear_status(&mut effects);
            state.mark_in_flight_stale(false);
        }
        Msg::TextChanged(text) => {
            state.set_text(text);
            state.cancel_debounce(&mut effects);
            if !state.is_enabled() || state.trimmed_text().is_empty() {
                state.clear_status(&mut effects);
            } else {
                state.show_status(StatusKind::Typing, &mut effects);
                state.arm_debounce(&mut effects);
            }
        }
        Msg::TargetLanguageChanged(lang) => {
            state.set_target_lang(lang);
            if state.is_enabled() && !state.trimmed_text().is_empty() {
                state.cancel_debounce(&mut effects);
                start_cycle(&mut state, CycleMode::Realtime, &mut effects);
            }
        }
        Msg::TranslateClicked => {
            state.cancel_debounce(&mut effects);
            if state.trimmed_text().is_empty() {
                state.set_error_banner(Some("Please enter some text to translate".to_string()));
            } else if let Some(mode) = state.in_flight_mode() {
                // Sent with the text current once the slot frees up.
                state.queue_manual();
                match mode {
                    CycleMode::Realtime => state.show_status(StatusKind::Translating, &mut effects),
                    CycleMode::Manual => state.clear_status(&mut effects),
                }
            } else {
                start_cycle(&mut state, CycleMode::Manual, &mut effects);
            }
        }
        Msg::TimerElapsed { timer_id } => {
            if state.take_debounce(timer_id) {
                if state.is_enabled() {
                    start_cycle(&mut state, CycleMode::Realtime, &mut effects);
                }
            } else if state.take_status_clear(timer_id) {
                state.clear_status(&mut effects);
            }
        }
        Msg::TranslationFinished {
            generation,
            outcome,
        } => {
            if let Some(flight) = state.finish_cycle(generation) {
                if !flight.stale {
                    apply_outcome(&mut state, flight.mode, outcome, &mut effects);
                }
                if state.take_queued_manual() {
                    start_cycle(&mut state, CycleMode::Manual, &mut effects);
                }
            }
        }
        Msg::TornDown => {
            state.set_enabled(false);
            state.cancel_debounce(&mut effects);
            state.clear_status(&mut effects);
            state.mark_in_flight_stale(true);
            state.take_queued_manual();
        }
        Msg::Tick | Msg::NoOp => {}
    }

    (state, effects)
}

/// The translate cycle. A no-op while another cycle is in flight.
fn start_cycle(state: &mut AppState, mode: CycleMode, effects: &mut Vec<Effect>) {
    let Some((generation, request)) = state.begin_cycle(mode) else {
        return;
    };
    match mode {
        CycleMode::Realtime => state.show_status(StatusKind::Translating, effects),
        CycleMode::Manual => {
            state.clear_status(effects);
            state.set_error_banner(None);
        }
    }
    effects.push(Effect::StartTranslation {
        generation,
        request,
    });
}

fn apply_outcome(
    state: &mut AppState,
    mode: CycleMode,
    outcome: Result<Translation, TranslationFailure>,
    effects: &mut Vec<Effect>,
) {
    match (mode, outcome) {
        (CycleMode::Realtime, Ok(translation)) => {
            state.set_result(translation);
            state.flash_status(StatusKind::Translated, effects);
        }
        (CycleMode::Realtime, Err(failure)) => {
            state.flash_status(status_for(failure.class), effects);
        }
        (CycleMode::Manual, Ok(translation)) => state.set_result(translation),
        (CycleMode::Manual, Err(failure)) => state.set_error_banner(Some(failure.banner_message())),
    }
}

fn status_for(class: FailureClass) -> StatusKind {
    match class {
        FailureClass::RateLimited => StatusKind::RateLimited,
        FailureClass::RequestFailed { .. } => StatusKind::RequestFailed,
        FailureClass::Network => StatusKind::NetworkError,
    }
}
