use std::time::Duration;

use crate::effect::{Effect, TimerKind};
use crate::view_model::{CoordinatorView, StatusKind, StatusView};
use crate::{Translation, TranslationRequest};

pub type TimerId = u64;
pub type Generation = u64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoordinatorSettings {
    /// Quiet period after the last keystroke before a request is sent.
    pub debounce: Duration,
    /// How long a final status ("Translated!" or an error) stays visible.
    pub status_clear: Duration,
    /// Target language selected when the widget starts.
    pub target_lang: String,
}

impl Default for CoordinatorSettings {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(800),
            status_clear: Duration::from_millis(2000),
            target_lang: "English".to_string(),
        }
    }
}

/// Who asked for a translation cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleMode {
    /// Debounced typing, language change or enabling real-time mode.
    Realtime,
    /// The explicit translate action.
    Manual,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct InFlight {
    pub(crate) generation: Generation,
    pub(crate) mode: CycleMode,
    /// Set when real-time mode was switched off (or the widget torn down)
    /// after this cycle started; its result is dropped on arrival.
    pub(crate) stale: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    settings: CoordinatorSettings,
    enabled: bool,
    text: String,
    target_lang: String,
    debounce_timer: Option<TimerId>,
    status_clear_timer: Option<TimerId>,
    in_flight: Option<InFlight>,
    /// A manual translate requested while the slot was taken.
    manual_queued: bool,
    status: Option<StatusKind>,
    last_result: Option<Translation>,
    error_banner: Option<String>,
    next_timer_id: TimerId,
    next_generation: Generation,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::with_settings(CoordinatorSettings::default())
    }

    pub fn with_settings(settings: CoordinatorSettings) -> Self {
        Self {
            target_lang: settings.target_lang.clone(),
            settings,
            ..Self::default()
        }
    }

    pub fn view(&self) -> CoordinatorView {
        CoordinatorView {
            enabled: self.enabled,
            target_lang: self.target_lang.clone(),
            status: self.status.map(StatusView::from),
            in_flight: self.in_flight.map(|flight| flight.mode),
            result: self.last_result.clone(),
            error_banner: self.error_banner.clone(),
        }
    }

    /// Returns whether the view changed since the last call, and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn pending_debounce(&self) -> Option<TimerId> {
        self.debounce_timer
    }

    pub(crate) fn trimmed_text(&self) -> &str {
        self.text.trim()
    }

    pub(crate) fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        self.dirty = true;
    }

    pub(crate) fn set_text(&mut self, text: String) {
        self.text = text;
    }

    pub(crate) fn set_target_lang(&mut self, lang: String) {
        if self.target_lang != lang {
            self.target_lang = lang;
            self.dirty = true;
        }
    }

    pub(crate) fn set_error_banner(&mut self, banner: Option<String>) {
        if self.error_banner != banner {
            self.error_banner = banner;
            self.dirty = true;
        }
    }

    pub(crate) fn set_result(&mut self, result: Translation) {
        self.last_result = Some(result);
        self.error_banner = None;
        self.dirty = true;
    }

    fn allocate_timer(&mut self) -> TimerId {
        self.next_timer_id += 1;
        self.next_timer_id
    }

    /// Cancels the pending debounce timer, if any.
    pub(crate) fn cancel_debounce(&mut self, effects: &mut Vec<Effect>) {
        if let Some(timer_id) = self.debounce_timer.take() {
            effects.push(Effect::CancelTimer { timer_id });
        }
    }

    /// Replaces any pending debounce timer with a fresh one.
    pub(crate) fn arm_debounce(&mut self, effects: &mut Vec<Effect>) {
        self.cancel_debounce(effects);
        let timer_id = self.allocate_timer();
        self.debounce_timer = Some(timer_id);
        effects.push(Effect::ArmTimer {
            timer_id,
            kind: TimerKind::Debounce,
            delay: self.settings.debounce,
        });
    }

    /// Returns true (and forgets the timer) if `timer_id` is the armed debounce.
    pub(crate) fn take_debounce(&mut self, timer_id: TimerId) -> bool {
        if self.debounce_timer == Some(timer_id) {
            self.debounce_timer = None;
            true
        } else {
            false
        }
    }

    /// Returns true (and forgets the timer) if `timer_id` is the armed auto-clear.
    pub(crate) fn take_status_clear(&mut self, timer_id: TimerId) -> bool {
        if self.status_clear_timer == Some(timer_id) {
            self.status_clear_timer = None;
            true
        } else {
            false
        }
    }

    fn cancel_status_clear(&mut self, effects: &mut Vec<Effect>) {
        if let Some(timer_id) = self.status_clear_timer.take() {
            effects.push(Effect::CancelTimer { timer_id });
        }
    }

    /// Shows a status that stays until replaced.
    pub(crate) fn show_status(&mut self, kind: StatusKind, effects: &mut Vec<Effect>) {
        self.cancel_status_clear(effects);
        if self.status != Some(kind) {
            self.status = Some(kind);
            self.dirty = true;
        }
    }

    /// Shows a final status and arms its auto-clear timer.
    pub(crate) fn flash_status(&mut self, kind: StatusKind, effects: &mut Vec<Effect>) {
        self.show_status(kind, effects);
        let timer_id = self.allocate_timer();
        self.status_clear_timer = Some(timer_id);
        effects.push(Effect::ArmTimer {
            timer_id,
            kind: TimerKind::StatusClear,
            delay: self.settings.status_clear,
        });
    }

    pub(crate) fn clear_status(&mut self, effects: &mut Vec<Effect>) {
        self.cancel_status_clear(effects);
        if self.status.take().is_some() {
            self.dirty = true;
        }
    }

    /// Claims the single in-flight slot. Returns `None` when it is taken or
    /// there is nothing to translate.
    pub(crate) fn begin_cycle(&mut self, mode: CycleMode) -> Option<(Generation, TranslationRequest)> {
        if self.in_flight.is_some() {
            return None;
        }
        let text = self.trimmed_text();
        if text.is_empty() {
            return None;
        }
        let request = TranslationRequest {
            text: text.to_string(),
            target_lang: self.target_lang.clone(),
        };
        self.next_generation += 1;
        let generation = self.next_generation;
        self.in_flight = Some(InFlight {
            generation,
            mode,
            stale: false,
        });
        self.dirty = true;
        Some((generation, request))
    }

    /// Releases the in-flight slot if `generation` owns it.
    pub(crate) fn finish_cycle(&mut self, generation: Generation) -> Option<InFlight> {
        match self.in_flight {
            Some(flight) if flight.generation == generation => {
                self.in_flight = None;
                self.dirty = true;
                Some(flight)
            }
            _ => None,
        }
    }

    /// Marks the in-flight cycle so its result is dropped. Manual cycles are
    /// only affected when `include_manual` is set.
    pub(crate) fn mark_in_flight_stale(&mut self, include_manual: bool) {
        if let Some(flight) = self.in_flight.as_mut() {
            if flight.mode == CycleMode::Realtime || include_manual {
                flight.stale = true;
            }
        }
    }

    pub(crate) fn in_flight_mode(&self) -> Option<CycleMode> {
        self.in_flight.map(|flight| flight.mode)
    }

    pub(crate) fn queue_manual(&mut self) {
        self.manual_queued = true;
    }

    pub(crate) fn take_queued_manual(&mut self) -> bool {
        std::mem::take(&mut self.manual_queued)
    }

    /// Un-marks a stale real-time cycle. Returns true if one was revived.
    pub(crate) fn revive_in_flight(&mut self) -> bool {
        match self.in_flight.as_mut() {
            Some(flight) if flight.mode == CycleMode::Realtime && flight.stale => {
                flight.stale = false;
                true
            }
            _ => false,
        }
    }
}
