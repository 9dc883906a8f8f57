use livetrans_core::{Effect, FailureClass, Msg, Translation, TranslationFailure, TranslationRequest};
use livetrans_engine::{EngineEvent, EngineHandle, FailureKind, TranslateError, TranslationResponse};
use livetrans_logging::{lt_debug, lt_info};

pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(engine: EngineHandle) -> Self {
        Self { engine }
    }

    pub fn run(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::ArmTimer {
                    timer_id,
                    kind,
                    delay,
                } => {
                    lt_debug!("ArmTimer id={} kind={:?} delay={:?}", timer_id, kind, delay);
                    self.engine.arm_timer(timer_id, delay);
                }
                Effect::CancelTimer { timer_id } => {
                    lt_debug!("CancelTimer id={}", timer_id);
                    self.engine.cancel_timer(timer_id);
                }
                Effect::StartTranslation {
                    generation,
                    request,
                } => {
                    lt_info!(
                        "StartTranslation generation={} chars={} target={}",
                        generation,
                        request.text.chars().count(),
                        request.target_lang
                    );
                    self.engine.translate(generation, to_wire(request));
                }
            }
        }
    }
}

pub fn engine_event_to_msg(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::TimerFired { timer_id } => Msg::TimerElapsed { timer_id },
        EngineEvent::TranslationCompleted { generation, result } => Msg::TranslationFinished {
            generation,
            outcome: result.map(map_response).map_err(map_failure),
        },
    }
}

fn to_wire(request: TranslationRequest) -> livetrans_engine::TranslationRequest {
    livetrans_engine::TranslationRequest {
        text: request.text,
        target_lang: request.target_lang,
    }
}

fn map_response(response: TranslationResponse) -> Translation {
    Translation {
        original_text: response.original_text,
        detected_language: response.detected_language,
        translated_text: response.translated_text,
        target_language: response.target_language,
        history_id: response.history_id,
    }
}

fn map_failure(err: TranslateError) -> TranslationFailure {
    match err.kind {
        FailureKind::RateLimited => {
            TranslationFailure::new(FailureClass::RateLimited, err.server_message)
        }
        FailureKind::HttpStatus(code) => TranslationFailure::new(
            FailureClass::RequestFailed { status: Some(code) },
            err.server_message,
        ),
        FailureKind::MalformedBody => {
            TranslationFailure::new(FailureClass::RequestFailed { status: None }, None)
        }
        FailureKind::Timeout | FailureKind::Network => {
            TranslationFailure::new(FailureClass::Network, Some(err.message))
        }
    }
}
