use std::sync::{Arc, Mutex};
use std::time::Duration;

use livetrans_engine::{
    EngineEvent, EngineHandle, FailureKind, TranslateError, TranslationRequest,
    TranslationResponse, Translator,
};

const WAIT: Duration = Duration::from_secs(2);

/// Answers every request with an echo, after an optional delay.
#[derive(Default)]
struct EchoTranslator {
    delay: Duration,
    seen: Arc<Mutex<Vec<TranslationRequest>>>,
}

#[async_trait::async_trait]
impl Translator for EchoTranslator {
    async fn translate(
        &self,
        request: &TranslationRequest,
    ) -> Result<TranslationResponse, TranslateError> {
        self.seen.lock().unwrap().push(request.clone());
        tokio::time::sleep(self.delay).await;
        if request.text == "boom" {
            return Err(TranslateError {
                kind: FailureKind::HttpStatus(500),
                message: "500 Internal Server Error".to_string(),
                server_message: None,
            });
        }
        Ok(TranslationResponse {
            original_text: request.text.clone(),
            detected_language: "Spanish".to_string(),
            translated_text: format!("<{}>", request.text),
            target_language: request.target_lang.clone(),
            history_id: None,
        })
    }
}

fn request(text: &str) -> TranslationRequest {
    TranslationRequest {
        text: text.to_string(),
        target_lang: "English".to_string(),
    }
}

#[test]
fn timers_fire_with_their_id() {
    let (engine, events) = EngineHandle::with_translator(Arc::new(EchoTranslator::default())).unwrap();

    engine.arm_timer(3, Duration::from_millis(10));

    assert_eq!(events.recv_timeout(WAIT), Some(EngineEvent::TimerFired { timer_id: 3 }));
}

#[test]
fn cancelled_timers_stay_silent() {
    let (engine, events) = EngineHandle::with_translator(Arc::new(EchoTranslator::default())).unwrap();

    engine.arm_timer(1, Duration::from_millis(150));
    engine.cancel_timer(1);
    engine.arm_timer(2, Duration::from_millis(30));

    assert_eq!(events.recv_timeout(WAIT), Some(EngineEvent::TimerFired { timer_id: 2 }));
    assert_eq!(events.recv_timeout(Duration::from_millis(300)), None);
}

#[test]
fn translation_results_carry_their_generation() {
    let translator = EchoTranslator::default();
    let seen = translator.seen.clone();
    let (engine, events) = EngineHandle::with_translator(Arc::new(translator)).unwrap();

    engine.translate(5, request("Hola"));

    match events.recv_timeout(WAIT) {
        Some(EngineEvent::TranslationCompleted { generation, result }) => {
            assert_eq!(generation, 5);
            assert_eq!(result.unwrap().translated_text, "<Hola>");
        }
        other => panic!("unexpected event {other:?}"),
    }
    assert_eq!(seen.lock().unwrap().as_slice(), &[request("Hola")]);
}

#[test]
fn translation_failures_are_reported_not_raised() {
    let (engine, events) = EngineHandle::with_translator(Arc::new(EchoTranslator::default())).unwrap();

    engine.translate(1, request("boom"));

    match events.recv_timeout(WAIT) {
        Some(EngineEvent::TranslationCompleted { generation: 1, result: Err(err) }) => {
            assert_eq!(err.kind, FailureKind::HttpStatus(500));
        }
        other => panic!("unexpected event {other:?}"),
    }
}

#[test]
fn timers_keep_running_during_a_slow_translation() {
    let translator = EchoTranslator {
        delay: Duration::from_millis(200),
        ..EchoTranslator::default()
    };
    let (engine, events) = EngineHandle::with_translator(Arc::new(translator)).unwrap();

    engine.translate(1, request("Hola"));
    engine.arm_timer(9, Duration::from_millis(10));

    assert_eq!(events.recv_timeout(WAIT), Some(EngineEvent::TimerFired { timer_id: 9 }));
    assert!(matches!(
        events.recv_timeout(WAIT),
        Some(EngineEvent::TranslationCompleted { generation: 1, .. })
    ));
}

#[test]
fn dropping_the_handle_closes_the_event_stream() {
    let (engine, events) = EngineHandle::with_translator(Arc::new(EchoTranslator::default())).unwrap();
    engine.arm_timer(1, Duration::from_secs(60));

    drop(engine);

    assert_eq!(events.recv(), None);
}
