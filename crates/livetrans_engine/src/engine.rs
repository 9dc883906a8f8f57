use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use livetrans_logging::{lt_debug, lt_info, lt_trace, lt_warn};
use tokio::runtime::Runtime;

use crate::client::{ClientSettings, ReqwestTranslator, Translator};
use crate::timers::TimerSet;
use crate::{EngineError, EngineEvent, Generation, TimerId, TranslationRequest};

enum EngineCommand {
    ArmTimer { timer_id: TimerId, delay: Duration },
    CancelTimer { timer_id: TimerId },
    Translate { generation: Generation, request: TranslationRequest },
    Shutdown,
}

/// Command side of the engine. Dropping it stops the engine thread; requests
/// still in flight at that point are abandoned.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    thread: Option<thread::JoinHandle<()>>,
}

/// Event side of the engine: timer expiries and translation results.
pub struct EngineEvents {
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(settings: ClientSettings) -> Result<(Self, EngineEvents), EngineError> {
        let translator = ReqwestTranslator::new(settings)?;
        lt_info!("Translate endpoint {}", translator.endpoint());
        Self::with_translator(Arc::new(translator))
    }

    pub fn with_translator(
        translator: Arc<dyn Translator>,
    ) -> Result<(Self, EngineEvents), EngineError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("livetrans-io")
            .enable_all()
            .build()?;
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        let thread = thread::Builder::new()
            .name("livetrans-engine".to_string())
            .spawn(move || run(runtime, translator, cmd_rx, event_tx))?;

        Ok((
            Self {
                cmd_tx,
                thread: Some(thread),
            },
            EngineEvents { event_rx },
        ))
    }

    pub fn arm_timer(&self, timer_id: TimerId, delay: Duration) {
        self.send(EngineCommand::ArmTimer { timer_id, delay });
    }

    pub fn cancel_timer(&self, timer_id: TimerId) {
        self.send(EngineCommand::CancelTimer { timer_id });
    }

    pub fn translate(&self, generation: Generation, request: TranslationRequest) {
        self.send(EngineCommand::Translate {
            generation,
            request,
        });
    }

    fn send(&self, command: EngineCommand) {
        if self.cmd_tx.send(command).is_err() {
            lt_warn!("Engine thread is gone; command dropped");
        }
    }
}

impl Drop for EngineHandle {
    fn drop(&mut self) {
        let _ = self.cmd_tx.send(EngineCommand::Shutdown);
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

impl EngineEvents {
    /// Blocks until the next event. `None` once the engine has shut down.
    pub fn recv(&self) -> Option<EngineEvent> {
        self.event_rx.recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}

fn run(
    runtime: Runtime,
    translator: Arc<dyn Translator>,
    cmd_rx: mpsc::Receiver<EngineCommand>,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    let mut timers = TimerSet::default();
    while let Ok(command) = cmd_rx.recv() {
        match command {
            EngineCommand::ArmTimer { timer_id, delay } => {
                timers.arm(runtime.handle(), timer_id, delay, event_tx.clone());
                lt_trace!(
                    "Armed timer {} for {:?} ({} pending)",
                    timer_id,
                    delay,
                    timers.len()
                );
            }
            EngineCommand::CancelTimer { timer_id } => {
                if timers.cancel(timer_id) {
                    lt_trace!("Cancelled timer {}", timer_id);
                }
            }
            EngineCommand::Translate {
                generation,
                request,
            } => {
                let translator = translator.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    let result = translator.translate(&request).await;
                    match &result {
                        Ok(_) => lt_debug!("Translation {} succeeded", generation),
                        Err(err) => lt_warn!("Translation {} failed: {}", generation, err),
                    }
                    let _ = event_tx.send(EngineEvent::TranslationCompleted { generation, result });
                });
            }
            EngineCommand::Shutdown => break,
        }
    }
    timers.cancel_all();
    runtime.shutdown_timeout(Duration::from_secs(1));
    lt_debug!("Engine thread stopped");
}
