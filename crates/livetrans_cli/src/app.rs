use std::io::{self, BufRead, Write};
use std::sync::mpsc;
use std::thread;

use anyhow::Context;
use livetrans_core::{update, AppState, CoordinatorSettings, CoordinatorView, Msg};
use livetrans_engine::{EngineEvent, EngineEvents, EngineHandle};
use livetrans_logging::{lt_info, lt_warn};

use crate::config::AppConfig;
use crate::effects::{engine_event_to_msg, EffectRunner};
use crate::input::{parse_line, InputCommand, HELP};
use crate::render;

enum AppEvent {
    Input(InputCommand),
    InputClosed,
    Engine(EngineEvent),
}

pub fn run(config: &AppConfig, start_enabled: bool) -> anyhow::Result<()> {
    let (engine, events) =
        EngineHandle::new(config.client_settings()).context("failed to start the translation engine")?;

    let (event_tx, event_rx) = mpsc::channel();
    spawn_input_reader(event_tx.clone())?;
    spawn_event_forwarder(events, event_tx)?;

    let stdout = io::stdout();
    let mut session = Session::new(
        config.coordinator_settings(),
        EffectRunner::new(engine),
        stdout.lock(),
    );
    session.write_line(HELP)?;
    session.render()?;
    if start_enabled {
        session.dispatch(Msg::SetEnabled(true))?;
    }

    // Once stdin is exhausted, keep going until the last cycle has settled so
    // piped input still gets its translation.
    let mut input_closed = false;
    for event in event_rx.iter() {
        match event {
            AppEvent::Input(InputCommand::Quit) => break,
            AppEvent::Input(InputCommand::Help) => session.write_line(HELP)?,
            AppEvent::Input(InputCommand::Unknown(line)) => {
                session.write_line(&format!("unknown command {line:?}, try :help"))?;
            }
            AppEvent::Input(command) => {
                if let Some(msg) = command.into_msg() {
                    session.dispatch(msg)?;
                }
            }
            AppEvent::InputClosed => input_closed = true,
            AppEvent::Engine(event) => session.dispatch(engine_event_to_msg(event))?,
        }
        if input_closed && session.is_idle() {
            break;
        }
    }

    session.dispatch(Msg::TornDown)?;
    lt_info!("Session closed");
    Ok(())
}

fn spawn_input_reader(event_tx: mpsc::Sender<AppEvent>) -> io::Result<()> {
    thread::Builder::new()
        .name("livetrans-input".to_string())
        .spawn(move || {
            for line in io::stdin().lock().lines() {
                match line {
                    Ok(line) => {
                        if event_tx.send(AppEvent::Input(parse_line(&line))).is_err() {
                            return;
                        }
                    }
                    Err(err) => {
                        lt_warn!("Failed to read input: {}", err);
                        break;
                    }
                }
            }
            let _ = event_tx.send(AppEvent::InputClosed);
        })?;
    Ok(())
}

fn spawn_event_forwarder(events: EngineEvents, event_tx: mpsc::Sender<AppEvent>) -> io::Result<()> {
    thread::Builder::new()
        .name("livetrans-events".to_string())
        .spawn(move || {
            while let Some(event) = events.recv() {
                if event_tx.send(AppEvent::Engine(event)).is_err() {
                    break;
                }
            }
        })?;
    Ok(())
}

/// Owns the coordinator state. Every message goes through [`Session::dispatch`]
/// on one thread, which is what keeps the in-flight check race free.
pub(crate) struct Session<W: Write> {
    state: AppState,
    runner: EffectRunner,
    out: W,
    last_view: Option<CoordinatorView>,
}

impl<W: Write> Session<W> {
    pub(crate) fn new(settings: CoordinatorSettings, runner: EffectRunner, out: W) -> Self {
        Self {
            state: AppState::with_settings(settings),
            runner,
            out,
            last_view: None,
        }
    }

    pub(crate) fn dispatch(&mut self, msg: Msg) -> io::Result<()> {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        self.runner.run(effects);
        let was_dirty = state.consume_dirty();
        self.state = state;
        if was_dirty {
            self.render()?;
        }
        Ok(())
    }

    pub(crate) fn render(&mut self) -> io::Result<()> {
        let view = self.state.view();
        for line in render::render(self.last_view.as_ref(), &view) {
            writeln!(self.out, "{line}")?;
        }
        self.out.flush()?;
        self.last_view = Some(view);
        Ok(())
    }

    pub(crate) fn write_line(&mut self, line: &str) -> io::Result<()> {
        writeln!(self.out, "{line}")?;
        self.out.flush()
    }

    /// No request in flight and no debounce pending.
    pub(crate) fn is_idle(&self) -> bool {
        !self.state.is_in_flight() && self.state.pending_debounce().is_none()
    }

    #[cfg(test)]
    fn view(&self) -> CoordinatorView {
        self.state.view()
    }

    #[cfg(test)]
    fn output(&self) -> &W {
        &self.out
    }
}
