use std::collections::HashMap;
use std::sync::mpsc;
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use crate::{EngineEvent, TimerId};

/// One-shot timers keyed by id, each a sleeping task on the engine runtime.
#[derive(Default)]
pub(crate) struct TimerSet {
    pending: HashMap<TimerId, JoinHandle<()>>,
}

impl TimerSet {
    /// Arms `timer_id`. Re-arming an id that is still pending replaces it.
    pub(crate) fn arm(
        &mut self,
        runtime: &Handle,
        timer_id: TimerId,
        delay: Duration,
        event_tx: mpsc::Sender<EngineEvent>,
    ) {
        self.prune();
        let task = runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = event_tx.send(EngineEvent::TimerFired { timer_id });
        });
        if let Some(previous) = self.pending.insert(timer_id, task) {
            previous.abort();
        }
    }

    /// Returns true if a pending timer was aborted.
    pub(crate) fn cancel(&mut self, timer_id: TimerId) -> bool {
        match self.pending.remove(&timer_id) {
            Some(task) => {
                let was_pending = !task.is_finished();
                task.abort();
                was_pending
            }
            None => false,
        }
    }

    pub(crate) fn cancel_all(&mut self) {
        for (_, task) in self.pending.drain() {
            task.abort();
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.pending.len()
    }

    fn prune(&mut self) {
        self.pending.retain(|_, task| !task.is_finished());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn runtime() -> tokio::runtime::Runtime {
        tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_time()
            .build()
            .unwrap()
    }

    #[test]
    fn armed_timer_fires_once() {
        let runtime = runtime();
        let (tx, rx) = mpsc::channel();
        let mut timers = TimerSet::default();

        timers.arm(runtime.handle(), 4, Duration::from_millis(10), tx);

        let event = rx.recv_timeout(Duration::from_secs(2)).unwrap();
        assert_eq!(event, EngineEvent::TimerFired { timer_id: 4 });
        assert!(rx.recv_timeout(Duration::from_millis(50)).is_err());
    }

    #[test]
    fn cancelled_timer_never_fires() {
        let runtime = runtime();
        let (tx, rx) = mpsc::channel();
        let mut timers = TimerSet::default();

        timers.arm(runtime.handle(), 1, Duration::from_millis(100), tx);
        assert!(timers.cancel(1));
        assert!(!timers.cancel(1));

        assert!(rx.recv_timeout(Duration::from_millis(300)).is_err());
        assert_eq!(timers.len(), 0);
    }

    #[test]
    fn finished_timers_are_pruned_on_next_arm() {
        let runtime = runtime();
        let (tx, rx) = mpsc::channel();
        let mut timers = TimerSet::default();

        timers.arm(runtime.handle(), 1, Duration::from_millis(5), tx.clone());
        rx.recv_timeout(Duration::from_secs(2)).unwrap();
        // Give the task a moment to be marked finished after sending.
        std::thread::sleep(Duration::from_millis(20));

        timers.arm(runtime.handle(), 2, Duration::from_secs(60), tx);
        assert_eq!(timers.len(), 1);
        timers.cancel_all();
        assert_eq!(timers.len(), 0);
    }
}
