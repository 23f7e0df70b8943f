//! Repeating re-scan timer with early wake-up on DOM mutations.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Notify;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RescanCause {
    Interval,
    Mutation,
}

/// Raised by whatever observes the page for inserted nodes or `src` changes.
#[derive(Debug, Clone, Default)]
pub struct MutationSignal(Arc<Notify>);

impl MutationSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notify(&self) {
        self.0.notify_one();
    }
}

/// Running re-scan loop. Dropping the handle leaves the loop running;
/// call [`RescanHandle::cancel`] to stop it.
#[derive(Debug)]
pub struct RescanHandle {
    task: JoinHandle<()>,
}

impl RescanHandle {
    pub fn cancel(self) {
        self.task.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

/// Calls `on_tick` immediately, then every `interval`, and additionally
/// whenever `signal` fires. Must be called within a tokio runtime.
pub fn spawn_rescan<F>(interval: Duration, signal: MutationSignal, mut on_tick: F) -> RescanHandle
where
    F: FnMut(RescanCause) + Send + 'static,
{
    let task = tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            tokio::select! {
                _ = ticker.tick() => on_tick(RescanCause::Interval),
                _ = signal.0.notified() => on_tick(RescanCause::Mutation),
            }
        }
    });
    RescanHandle { task }
}
