//! Cancellable elapsed-time tick owned by one session.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior, interval_at};
use tracing::{debug, instrument, trace};

static NEXT_SESSION_ID: AtomicU64 = AtomicU64::new(1);

/// Allocates an identifier for a new session's tick stream.
pub fn next_session_id() -> u64 {
    NEXT_SESSION_ID.fetch_add(1, Ordering::Relaxed)
}

/// One tick of a session's timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickEvent {
    /// Session the tick belongs to. Ticks for other sessions are ignored.
    pub session_id: u64,
}

/// Handle to a running tick task.
///
/// The task sends one [`TickEvent`] per period until the handle is stopped or
/// dropped. Stopping is idempotent and dropping always stops, so every path
/// that ends a session releases its tick.
#[derive(Debug)]
pub struct TickHandle {
    session_id: u64,
    task: Option<JoinHandle<()>>,
}

impl TickHandle {
    /// Spawns the tick task. The first tick fires one `period` from now.
    #[instrument(skip(events))]
    pub fn start(session_id: u64, period: Duration, events: UnboundedSender<TickEvent>) -> Self {
        debug!("Starting tick");
        let task = tokio::spawn(async move {
            let mut interval = interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                trace!(session_id, "Tick");
                if events.send(TickEvent { session_id }).is_err() {
                    debug!(session_id, "Tick receiver closed");
                    break;
                }
            }
        });
        Self {
            session_id,
            task: Some(task),
        }
    }

    /// Session this tick belongs to.
    pub fn session_id(&self) -> u64 {
        self.session_id
    }

    /// Returns true until the tick has been stopped.
    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    /// Stops the tick. Calling again has no effect.
    #[instrument(skip(self), fields(session_id = self.session_id))]
    pub fn stop(&mut self) {
        if let Some(task) = self.task.take() {
            debug!("Stopping tick");
            task.abort();
        }
    }
}

impl Drop for TickHandle {
    fn drop(&mut self) {
        self.stop();
    }
}
