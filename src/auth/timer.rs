//! Single-slot session expiry timer.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::task::JoinHandle;

/// Cheaply cloneable handle to the single pending expiry timer.
///
/// At most one timer is pending per store instance: arming a new one
/// implicitly cancels the previous. Cancellation is best-effort; a fire
/// racing a cancel may still invoke the callback, which downstream
/// handling (a spurious logout) tolerates.
///
/// `schedule` must be called from within a Tokio runtime.
#[derive(Clone, Default)]
pub struct SessionTimer {
    inner: Arc<Mutex<TimerInner>>,
}

#[derive(Default)]
struct TimerInner {
    pending: Option<JoinHandle<()>>,
    scheduled: Option<Duration>,
    /// Incremented per arm so a firing task only disarms itself, never
    /// a successor armed after its sleep completed.
    generation: u64,
}

impl SessionTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm the timer: after `duration`, invoke `on_fire` exactly once
    /// unless cancelled first. Replaces any pending timer.
    pub fn schedule(&self, duration: Duration, on_fire: impl FnOnce() + Send + 'static) {
        let mut inner = self.inner.lock();
        if let Some(handle) = inner.pending.take() {
            handle.abort();
        }
        inner.generation += 1;
        let generation = inner.generation;

        let shared = Arc::clone(&self.inner);
        inner.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(duration).await;
            {
                let mut inner = shared.lock();
                if inner.generation == generation {
                    inner.pending = None;
                    inner.scheduled = None;
                }
            }
            on_fire();
        }));
        inner.scheduled = Some(duration);

        tracing::debug!(duration_ms = duration.as_millis() as u64, "expiry timer armed");
    }

    /// Disarm any pending timer. No-op when idle.
    pub fn cancel(&self) {
        let mut inner = self.inner.lock();
        if let Some(handle) = inner.pending.take() {
            handle.abort();
            tracing::debug!("expiry timer cancelled");
        }
        inner.scheduled = None;
    }

    /// Duration the pending timer was armed with, if one is pending.
    pub fn scheduled_duration(&self) -> Option<Duration> {
        self.inner.lock().scheduled
    }

    /// True while a timer is armed and has not fired or been cancelled.
    pub fn is_armed(&self) -> bool {
        self.inner.lock().pending.is_some()
    }
}
