//! Coalescing of rapid successive triggers.
//!
//! The debouncer is driven by an explicit clock: callers pass `now` to
//! [`Debouncer::trigger`] and [`Debouncer::poll`], and an event loop sleeps
//! until [`Debouncer::deadline`]. This keeps it usable from a single-threaded
//! host and deterministic under test.
//!
//! [`debounce`] wraps the same logic in a tokio task for hosts that would
//! rather hand over a callback.

use std::time::{Duration, Instant};

use tokio::{sync::mpsc, task::JoinHandle};

/// Default delay between the last change and the recomputation it triggers.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

#[derive(Debug)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<(Instant, T)>,
}

impl<T> Debouncer<T> {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Replace any pending call with `args` and restart the timer.
    pub fn trigger(&mut self, args: T, now: Instant) {
        self.pending = Some((now + self.delay, args));
    }

    /// Take the pending call if its deadline has been reached.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match &self.pending {
            Some((deadline, _)) if *deadline <= now => self.pending.take().map(|(_, args)| args),
            _ => None,
        }
    }

    /// Drop the pending call without running it.
    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|(_, args)| args)
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(deadline, _)| *deadline)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

impl<T> Default for Debouncer<T> {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

/// Handle to a debounced callback running on the tokio runtime.
///
/// Dropping the handle stops the task; a pending call is discarded.
pub struct DebouncedTrigger<T> {
    tx: mpsc::UnboundedSender<T>,
    task: JoinHandle<()>,
}

impl<T> DebouncedTrigger<T> {
    /// Restart the timer; only the last `args` in a quiet window reach the callback.
    pub fn trigger(&self, args: T) {
        if self.tx.send(args).is_err() {
            log::debug!("Debounce task has stopped; trigger ignored");
        }
    }
}

impl<T> Drop for DebouncedTrigger<T> {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Spawn a task that calls `f` once `delay` has passed since the last trigger.
///
/// Must be called from within a tokio runtime.
pub fn debounce<T, F>(delay: Duration, mut f: F) -> DebouncedTrigger<T>
where
    T: Send + 'static,
    F: FnMut(T) + Send + 'static,
{
    let (tx, mut rx) = mpsc::unbounded_channel::<T>();
    let task = tokio::spawn(async move {
        let mut debouncer = Debouncer::new(delay);
        loop {
            let deadline = debouncer.deadline();
            tokio::select! {
                received = rx.recv() => match received {
                    Some(args) => debouncer.trigger(args, now()),
                    None => break,
                },
                _ = sleep_until(deadline) => {
                    if let Some(args) = debouncer.poll(now()) {
                        f(args);
                    }
                }
            }
        }
    });
    DebouncedTrigger { tx, task }
}

/// Current time on the tokio clock, so a paused test clock applies.
fn now() -> Instant {
    tokio::time::Instant::now().into_std()
}

/// Sleep until `deadline`, or forever when there is none.
pub(crate) async fn sleep_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(tokio::time::Instant::from_std(deadline)).await,
        None => std::future::pending().await,
    }
}
