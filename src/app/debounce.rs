use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use tokio::task::JoinHandle;

/// Coalesces writes arriving within `delay` of each other into one commit of
/// the most recent value.
///
/// The gate holds one pending value and one timer. Each `schedule` replaces
/// both; the timer fires `delay` after the last write and hands the pending
/// value to the commit callback. Timers run on tokio, so a paused runtime
/// clock drives the gate deterministically.
pub struct DebounceGate<T> {
    delay: Duration,
    slot: Arc<Mutex<Slot<T>>>,
    commit: Arc<dyn Fn(T) + Send + Sync>,
}

struct Slot<T> {
    pending: Option<T>,
    timer: Option<JoinHandle<()>>,
    generation: u64,
}

impl<T> Clone for DebounceGate<T> {
    fn clone(&self) -> Self {
        Self {
            delay: self.delay,
            slot: self.slot.clone(),
            commit: self.commit.clone(),
        }
    }
}

impl<T> DebounceGate<T>
where
    T: Send + 'static,
{
    pub fn new<F>(delay: Duration, commit: F) -> Self
    where
        F: Fn(T) + Send + Sync + 'static,
    {
        Self {
            delay,
            slot: Arc::new(Mutex::new(Slot {
                pending: None,
                timer: None,
                generation: 0,
            })),
            commit: Arc::new(commit),
        }
    }

    /// Replaces the pending value and restarts the timer.
    pub fn schedule(&self, value: T) {
        let mut slot = lock(&self.slot);
        slot.pending = Some(value);
        if let Some(timer) = slot.timer.take() {
            timer.abort();
        }
        slot.generation += 1;

        let generation = slot.generation;
        let delay = self.delay;
        let shared = self.slot.clone();
        let commit = self.commit.clone();
        slot.timer = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let value = {
                let mut slot = lock(&shared);
                // a newer write raced the abort
                if slot.generation != generation {
                    return;
                }
                slot.timer = None;
                slot.pending.take()
            };
            if let Some(value) = value {
                commit(value);
            }
        }));
    }

    pub fn is_pending(&self) -> bool {
        lock(&self.slot).pending.is_some()
    }

    /// Commits the pending value now, if any. Returns whether a commit happened.
    pub fn flush(&self) -> bool {
        let value = {
            let mut slot = lock(&self.slot);
            slot.generation += 1;
            if let Some(timer) = slot.timer.take() {
                timer.abort();
            }
            slot.pending.take()
        };
        match value {
            Some(value) => {
                (self.commit)(value);
                true
            }
            None => false,
        }
    }

    /// Drops the pending value without committing it.
    pub fn cancel(&self) {
        let mut slot = lock(&self.slot);
        slot.generation += 1;
        slot.pending = None;
        if let Some(timer) = slot.timer.take() {
            timer.abort();
        }
    }
}

pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
