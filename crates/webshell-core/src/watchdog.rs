//! Single-slot cancellable delayed callback.
//!
//! Scheduling replaces whatever was pending. Every armed task carries the
//! generation it was armed with and a weak reference to the timer's token;
//! it only calls through if the timer still exists and has not been
//! cancelled or re-armed since. Cancellation therefore wins even against a
//! task the scheduler has already dequeued for the current tick.

use std::cell::Cell;
use std::rc::Rc;

use crate::scheduler::{Scheduler, TaskId};

/// A cancellable one-shot timer on the shared [`Scheduler`].
#[derive(Debug)]
pub struct WatchdogTimer {
    scheduler: Scheduler,
    /// Generation of the armed task, `None` when idle.
    armed: Rc<Cell<Option<u64>>>,
    generation: u64,
    task: Option<TaskId>,
}

impl WatchdogTimer {
    pub fn new(scheduler: Scheduler) -> Self {
        Self {
            scheduler,
            armed: Rc::new(Cell::new(None)),
            generation: 0,
            task: None,
        }
    }

    /// Run `callback` after `delay_ms`, replacing any pending callback.
    pub fn schedule(&mut self, delay_ms: u64, callback: impl FnOnce() + 'static) {
        self.cancel();
        self.generation = self.generation.wrapping_add(1);
        let generation = self.generation;
        self.armed.set(Some(generation));

        let token = Rc::downgrade(&self.armed);
        let id = self.scheduler.post_delayed(delay_ms, move || {
            let Some(armed) = token.upgrade() else {
                return;
            };
            if armed.get() != Some(generation) {
                return;
            }
            armed.set(None);
            callback();
        });
        self.task = Some(id);
    }

    /// Disarm the pending callback. Returns `true` if one was pending.
    pub fn cancel(&mut self) -> bool {
        let was_armed = self.armed.replace(None).is_some();
        if let Some(id) = self.task.take() {
            self.scheduler.remove(id);
        }
        was_armed
    }

    /// Whether a callback is armed and has not fired yet.
    pub fn is_pending(&self) -> bool {
        self.armed.get().is_some()
    }
}

impl Drop for WatchdogTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}
