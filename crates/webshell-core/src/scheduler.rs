//! Single-threaded deferred task queue.
//!
//! The host owns one [`Scheduler`] per UI thread and drives it from its
//! event loop with [`Scheduler::advance`]. Handles are cheap clones sharing
//! the same queue. Tasks run in deadline order; tasks with equal deadlines
//! run in the order they were posted.
//!
//! No borrow of the queue is held while a task runs, so tasks may post or
//! remove other tasks.

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::rc::Rc;

/// A deferred unit of work.
pub type Task = Box<dyn FnOnce()>;

/// Identifies a posted task for later removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(u64);

#[derive(Default)]
struct Inner {
    now_ms: u64,
    next_id: u64,
    /// Keyed by `(deadline, id)` so iteration order is execution order.
    queue: BTreeMap<(u64, TaskId), Task>,
    /// Deadline of every queued task, for removal by id.
    deadlines: HashMap<TaskId, u64>,
}

/// Handle to the UI-thread scheduler.
#[derive(Clone, Default)]
pub struct Scheduler {
    inner: Rc<RefCell<Inner>>,
}

impl fmt::Debug for Scheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Scheduler")
            .field("now_ms", &inner.now_ms)
            .field("pending", &inner.queue.len())
            .finish()
    }
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current scheduler time in milliseconds.
    pub fn now_ms(&self) -> u64 {
        self.inner.borrow().now_ms
    }

    /// Number of tasks waiting to run.
    pub fn pending(&self) -> usize {
        self.inner.borrow().queue.len()
    }

    /// Deadline of the next task, if any.
    pub fn next_deadline(&self) -> Option<u64> {
        self.inner
            .borrow()
            .queue
            .keys()
            .next()
            .map(|&(deadline, _)| deadline)
    }

    /// Run `task` once `delay_ms` has elapsed.
    pub fn post_delayed(&self, delay_ms: u64, task: impl FnOnce() + 'static) -> TaskId {
        let mut inner = self.inner.borrow_mut();
        let id = TaskId(inner.next_id);
        inner.next_id += 1;
        let deadline = inner.now_ms.saturating_add(delay_ms);
        inner.queue.insert((deadline, id), Box::new(task));
        inner.deadlines.insert(id, deadline);
        id
    }

    /// Remove a task that has not run yet. Returns `false` if it already
    /// ran or was removed.
    pub fn remove(&self, id: TaskId) -> bool {
        let removed = {
            let mut inner = self.inner.borrow_mut();
            inner
                .deadlines
                .remove(&id)
                .and_then(|deadline| inner.queue.remove(&(deadline, id)))
        };
        // Dropped outside the borrow: captured state may touch the scheduler.
        removed.is_some()
    }

    /// Move time forward by `dt_ms`, running every task that falls due.
    /// Returns the number of tasks run.
    pub fn advance(&self, dt_ms: u64) -> usize {
        let target = self.now_ms().saturating_add(dt_ms);
        let mut ran = 0;
        loop {
            let task = {
                let mut inner = self.inner.borrow_mut();
                let next = inner.queue.keys().next().copied();
                match next {
                    Some(key) if key.0 <= target => {
                        inner.now_ms = inner.now_ms.max(key.0);
                        inner.deadlines.remove(&key.1);
                        inner.queue.remove(&key)
                    },
                    _ => None,
                }
            };
            let Some(task) = task else {
                break;
            };
            task();
            ran += 1;
        }
        self.inner.borrow_mut().now_ms = target;
        ran
    }
}
