use smallvec::SmallVec;
use std::time::Duration;

// Cancellable single-shot tasks on the rig's virtual clock.
//
// Time is a `Duration` since the rig was mounted. Tasks fire from `pop_due` in
// deadline order; ties keep schedule order. Each owner holds on to the
// `TaskHandle` it was given and drops fired tasks whose handle it no longer
// owns, so a cancelled or superseded task can never mutate state.

/// Opaque handle identifying one scheduled task.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TaskHandle(u64);

#[derive(Clone, Debug)]
struct Pending<E> {
    handle: TaskHandle,
    due: Duration,
    event: E,
}

/// A task that reached its deadline.
#[derive(Clone, Debug, PartialEq)]
pub struct Fired<E> {
    pub handle: TaskHandle,
    pub due: Duration,
    pub event: E,
}

#[derive(Clone, Debug)]
pub struct Timers<E> {
    next_id: u64,
    pending: SmallVec<[Pending<E>; 8]>,
}

impl<E> Default for Timers<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Timers<E> {
    pub fn new() -> Self {
        Self {
            next_id: 0,
            pending: SmallVec::new(),
        }
    }

    /// Schedule `event` to fire `delay` after `now`.
    pub fn schedule(&mut self, now: Duration, delay: Duration, event: E) -> TaskHandle {
        let handle = TaskHandle(self.next_id);
        self.next_id += 1;
        self.pending.push(Pending {
            handle,
            due: now + delay,
            event,
        });
        handle
    }

    /// Returns false when the task already fired or was cancelled.
    pub fn cancel(&mut self, handle: TaskHandle) -> bool {
        match self.pending.iter().position(|p| p.handle == handle) {
            Some(i) => {
                self.pending.remove(i);
                true
            }
            None => false,
        }
    }

    pub fn is_pending(&self, handle: TaskHandle) -> bool {
        self.pending.iter().any(|p| p.handle == handle)
    }

    pub fn next_deadline(&self) -> Option<Duration> {
        self.pending.iter().map(|p| p.due).min()
    }

    /// Remove and return the earliest task whose deadline is at or before `now`.
    pub fn pop_due(&mut self, now: Duration) -> Option<Fired<E>> {
        let idx = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, p)| p.due <= now)
            .min_by_key(|(_, p)| (p.due, p.handle.0))
            .map(|(i, _)| i)?;
        let p = self.pending.remove(idx);
        Some(Fired {
            handle: p.handle,
            due: p.due,
            event: p.event,
        })
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
