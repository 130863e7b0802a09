use super::config::IntervalRange;
use super::timer::{TaskHandle, Timers};
use rand::rngs::StdRng;
use std::fmt::Debug;
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlinkPhase {
    Stopped,
    Idle,
    Blinking,
}

/// Endless `Idle -> Blinking -> Idle` loop for one character.
///
/// Every idle period is redrawn from the scheduler's own RNG, so two
/// schedulers seeded differently never fall into step. `wake` is the event
/// value this scheduler posts to the shared task queue; the rig routes it back
/// through [`BlinkScheduler::on_wake`].
#[derive(Clone, Debug)]
pub struct BlinkScheduler<E> {
    interval: IntervalRange,
    duration: Duration,
    rng: StdRng,
    wake: E,
    phase: BlinkPhase,
    pending: Option<TaskHandle>,
}

impl<E: Copy + Debug> BlinkScheduler<E> {
    pub fn new(interval: IntervalRange, duration: Duration, rng: StdRng, wake: E) -> Self {
        Self {
            interval,
            duration,
            rng,
            wake,
            phase: BlinkPhase::Stopped,
            pending: None,
        }
    }

    pub fn phase(&self) -> BlinkPhase {
        self.phase
    }

    pub fn is_blinking(&self) -> bool {
        self.phase == BlinkPhase::Blinking
    }

    pub fn pending(&self) -> Option<TaskHandle> {
        self.pending
    }

    pub fn start(&mut self, now: Duration, timers: &mut Timers<E>) {
        if self.phase != BlinkPhase::Stopped {
            return;
        }
        self.enter_idle(now, timers);
    }

    /// Advance the loop for a fired task. Returns whether the visible state changed.
    pub fn on_wake(&mut self, handle: TaskHandle, at: Duration, timers: &mut Timers<E>) -> bool {
        if self.pending != Some(handle) {
            log::warn!("[blink] {:?}: ignoring stale wake {:?}", self.wake, handle);
            return false;
        }
        self.pending = None;
        match self.phase {
            BlinkPhase::Idle => {
                self.phase = BlinkPhase::Blinking;
                self.pending = Some(timers.schedule(at, self.duration, self.wake));
                log::debug!("[blink] {:?} closed at {:?}", self.wake, at);
                true
            }
            BlinkPhase::Blinking => {
                self.enter_idle(at, timers);
                log::debug!("[blink] {:?} opened at {:?}", self.wake, at);
                true
            }
            BlinkPhase::Stopped => false,
        }
    }

    /// Cancel the pending task and leave the eye open.
    pub fn stop(&mut self, timers: &mut Timers<E>) {
        if let Some(handle) = self.pending.take() {
            timers.cancel(handle);
        }
        self.phase = BlinkPhase::Stopped;
    }

    fn enter_idle(&mut self, now: Duration, timers: &mut Timers<E>) {
        let delay = self.interval.sample(&mut self.rng);
        self.phase = BlinkPhase::Idle;
        self.pending = Some(timers.schedule(now, delay, self.wake));
    }
}
