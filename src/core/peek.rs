use super::config::{IntervalRange, PeekRearm};
use super::timer::{TaskHandle, Timers};
use rand::rngs::StdRng;
use std::fmt::Debug;
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PeekPhase {
    /// Password hidden or empty; nothing scheduled.
    Inactive,
    /// Waiting out the random delay before the next peek.
    Armed,
    Peeking,
    /// Visible, but the single peek of this window has been used.
    Spent,
}

/// Glances at a revealed password field, only while it stays revealed.
#[derive(Clone, Debug)]
pub struct PeekScheduler<E> {
    interval: IntervalRange,
    duration: Duration,
    rearm: PeekRearm,
    rng: StdRng,
    wake: E,
    phase: PeekPhase,
    pending: Option<TaskHandle>,
}

impl<E: Copy + Debug> PeekScheduler<E> {
    pub fn new(
        interval: IntervalRange,
        duration: Duration,
        rearm: PeekRearm,
        rng: StdRng,
        wake: E,
    ) -> Self {
        Self {
            interval,
            duration,
            rearm,
            rng,
            wake,
            phase: PeekPhase::Inactive,
            pending: None,
        }
    }

    pub fn phase(&self) -> PeekPhase {
        self.phase
    }

    pub fn is_peeking(&self) -> bool {
        self.phase == PeekPhase::Peeking
    }

    pub fn pending(&self) -> Option<TaskHandle> {
        self.pending
    }

    /// Follow the password-visible flag. Activation arms a peek; deactivation
    /// cancels whatever is pending and clears the peek immediately.
    pub fn sync(&mut self, visible: bool, now: Duration, timers: &mut Timers<E>) -> bool {
        match (visible, self.phase) {
            (true, PeekPhase::Inactive) => {
                self.arm(now, timers);
                false
            }
            (false, PeekPhase::Inactive) | (true, _) => false,
            (false, phase) => {
                self.cancel_pending(timers);
                self.phase = PeekPhase::Inactive;
                log::debug!("[peek] deactivated at {:?}", now);
                phase == PeekPhase::Peeking
            }
        }
    }

    /// Returns whether the peeking flag changed.
    pub fn on_wake(&mut self, handle: TaskHandle, at: Duration, timers: &mut Timers<E>) -> bool {
        if self.pending != Some(handle) {
            log::warn!("[peek] ignoring stale wake {:?}", handle);
            return false;
        }
        self.pending = None;
        match self.phase {
            PeekPhase::Armed => {
                self.phase = PeekPhase::Peeking;
                self.pending = Some(timers.schedule(at, self.duration, self.wake));
                log::debug!("[peek] start at {:?}", at);
                true
            }
            PeekPhase::Peeking => {
                match self.rearm {
                    PeekRearm::Continuous => self.arm(at, timers),
                    PeekRearm::Once => self.phase = PeekPhase::Spent,
                }
                log::debug!("[peek] end at {:?}", at);
                true
            }
            PeekPhase::Inactive | PeekPhase::Spent => false,
        }
    }

    pub fn stop(&mut self, timers: &mut Timers<E>) {
        self.cancel_pending(timers);
        self.phase = PeekPhase::Inactive;
    }

    fn arm(&mut self, now: Duration, timers: &mut Timers<E>) {
        let delay = self.interval.sample(&mut self.rng);
        self.phase = PeekPhase::Armed;
        self.pending = Some(timers.schedule(now, delay, self.wake));
    }

    fn cancel_pending(&mut self, timers: &mut Timers<E>) {
        if let Some(handle) = self.pending.take() {
            timers.cancel(handle);
        }
    }
}
