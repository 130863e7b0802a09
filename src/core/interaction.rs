use super::character::CharacterSpec;
use super::gaze::GazeSource;
use super::timer::{TaskHandle, Timers};
use std::fmt::Debug;
use std::time::Duration;

/// Form-owned signals, pushed in by the host page.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InteractionFlags {
    pub is_typing: bool,
    pub password_len: usize,
    pub show_password: bool,
    pub confirm_password_len: usize,
    pub show_confirm_password: bool,
}

impl InteractionFlags {
    /// Some non-empty password field is shown in clear text.
    pub fn is_password_visible(&self) -> bool {
        (self.password_len > 0 && self.show_password)
            || (self.confirm_password_len > 0 && self.show_confirm_password)
    }

    /// Some non-empty password field is masked.
    pub fn is_password_hidden(&self) -> bool {
        (self.password_len > 0 && !self.show_password)
            || (self.confirm_password_len > 0 && !self.show_confirm_password)
    }

    /// Characters lean towards the form while the user types or guards a password.
    pub fn is_leaning_in(&self) -> bool {
        self.is_typing || self.is_password_hidden()
    }
}

/// Which override drives the eyes this frame, in priority order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InteractionMode {
    PasswordRevealed { peeking: bool },
    LookingAtPartner,
    Tracking,
}

pub fn derive_mode(
    flags: &InteractionFlags,
    peeking: bool,
    looking_at_partner: bool,
) -> InteractionMode {
    if flags.is_password_visible() {
        InteractionMode::PasswordRevealed { peeking }
    } else if looking_at_partner {
        InteractionMode::LookingAtPartner
    } else {
        InteractionMode::Tracking
    }
}

impl InteractionMode {
    pub fn gaze_source(&self, spec: &CharacterSpec) -> GazeSource {
        match *self {
            InteractionMode::PasswordRevealed { peeking } => {
                let forced = match spec.forced.peeking {
                    Some(peek) if peeking => peek,
                    _ => spec.forced.revealed,
                };
                GazeSource::Forced(forced)
            }
            InteractionMode::LookingAtPartner => spec
                .forced
                .partner
                .map_or(GazeSource::Tracking, GazeSource::Forced),
            InteractionMode::Tracking => GazeSource::Tracking,
        }
    }
}

/// Short glance between the two tall characters after typing starts.
///
/// Each rising edge of `is_typing` (re)starts the window; the glance lasts the
/// whole window even if typing stops before it runs out.
#[derive(Clone, Debug)]
pub struct PartnerLook<E> {
    window: Duration,
    wake: E,
    was_typing: bool,
    active: bool,
    pending: Option<TaskHandle>,
}

impl<E: Copy + Debug> PartnerLook<E> {
    pub fn new(window: Duration, wake: E) -> Self {
        Self {
            window,
            wake,
            was_typing: false,
            active: false,
            pending: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn pending(&self) -> Option<TaskHandle> {
        self.pending
    }

    /// Returns whether the glance state changed.
    pub fn sync(&mut self, is_typing: bool, now: Duration, timers: &mut Timers<E>) -> bool {
        let rising = is_typing && !self.was_typing;
        self.was_typing = is_typing;
        if !rising {
            return false;
        }
        if let Some(handle) = self.pending.take() {
            timers.cancel(handle);
        }
        self.pending = Some(timers.schedule(now, self.window, self.wake));
        let changed = !self.active;
        self.active = true;
        log::debug!("[partner] glance until {:?}", now + self.window);
        changed
    }

    pub fn on_wake(&mut self, handle: TaskHandle, at: Duration) -> bool {
        if self.pending != Some(handle) {
            log::warn!("[partner] ignoring stale wake {:?}", handle);
            return false;
        }
        self.pending = None;
        self.active = false;
        log::debug!("[partner] glance over at {:?}", at);
        true
    }

    pub fn stop(&mut self, timers: &mut Timers<E>) {
        if let Some(handle) = self.pending.take() {
            timers.cancel(handle);
        }
        self.active = false;
        self.was_typing = false;
    }
}
