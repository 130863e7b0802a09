use super::blink::BlinkScheduler;
use super::character::{Character, CharacterSpec};
use super::compositor::RigInputs;
use super::config::{AnimationTiming, ConfigError};
use super::gaze::Rect;
use super::interaction::{InteractionFlags, PartnerLook};
use super::peek::PeekScheduler;
use super::timer::Timers;
use glam::Vec2;
use rand::prelude::*;
use std::time::Duration;

/// Event value each timed process posts to the shared task queue.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Wake {
    Blink(Character),
    Peek,
    PartnerLook,
}

/// Owner of every timed process behind the characters.
///
/// All tasks live in one queue tied to this value: `unmount` (or drop)
/// cancels them, and nothing mutates afterwards.
pub struct Rig {
    timers: Timers<Wake>,
    blinks: Vec<(Character, BlinkScheduler<Wake>)>,
    peek: PeekScheduler<Wake>,
    partner: PartnerLook<Wake>,
    flags: InteractionFlags,
    now: Duration,
    mounted: bool,
}

fn stream_rng(seed: u64, stream: u64) -> StdRng {
    StdRng::seed_from_u64(seed ^ stream.wrapping_mul(0x9E37_79B9_7F4A_7C15))
}

impl Rig {
    pub fn mount(
        timing: AnimationTiming,
        cast: &[CharacterSpec; 4],
        seed: u64,
        now: Duration,
    ) -> Result<Self, ConfigError> {
        timing.validate()?;
        let mut timers = Timers::new();
        let mut blinks = cast
            .iter()
            .filter(|spec| spec.blinks())
            .map(|spec| {
                let c = spec.character;
                let rng = stream_rng(seed, c.index() as u64 + 1);
                let scheduler = BlinkScheduler::new(
                    timing.blink_interval,
                    timing.blink_duration,
                    rng,
                    Wake::Blink(c),
                );
                (c, scheduler)
            })
            .collect::<Vec<_>>();
        for (_, scheduler) in &mut blinks {
            scheduler.start(now, &mut timers);
        }
        let peek = PeekScheduler::new(
            timing.peek_interval,
            timing.peek_duration,
            timing.peek_rearm,
            stream_rng(seed, cast.len() as u64 + 1),
            Wake::Peek,
        );
        log::info!(
            "[rig] mounted: {} blinking characters, seed={:#x}",
            blinks.len(),
            seed
        );
        Ok(Self {
            timers,
            blinks,
            peek,
            partner: PartnerLook::new(timing.look_at_partner, Wake::PartnerLook),
            flags: InteractionFlags::default(),
            now,
            mounted: true,
        })
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn flags(&self) -> InteractionFlags {
        self.flags
    }

    pub fn pending_tasks(&self) -> usize {
        self.timers.len()
    }

    pub fn is_blinking(&self, character: Character) -> bool {
        self.blinks
            .iter()
            .any(|(c, s)| *c == character && s.is_blinking())
    }

    pub fn is_peeking(&self) -> bool {
        self.peek.is_peeking()
    }

    pub fn is_looking_at_partner(&self) -> bool {
        self.partner.is_active()
    }

    /// Fire every task due at or before `now`. Returns the number of visible changes.
    pub fn advance(&mut self, now: Duration) -> usize {
        if !self.mounted {
            return 0;
        }
        let now = now.max(self.now);
        let mut changes = 0;
        while let Some(fired) = self.timers.pop_due(now) {
            let changed = match fired.event {
                Wake::Blink(c) => match self.blinks.iter_mut().find(|(bc, _)| *bc == c) {
                    Some((_, s)) => s.on_wake(fired.handle, fired.due, &mut self.timers),
                    None => false,
                },
                Wake::Peek => self.peek.on_wake(fired.handle, fired.due, &mut self.timers),
                Wake::PartnerLook => self.partner.on_wake(fired.handle, fired.due),
            };
            if changed {
                changes += 1;
            }
        }
        self.now = now;
        changes
    }

    /// Catch up to `now`, then apply new form flags.
    pub fn set_flags(&mut self, flags: InteractionFlags, now: Duration) -> bool {
        if !self.mounted {
            return false;
        }
        self.advance(now);
        let now = self.now;
        let mut changed = flags != self.flags;
        self.flags = flags;
        changed |= self.partner.sync(flags.is_typing, now, &mut self.timers);
        changed |= self
            .peek
            .sync(flags.is_password_visible(), now, &mut self.timers);
        changed
    }

    /// Snapshot for the compositor. Measurements come from the host.
    pub fn inputs(
        &self,
        pointer: Vec2,
        bodies: [Option<Rect>; 4],
        eyes: [[Option<Rect>; 2]; 4],
    ) -> RigInputs {
        RigInputs {
            pointer,
            flags: self.flags,
            blinking: Character::ALL.map(|c| self.is_blinking(c)),
            peeking: self.is_peeking(),
            looking_at_partner: self.is_looking_at_partner(),
            bodies,
            eyes,
        }
    }

    pub fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        for (_, s) in &mut self.blinks {
            s.stop(&mut self.timers);
        }
        self.peek.stop(&mut self.timers);
        self.partner.stop(&mut self.timers);
        self.timers.clear();
        self.mounted = false;
        log::info!("[rig] unmounted at {:?}", self.now);
    }
}

impl Drop for Rig {
    fn drop(&mut self) {
        self.unmount();
    }
}
