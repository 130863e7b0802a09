use super::constants::*;
use rand::Rng;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{name}: interval min {min:?} is greater than max {max:?}")]
    InvertedInterval {
        name: &'static str,
        min: Duration,
        max: Duration,
    },
    #[error("{name} must be non-zero")]
    ZeroDuration { name: &'static str },
}

/// Window from which a random delay is drawn, `[min, max)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IntervalRange {
    pub min: Duration,
    pub max: Duration,
}

impl IntervalRange {
    pub const fn from_millis(min: u64, max: u64) -> Self {
        Self {
            min: Duration::from_millis(min),
            max: Duration::from_millis(max),
        }
    }

    /// Uniform draw in `[min, max)`; a degenerate window always yields `min`.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Duration {
        if self.max <= self.min {
            return self.min;
        }
        let lo = self.min.as_micros() as u64;
        let hi = self.max.as_micros() as u64;
        Duration::from_micros(rng.gen_range(lo..hi))
    }

    fn validate(&self, name: &'static str) -> Result<(), ConfigError> {
        if self.min > self.max {
            return Err(ConfigError::InvertedInterval {
                name,
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }
}

/// What the peek scheduler does once a peek has finished.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PeekRearm {
    /// Draw a fresh delay and peek again for as long as the password stays visible.
    #[default]
    Continuous,
    /// One peek per visibility window.
    Once,
}

/// Smoothing descriptor shared by all animated style properties.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Transition {
    pub duration: Duration,
    pub easing: &'static str,
}

impl Transition {
    pub fn css(&self) -> String {
        format!("all {}s {}", self.duration.as_secs_f32(), self.easing)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AnimationTiming {
    pub blink_interval: IntervalRange,
    pub blink_duration: Duration,
    pub peek_interval: IntervalRange,
    pub peek_duration: Duration,
    pub peek_rearm: PeekRearm,
    pub look_at_partner: Duration,
    pub transition: Transition,
}

impl Default for AnimationTiming {
    fn default() -> Self {
        Self {
            blink_interval: IntervalRange::from_millis(BLINK_INTERVAL_MIN_MS, BLINK_INTERVAL_MAX_MS),
            blink_duration: Duration::from_millis(BLINK_DURATION_MS),
            peek_interval: IntervalRange::from_millis(PEEK_INTERVAL_MIN_MS, PEEK_INTERVAL_MAX_MS),
            peek_duration: Duration::from_millis(PEEK_DURATION_MS),
            peek_rearm: PeekRearm::default(),
            look_at_partner: Duration::from_millis(LOOK_AT_PARTNER_MS),
            transition: Transition {
                duration: Duration::from_millis(TRANSITION_DURATION_MS),
                easing: TRANSITION_EASING,
            },
        }
    }
}

impl AnimationTiming {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.blink_interval.validate("blink_interval")?;
        self.peek_interval.validate("peek_interval")?;
        // Looping tasks must advance the clock or a single tick never drains.
        if self.blink_duration.is_zero() {
            return Err(ConfigError::ZeroDuration {
                name: "blink_duration",
            });
        }
        if self.peek_duration.is_zero() {
            return Err(ConfigError::ZeroDuration {
                name: "peek_duration",
            });
        }
        if self.look_at_partner.is_zero() {
            return Err(ConfigError::ZeroDuration {
                name: "look_at_partner",
            });
        }
        Ok(())
    }
}
