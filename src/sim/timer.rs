//! Tick counting primitives
//!
//! Durations are converted to a whole number of ticks once, at construction,
//! using the fixed [`TICKS_PER_SECOND`]. Everything after that is integer
//! counting, so timed behaviour only stays correct while the host drives
//! the simulation at that rate.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::consts::TICKS_PER_SECOND;

/// Number of whole ticks covered by a duration
pub fn duration_to_ticks(duration: Duration) -> u32 {
    let ticks = duration.as_millis() * u128::from(TICKS_PER_SECOND) / 1000;
    u32::try_from(ticks).unwrap_or(u32::MAX)
}

/// Counts ticks up to a target and saturates there
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timer {
    elapsed: u32,
    target: u32,
}

impl Timer {
    /// Create a timer that becomes ready after `duration`.
    ///
    /// # Panics
    ///
    /// Panics if `duration` is shorter than one tick. A zero-length timer
    /// has no meaningful completion fraction.
    pub fn new(duration: Duration) -> Self {
        Self {
            elapsed: 0,
            target: Self::checked_target(duration),
        }
    }

    /// Create a timer that is already ready, for cooldowns that should not
    /// delay the first action
    pub fn ready(duration: Duration) -> Self {
        let mut timer = Self::new(duration);
        timer.elapsed = timer.target;
        timer
    }

    fn checked_target(duration: Duration) -> u32 {
        let target = duration_to_ticks(duration);
        assert!(
            target > 0,
            "timer duration {duration:?} is shorter than one tick at {TICKS_PER_SECOND} Hz"
        );
        target
    }

    /// Advance by one tick, never past the target
    pub fn update(&mut self) {
        if self.elapsed < self.target {
            self.elapsed += 1;
        }
    }

    pub fn is_ready(&self) -> bool {
        self.elapsed >= self.target
    }

    /// Restart from zero with the same target
    pub fn reset(&mut self) {
        self.elapsed = 0;
    }

    /// Restart from zero with a new target.
    ///
    /// # Panics
    ///
    /// Panics under the same condition as [`Timer::new`].
    pub fn reset_target(&mut self, duration: Duration) {
        self.target = Self::checked_target(duration);
        self.elapsed = 0;
    }

    /// Hold the timer at ready
    pub fn finish(&mut self) {
        self.elapsed = self.target;
    }

    pub fn elapsed(&self) -> u32 {
        self.elapsed
    }

    pub fn target(&self) -> u32 {
        self.target
    }

    /// Completion in 0..=1
    pub fn percent_complete(&self) -> f32 {
        self.elapsed as f32 / self.target as f32
    }
}

/// Monotonic identifier source for dynamically created entities
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Sequence {
    current: u64,
}

impl Sequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hand out the current value, then advance
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> u64 {
        let id = self.current;
        self.current += 1;
        id
    }
}
