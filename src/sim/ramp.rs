//! Difficulty ramp
//!
//! A repeating spawn timer whose interval shrinks by a fixed decay after every
//! firing, never dropping below its floor.

use serde::{Deserialize, Serialize};

use crate::consts::MIN_SPAWN_FLOOR_MS;
use crate::tuning::Tuning;

/// Adaptive repeating timer driving spawn cycles
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpawnTimer {
    /// Interval the session started with
    pub initial_ms: f32,
    /// Current interval until the next firing after this one
    pub interval_ms: f32,
    pub floor_ms: f32,
    pub decay_ms: f32,
    /// Time accumulated toward the next firing
    elapsed_ms: f32,
    /// Total firings since the session started
    pub cycles: u32,
}

impl SpawnTimer {
    /// Out-of-range values are clamped: the interval and floor never go below
    /// [`MIN_SPAWN_FLOOR_MS`], the floor never exceeds the interval, and decay
    /// is never negative.
    pub fn new(interval_ms: f32, floor_ms: f32, decay_ms: f32) -> Self {
        let interval_ms = interval_ms.max(MIN_SPAWN_FLOOR_MS);
        let floor_ms = floor_ms.max(MIN_SPAWN_FLOOR_MS).min(interval_ms);
        Self {
            initial_ms: interval_ms,
            interval_ms,
            floor_ms,
            decay_ms: decay_ms.max(0.0),
            elapsed_ms: 0.0,
            cycles: 0,
        }
    }

    pub fn from_tuning(tuning: &Tuning) -> Self {
        Self::new(
            tuning.spawn_interval_ms,
            tuning.spawn_floor_ms,
            tuning.spawn_decay_ms,
        )
    }

    /// Interval after one more decay step
    #[inline]
    pub fn next_interval(interval_ms: f32, floor_ms: f32, decay_ms: f32) -> f32 {
        (interval_ms - decay_ms).max(floor_ms)
    }

    /// Advance the clock; returns how many firings became due.
    ///
    /// Each firing must be followed by [`SpawnTimer::complete_cycle`] so the
    /// next firing is measured against the shortened interval.
    pub fn advance(&mut self, dt_ms: f32) -> u32 {
        self.elapsed_ms += dt_ms.max(0.0);
        let mut due = 0;
        let mut interval = self.interval_ms;
        let mut elapsed = self.elapsed_ms;
        while elapsed >= interval {
            elapsed -= interval;
            interval = Self::next_interval(interval, self.floor_ms, self.decay_ms);
            due += 1;
        }
        due
    }

    /// Consume one firing: reschedule at the decayed interval
    pub fn complete_cycle(&mut self) {
        self.elapsed_ms = (self.elapsed_ms - self.interval_ms).max(0.0);
        let previous = self.interval_ms;
        self.interval_ms = Self::next_interval(self.interval_ms, self.floor_ms, self.decay_ms);
        self.cycles += 1;
        if self.interval_ms != previous {
            log::debug!(
                "Spawn cycle {}: interval {}ms -> {}ms",
                self.cycles,
                previous,
                self.interval_ms
            );
        }
    }

    /// Milliseconds left until the next firing
    pub fn remaining_ms(&self) -> f32 {
        (self.interval_ms - self.elapsed_ms).max(0.0)
    }

    /// 0.0 at session start, 1.0 once the interval reaches the floor
    pub fn progress(&self) -> f32 {
        let span = self.initial_ms - self.floor_ms;
        if span <= 0.0 {
            return 0.0;
        }
        ((self.initial_ms - self.interval_ms) / span).clamp(0.0, 1.0)
    }

    /// Fall speed multiplier for the current ramp position
    pub fn speed_scale(&self, max_speed_scale: f32) -> f32 {
        1.0 + self.progress() * (max_speed_scale - 1.0)
    }
}
