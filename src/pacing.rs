//! Fixed-timestep frame pacing
//!
//! Turns variable display frame times into a whole number of `SIM_DT` steps.

use crate::consts::{MAX_SUBSTEPS, SIM_DT};

/// Longest frame an interactive frontend will simulate in one go
pub const MAX_FRAME_DT: f32 = 0.1;

/// Accumulator that converts frame time into simulation steps
#[derive(Debug, Clone, PartialEq)]
pub struct FramePacer {
    accumulator: f32,
    max_frame_dt: f32,
    max_substeps: u32,
}

impl Default for FramePacer {
    fn default() -> Self {
        Self {
            accumulator: 0.0,
            max_frame_dt: MAX_FRAME_DT,
            max_substeps: MAX_SUBSTEPS,
        }
    }
}

impl FramePacer {
    /// Interactive pacing: long frames are cut short to avoid a spiral of death
    pub fn new() -> Self {
        Self::default()
    }

    /// Pacing for a fixed display rate where every frame's time must be simulated
    pub fn for_fps(fps: f32) -> Self {
        let frame_dt = 1.0 / fps;
        let steps = (frame_dt / SIM_DT).ceil() as u32 + 1;
        Self {
            accumulator: 0.0,
            max_frame_dt: frame_dt.max(MAX_FRAME_DT),
            max_substeps: steps.max(MAX_SUBSTEPS),
        }
    }

    /// Add one frame's time; returns how many fixed steps to run now
    pub fn advance(&mut self, dt: f32) -> u32 {
        self.accumulator += dt.clamp(0.0, self.max_frame_dt);

        let mut steps = 0;
        while self.accumulator >= SIM_DT && steps < self.max_substeps {
            self.accumulator -= SIM_DT;
            steps += 1;
        }

        // Whatever the step budget could not cover is dropped, not carried
        self.accumulator = self.accumulator.min(SIM_DT);
        steps
    }

    /// Leftover time not yet simulated
    pub fn backlog(&self) -> f32 {
        self.accumulator
    }

    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}
