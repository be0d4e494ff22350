//! Rocket Rush - vertically-scrolling arcade dodger
//!
//! Core modules:
//! - `sim`: Deterministic session simulation (spawning, collisions, session state)
//! - `tuning`: Data-driven game balance
//! - `pacing`: Frame time to fixed-step conversion
//! - `present`: Presentation seam (sound cues, HUD text, results screen)

pub mod pacing;
pub mod present;
pub mod sim;
pub mod tuning;

pub use pacing::FramePacer;
pub use present::{HudField, LogPresenter, Presenter, SoundCue};
pub use tuning::{Tuning, TuningError};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (one step per 60 Hz frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Play field dimensions (y grows downward)
    pub const WORLD_WIDTH: f32 = 600.0;
    pub const WORLD_HEIGHT: f32 = 750.0;

    /// Player craft
    pub const PLAYER_SIZE: f32 = 48.0;
    pub const PLAYER_MAX_SPEED: f32 = 500.0;
    pub const PLAYER_DRAG: f32 = 2000.0;
    pub const PLAYER_ACCELERATION: f32 = 1500.0;
    pub const PLAYER_HEALTH: u32 = 2;

    /// Falling entities
    pub const OBSTACLE_SIZE: f32 = 48.0;
    pub const OBSTACLE_SPEED: f32 = 200.0;
    pub const STAR_SIZE: f32 = 30.0;
    pub const HEART_SIZE: f32 = 28.0;
    pub const DEBRIS_SIZE: f32 = 36.0;
    /// Max sideways speed of a debris chunk
    pub const DEBRIS_DRIFT_SPEED: f32 = 80.0;
    /// Extra distance past the side edges before drifting debris is culled
    pub const LATERAL_CULL_MARGIN: f32 = 50.0;

    /// Spawn timer (milliseconds)
    pub const SPAWN_INTERVAL_MS: f32 = 2000.0;
    pub const SPAWN_FLOOR_MS: f32 = 400.0;
    pub const SPAWN_DECAY_MS: f32 = 20.0;
    /// Shortest interval the spawn timer will accept
    pub const MIN_SPAWN_FLOOR_MS: f32 = 1.0;
    /// Delay between staggered obstacles of one scatter cycle
    pub const STAGGER_MS: f32 = 200.0;

    /// Row layout
    pub const ROW_SLOTS: u32 = 9;
    pub const ROW_GAP_MIN: u32 = 1;
    pub const ROW_GAP_MAX: u32 = 7;
}

/// World extents as a vector (width, height)
#[inline]
pub fn world_size() -> Vec2 {
    Vec2::new(consts::WORLD_WIDTH, consts::WORLD_HEIGHT)
}

/// Where the player craft starts a session
#[inline]
pub fn player_start() -> Vec2 {
    Vec2::new(consts::WORLD_WIDTH / 2.0, consts::WORLD_HEIGHT / 1.5)
}
