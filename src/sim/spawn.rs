//! Spawn policy
//!
//! Decides what a single spawn cycle creates. Pure with respect to the
//! session: takes the variant, balance values, RNG and current speed scale,
//! and returns requests for the session to apply (now or after a delay).

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::entity::EntityClass;
use super::variant::{LevelVariant, SpawnLayout};
use crate::consts::*;
use crate::tuning::Tuning;

/// "Draw an integer from [0, max], succeed on `hit`"
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RollOdds {
    pub max: u32,
    pub hit: u32,
}

impl RollOdds {
    pub fn roll<R: Rng + ?Sized>(&self, rng: &mut R) -> bool {
        rng.random_range(0..=self.max) == self.hit
    }

    /// Exact success probability, 1 / (max + 1)
    pub fn probability(&self) -> f64 {
        1.0 / (self.max as f64 + 1.0)
    }
}

/// Star per scatter cycle: 1 in 2
pub const STAR_ODDS: RollOdds = RollOdds { max: 1, hit: 1 };
/// Heart per scatter cycle: 1 in 41
pub const HEART_ODDS: RollOdds = RollOdds { max: 40, hit: 5 };
/// Debris per scatter cycle (debris levels only): 1 in 5
pub const DEBRIS_ODDS: RollOdds = RollOdds { max: 4, hit: 2 };

/// Obstacles per scatter cycle, inclusive
pub const SCATTER_MIN_OBSTACLES: u32 = 1;
pub const SCATTER_MAX_OBSTACLES: u32 = 3;

/// One entity the session should create
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpawnRequest {
    pub class: EntityClass,
    pub pos: Vec2,
    pub vel: Vec2,
    /// 0 = immediately; otherwise staggered after the cycle fired
    pub delay_ms: f32,
}

impl SpawnRequest {
    fn now(class: EntityClass, pos: Vec2, vel: Vec2) -> Self {
        Self {
            class,
            pos,
            vel,
            delay_ms: 0.0,
        }
    }
}

/// Everything one spawn cycle creates
pub fn plan_cycle<R: Rng + ?Sized>(
    variant: &LevelVariant,
    tuning: &Tuning,
    rng: &mut R,
    speed_scale: f32,
) -> Vec<SpawnRequest> {
    let fall = Vec2::new(0.0, variant.obstacle_speed * speed_scale);
    match variant.layout {
        SpawnLayout::Scatter => plan_scatter(variant.debris_enabled, tuning.stagger_ms, rng, fall),
        SpawnLayout::Row => plan_row(rng, fall),
    }
}

/// Spawn height for a class: fully above the top edge
fn above_top(class: EntityClass) -> f32 {
    -class.default_size().y
}

fn random_x<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    rng.random_range(0..=WORLD_WIDTH as u32) as f32
}

/// Open-field scatter: 1-3 staggered obstacles plus independent pickup rolls
pub fn plan_scatter<R: Rng + ?Sized>(
    debris_enabled: bool,
    stagger_ms: f32,
    rng: &mut R,
    fall: Vec2,
) -> Vec<SpawnRequest> {
    let mut out = Vec::with_capacity(6);

    let count = rng.random_range(SCATTER_MIN_OBSTACLES..=SCATTER_MAX_OBSTACLES);
    for i in 0..count {
        let class = EntityClass::Obstacle;
        out.push(SpawnRequest {
            class,
            pos: Vec2::new(random_x(rng), above_top(class)),
            vel: fall,
            delay_ms: i as f32 * stagger_ms,
        });
    }

    if STAR_ODDS.roll(rng) {
        let class = EntityClass::STAR;
        out.push(SpawnRequest::now(class, Vec2::new(random_x(rng), above_top(class)), fall));
    }

    if HEART_ODDS.roll(rng) {
        let class = EntityClass::HEART;
        out.push(SpawnRequest::now(class, Vec2::new(random_x(rng), above_top(class)), fall));
    }

    if debris_enabled && DEBRIS_ODDS.roll(rng) {
        let class = EntityClass::Debris;
        let drift = rng.random_range(-DEBRIS_DRIFT_SPEED..=DEBRIS_DRIFT_SPEED);
        out.push(SpawnRequest::now(
            class,
            Vec2::new(random_x(rng), above_top(class)),
            Vec2::new(drift, fall.y),
        ));
    }

    out
}

/// Horizontal center of a row slot
pub fn slot_center_x(slot: u32) -> f32 {
    let width = WORLD_WIDTH / ROW_SLOTS as f32;
    (slot as f32 + 0.5) * width
}

/// Structured row: obstacles everywhere except a two-slot gap, star in the gap
pub fn plan_row<R: Rng + ?Sized>(rng: &mut R, fall: Vec2) -> Vec<SpawnRequest> {
    let gap = rng.random_range(ROW_GAP_MIN..=ROW_GAP_MAX);
    row_with_gap(gap, fall)
}

/// Row layout for a known gap index
pub fn row_with_gap(gap: u32, fall: Vec2) -> Vec<SpawnRequest> {
    let mut out = Vec::with_capacity(ROW_SLOTS as usize);
    for slot in 0..ROW_SLOTS {
        let class = if slot == gap {
            EntityClass::STAR
        } else if slot == gap + 1 {
            continue;
        } else {
            EntityClass::Obstacle
        };
        out.push(SpawnRequest::now(
            class,
            Vec2::new(slot_center_x(slot), above_top(EntityClass::Obstacle)),
            fall,
        ));
    }
    out
}
