//! Fixed timestep simulation tick
//!
//! Core game loop that advances a session deterministically.

use glam::Vec2;

use super::collision::resolve;
use super::entity::EntityClass;
use super::physics::{clamp_to_world, find_overlaps, steer};
use super::session::Session;
use crate::consts::*;
use crate::{player_start, world_size};

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    /// Idle/demo mode - AI flies the craft
    pub idle_mode: bool,
}

impl TickInput {
    /// Acceleration direction; left/up win over right/down when both are held
    pub fn direction(&self) -> Vec2 {
        let x = if self.left {
            -1.0
        } else if self.right {
            1.0
        } else {
            0.0
        };
        let y = if self.up {
            -1.0
        } else if self.down {
            1.0
        } else {
            0.0
        };
        Vec2::new(x, y)
    }
}

/// Advance the session by one fixed timestep (`dt` in seconds)
pub fn tick(session: &mut Session, input: &TickInput, dt: f32) {
    // Nothing moves once the session is over
    if !session.is_playing() {
        return;
    }

    session.time_ticks += 1;
    let dt_ms = dt * 1000.0;

    let input = if input.idle_mode {
        autopilot(session)
    } else {
        input.clone()
    };

    move_player(session, &input, dt);
    session.registry.integrate(dt);

    // Staggered spawns from earlier cycles, then any cycles due this step
    session.fire_pending(dt_ms);
    let due = session.timer.advance(dt_ms);
    for _ in 0..due {
        session.run_spawn_cycle();
    }

    // Snapshot pairs, resolve, then purge
    let pairs = find_overlaps(&session.registry);
    resolve(&pairs, &mut session.registry, &mut session.state);
    confine_player(session);

    session.registry.purge_dead();
    session.registry.purge_out_of_bounds(WORLD_HEIGHT, WORLD_WIDTH);

    if !session.is_playing() {
        session.shut_down();
    }
}

/// Arcade movement from directional keys
fn move_player(session: &mut Session, input: &TickInput, dt: f32) {
    let accel = input.direction() * session.tuning.player_acceleration;
    let drag = session.tuning.player_drag;
    let max_speed = session.tuning.player_max_speed;
    let Some(player) = session.player_mut() else {
        return;
    };

    player.vel = steer(player.vel, accel, drag, max_speed, dt);
    player.pos += player.vel * dt;
    confine_player(session);
}

/// Keep the craft inside the play field
fn confine_player(session: &mut Session) {
    if let Some(player) = session.player_mut() {
        let (pos, vel) = clamp_to_world(player.pos, player.vel, player.size, world_size());
        player.pos = pos;
        player.vel = vel;
    }
}

/// How far above the craft an obstacle counts as a threat
const THREAT_RANGE: f32 = 260.0;
/// Dead zone when lining up with a star
const ALIGN_TOLERANCE: f32 = 8.0;
/// Vertical drift allowed around the home row
const HOME_TOLERANCE: f32 = 20.0;

/// Demo pilot: sidestep the nearest falling obstacle, otherwise chase stars
pub fn autopilot(session: &Session) -> TickInput {
    let mut input = TickInput::default();
    let Some(player) = session.player() else {
        return input;
    };
    let p = player.pos;
    let danger_x = (player.size.x + OBSTACLE_SIZE) / 2.0 + 12.0;

    let threat = session
        .registry
        .alive()
        .filter(|e| e.class == EntityClass::Obstacle)
        .filter(|e| e.pos.y < p.y + player.size.y && p.y - e.pos.y < THREAT_RANGE)
        .filter(|e| (e.pos.x - p.x).abs() < danger_x)
        .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y));

    let target_star = session
        .registry
        .alive()
        .filter(|e| e.class == EntityClass::STAR && e.pos.y < p.y)
        .min_by(|a, b| {
            let da = (a.pos - p).length_squared();
            let db = (b.pos - p).length_squared();
            da.total_cmp(&db)
        });

    if let Some(threat) = threat {
        // Dodge away from the obstacle; when dead center, toward open space
        let go_left = if (threat.pos.x - p.x).abs() < 1.0 {
            p.x > WORLD_WIDTH / 2.0
        } else {
            threat.pos.x > p.x
        };
        let blocked = if go_left {
            p.x - player.size.x <= 0.0
        } else {
            p.x + player.size.x >= WORLD_WIDTH
        };
        // Pinned against a wall: cut across instead
        let go_left = if blocked { !go_left } else { go_left };
        input.left = go_left;
        input.right = !go_left;
    } else if let Some(star) = target_star {
        let dx = star.pos.x - p.x;
        input.left = dx < -ALIGN_TOLERANCE;
        input.right = dx > ALIGN_TOLERANCE;
    }

    let home_y = player_start().y;
    input.up = p.y > home_y + HOME_TOLERANCE;
    input.down = p.y < home_y - HOME_TOLERANCE;
    input
}
