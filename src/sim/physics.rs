//! Minimal arcade physics
//!
//! Only what the session needs from a physics backend: axis-aligned boxes,
//! broad-phase overlap pairs, and the player's accelerate/drag/clamp movement.

use glam::Vec2;

use super::entity::{EntityId, EntityRegistry};

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        let half = size * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    /// Strict intersection (touching edges do not count)
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }

    /// Contact for pushing `self` out of `other` along the shallowest axis
    pub fn contact(&self, other: &Aabb) -> Contact {
        if !self.overlaps(other) {
            return Contact::miss();
        }

        let overlap_x = (self.max.x - other.min.x).min(other.max.x - self.min.x);
        let overlap_y = (self.max.y - other.min.y).min(other.max.y - self.min.y);
        let delta = self.center() - other.center();

        let normal = if overlap_x < overlap_y {
            Vec2::new(if delta.x < 0.0 { -1.0 } else { 1.0 }, 0.0)
        } else {
            Vec2::new(0.0, if delta.y < 0.0 { -1.0 } else { 1.0 })
        };

        Contact {
            hit: true,
            normal,
            penetration: overlap_x.min(overlap_y),
        }
    }
}

/// Result of a box-vs-box contact check
#[derive(Debug, Clone, Copy)]
pub struct Contact {
    /// Whether the boxes overlap
    pub hit: bool,
    /// Direction to move the first box to separate (unit axis)
    pub normal: Vec2,
    /// Separation distance along `normal`
    pub penetration: f32,
}

impl Contact {
    pub fn miss() -> Self {
        Self {
            hit: false,
            normal: Vec2::ZERO,
            penetration: 0.0,
        }
    }
}

/// All overlapping alive pairs, ordered by (lower id, higher id)
///
/// Quadratic broad phase; entity counts stay in the tens.
pub fn find_overlaps(registry: &EntityRegistry) -> Vec<(EntityId, EntityId)> {
    let boxes: Vec<_> = registry.alive().map(|e| (e.id, e.aabb())).collect();
    let mut pairs = Vec::new();

    for (i, (id_a, box_a)) in boxes.iter().enumerate() {
        for (id_b, box_b) in &boxes[i + 1..] {
            if box_a.overlaps(box_b) {
                pairs.push((*id_a, *id_b));
            }
        }
    }

    pairs
}

/// Arcade steering for one axis-pair
///
/// Acceleration applies where non-zero; drag only slows axes with no input.
/// Speed is capped per axis.
pub fn steer(vel: Vec2, accel: Vec2, drag: f32, max_speed: f32, dt: f32) -> Vec2 {
    let axis = |v: f32, a: f32| -> f32 {
        let v = if a != 0.0 {
            v + a * dt
        } else {
            let slowed = v.abs() - drag * dt;
            if slowed > 0.0 { slowed * v.signum() } else { 0.0 }
        };
        v.clamp(-max_speed, max_speed)
    };
    Vec2::new(axis(vel.x, accel.x), axis(vel.y, accel.y))
}

/// Keep a box fully inside the world, zeroing velocity on blocked axes
pub fn clamp_to_world(pos: Vec2, vel: Vec2, size: Vec2, world: Vec2) -> (Vec2, Vec2) {
    let half = size * 0.5;
    let clamped = pos.clamp(half, world - half);
    let mut vel = vel;
    if clamped.x != pos.x {
        vel.x = 0.0;
    }
    if clamped.y != pos.y {
        vel.y = 0.0;
    }
    (clamped, vel)
}
