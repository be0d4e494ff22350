//! Entity registry
//!
//! Flat pool of live entities, kept sorted by id for deterministic iteration.
//! Destruction is two-phase: `mark_dead` flips the flag during a pass,
//! `purge_dead` removes flagged entities once the pass is over.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::physics::Aabb;
use crate::consts::*;

/// Stable entity handle, unique within a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(pub u32);

/// Pickup types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PickupKind {
    /// +1 score
    Star,
    /// +1 health
    Heart,
}

/// Entity classes the interaction table is keyed on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityClass {
    Player,
    Obstacle,
    Pickup(PickupKind),
    Debris,
}

impl EntityClass {
    pub const STAR: Self = EntityClass::Pickup(PickupKind::Star);
    pub const HEART: Self = EntityClass::Pickup(PickupKind::Heart);

    /// Bounding box size for freshly spawned entities of this class
    pub fn default_size(&self) -> Vec2 {
        match self {
            EntityClass::Player => Vec2::splat(PLAYER_SIZE),
            EntityClass::Obstacle => Vec2::splat(OBSTACLE_SIZE),
            EntityClass::Pickup(PickupKind::Star) => Vec2::splat(STAR_SIZE),
            EntityClass::Pickup(PickupKind::Heart) => Vec2::splat(HEART_SIZE),
            EntityClass::Debris => Vec2::splat(DEBRIS_SIZE),
        }
    }

    /// Classes that drift sideways and must also be culled at the side edges
    pub fn drifts_laterally(&self) -> bool {
        matches!(self, EntityClass::Debris)
    }
}

/// A simulated body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    pub class: EntityClass,
    /// Center position
    pub pos: Vec2,
    pub vel: Vec2,
    /// Full bounding box extents
    pub size: Vec2,
    pub alive: bool,
}

impl Entity {
    pub fn aabb(&self) -> Aabb {
        Aabb::from_center(self.pos, self.size)
    }

    /// True once the entity has left the world far enough to never come back
    pub fn is_out_of_bounds(&self, world_height: f32, world_width: f32) -> bool {
        if self.class == EntityClass::Player {
            return false;
        }
        if self.pos.y > world_height + self.size.y {
            return true;
        }
        if self.class.drifts_laterally() {
            let margin = self.size.x + LATERAL_CULL_MARGIN;
            return self.pos.x < -margin || self.pos.x > world_width + margin;
        }
        false
    }
}

/// Typed pool of live entities
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityRegistry {
    /// Sorted by id (ids are handed out monotonically)
    entities: Vec<Entity>,
    next_id: u32,
}

impl Default for EntityRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl EntityRegistry {
    pub fn new() -> Self {
        Self {
            entities: Vec::new(),
            next_id: 1,
        }
    }

    /// Create an entity with its class's default size
    pub fn spawn(&mut self, class: EntityClass, pos: Vec2, vel: Vec2) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        self.entities.push(Entity {
            id,
            class,
            pos,
            vel,
            size: class.default_size(),
            alive: true,
        });
        id
    }

    fn index_of(&self, id: EntityId) -> Option<usize> {
        self.entities.binary_search_by_key(&id, |e| e.id).ok()
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        let i = self.index_of(id)?;
        Some(&self.entities[i])
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        let i = self.index_of(id)?;
        Some(&mut self.entities[i])
    }

    /// Whether `id` refers to an entity that is still alive
    pub fn is_alive(&self, id: EntityId) -> bool {
        self.get(id).is_some_and(|e| e.alive)
    }

    /// Visit every alive entity of `class`
    pub fn for_each(&self, class: EntityClass, mut f: impl FnMut(&Entity)) {
        self.entities
            .iter()
            .filter(|e| e.alive && e.class == class)
            .for_each(|e| f(e));
    }

    /// Alive entities in id order
    pub fn alive(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter().filter(|e| e.alive)
    }

    /// Number of alive entities of `class`
    pub fn count(&self, class: EntityClass) -> usize {
        self.alive().filter(|e| e.class == class).count()
    }

    /// Stored entities, including ones marked dead but not yet purged
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Flag an entity for removal. Returns false if it was unknown or already dead.
    pub fn mark_dead(&mut self, id: EntityId) -> bool {
        match self.get_mut(id) {
            Some(entity) if entity.alive => {
                entity.alive = false;
                true
            }
            _ => false,
        }
    }

    /// Remove every entity flagged dead
    pub fn purge_dead(&mut self) -> usize {
        let before = self.entities.len();
        self.entities.retain(|e| e.alive);
        before - self.entities.len()
    }

    /// Silently drop entities that have left the world
    pub fn purge_out_of_bounds(&mut self, world_height: f32, world_width: f32) -> usize {
        let before = self.entities.len();
        self.entities
            .retain(|e| !e.is_out_of_bounds(world_height, world_width));
        before - self.entities.len()
    }

    /// Move every non-player entity along its velocity
    pub fn integrate(&mut self, dt: f32) {
        for entity in self
            .entities
            .iter_mut()
            .filter(|e| e.alive && e.class != EntityClass::Player)
        {
            entity.pos += entity.vel * dt;
        }
    }

    /// Drop all entities (session end). Ids keep counting up.
    pub fn clear(&mut self) {
        self.entities.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_assigns_increasing_ids() {
        let mut reg = EntityRegistry::new();
        let a = reg.spawn(EntityClass::Obstacle, Vec2::ZERO, Vec2::ZERO);
        let b = reg.spawn(EntityClass::STAR, Vec2::ZERO, Vec2::ZERO);
        assert!(a < b);
        assert_eq!(reg.get(b).map(|e| e.class), Some(EntityClass::STAR));
        assert_eq!(reg.get(a).map(|e| e.size), Some(Vec2::splat(OBSTACLE_SIZE)));
    }

    #[test]
    fn test_default_matches_new() {
        let mut a = EntityRegistry::default();
        let mut b = EntityRegistry::new();
        assert_eq!(
            a.spawn(EntityClass::Obstacle, Vec2::ZERO, Vec2::ZERO),
            b.spawn(EntityClass::Obstacle, Vec2::ZERO, Vec2::ZERO)
        );
        assert_eq!(a.spawn(EntityClass::Debris, Vec2::ZERO, Vec2::ZERO), EntityId(2));
    }

    #[test]
    fn test_mark_dead_is_idempotent_and_ignores_unknown() {
        let mut reg = EntityRegistry::new();
        let id = reg.spawn(EntityClass::Obstacle, Vec2::ZERO, Vec2::ZERO);
        assert!(reg.mark_dead(id));
        assert!(!reg.mark_dead(id));
        assert!(!reg.mark_dead(EntityId(999)));

        // Dead but still stored until purged
        assert_eq!(reg.len(), 1);
        assert_eq!(reg.count(EntityClass::Obstacle), 0);
        assert_eq!(reg.purge_dead(), 1);
        assert!(reg.is_empty());
    }

    #[test]
    fn test_for_each_skips_dead_and_other_classes() {
        let mut reg = EntityRegistry::new();
        let a = reg.spawn(EntityClass::Obstacle, Vec2::ZERO, Vec2::ZERO);
        reg.spawn(EntityClass::Obstacle, Vec2::ZERO, Vec2::ZERO);
        reg.spawn(EntityClass::HEART, Vec2::ZERO, Vec2::ZERO);
        reg.mark_dead(a);

        let mut seen = 0;
        reg.for_each(EntityClass::Obstacle, |_| seen += 1);
        assert_eq!(seen, 1);
    }

    #[test]
    fn test_purge_out_of_bounds_bottom_edge() {
        let mut reg = EntityRegistry::new();
        // Just past the edge but not by a full height: kept
        let near = reg.spawn(
            EntityClass::Obstacle,
            Vec2::new(100.0, WORLD_HEIGHT + OBSTACLE_SIZE - 1.0),
            Vec2::ZERO,
        );
        let gone = reg.spawn(
            EntityClass::Obstacle,
            Vec2::new(100.0, WORLD_HEIGHT + OBSTACLE_SIZE + 1.0),
            Vec2::ZERO,
        );
        // Still above the top edge after spawning: kept
        let above = reg.spawn(EntityClass::STAR, Vec2::new(100.0, -200.0), Vec2::ZERO);

        assert_eq!(reg.purge_out_of_bounds(WORLD_HEIGHT, WORLD_WIDTH), 1);
        assert!(reg.get(near).is_some());
        assert!(reg.get(gone).is_none());
        assert!(reg.get(above).is_some());
    }

    #[test]
    fn test_purge_out_of_bounds_lateral_only_for_debris() {
        let mut reg = EntityRegistry::new();
        let far_left = -(DEBRIS_SIZE + LATERAL_CULL_MARGIN) - 1.0;
        let debris = reg.spawn(EntityClass::Debris, Vec2::new(far_left, 300.0), Vec2::ZERO);
        let obstacle = reg.spawn(EntityClass::Obstacle, Vec2::new(far_left, 300.0), Vec2::ZERO);
        let player = reg.spawn(
            EntityClass::Player,
            Vec2::new(300.0, WORLD_HEIGHT * 3.0),
            Vec2::ZERO,
        );

        reg.purge_out_of_bounds(WORLD_HEIGHT, WORLD_WIDTH);
        assert!(reg.get(debris).is_none());
        assert!(reg.get(obstacle).is_some());
        assert!(reg.get(player).is_some());
    }

    #[test]
    fn test_drifting_debris_culled_past_right_edge() {
        let mut reg = EntityRegistry::new();
        let edge = WORLD_WIDTH + DEBRIS_SIZE + LATERAL_CULL_MARGIN;
        let inside = reg.spawn(EntityClass::Debris, Vec2::new(edge - 1.0, 300.0), Vec2::ZERO);
        let drifting = reg.spawn(
            EntityClass::Debris,
            Vec2::new(edge - 1.0, 300.0),
            Vec2::new(80.0, 0.0),
        );

        assert_eq!(reg.purge_out_of_bounds(WORLD_HEIGHT, WORLD_WIDTH), 0);
        // One second of drift carries it past the margin
        reg.integrate(1.0);
        assert_eq!(reg.purge_out_of_bounds(WORLD_HEIGHT, WORLD_WIDTH), 1);
        assert!(reg.get(inside).is_some());
        assert!(reg.get(drifting).is_none());
    }

    #[test]
    fn test_integrate_moves_everything_but_player() {
        let mut reg = EntityRegistry::new();
        let rock = reg.spawn(EntityClass::Obstacle, Vec2::ZERO, Vec2::new(0.0, 200.0));
        let player = reg.spawn(EntityClass::Player, Vec2::ZERO, Vec2::new(0.0, 200.0));
        reg.integrate(0.5);
        assert_eq!(reg.get(rock).map(|e| e.pos), Some(Vec2::new(0.0, 100.0)));
        assert_eq!(reg.get(player).map(|e| e.pos), Some(Vec2::ZERO));
    }
}
