//! Collision resolution
//!
//! One symmetric table says what happens when two entity classes overlap.
//! The resolver walks a snapshot of overlapping pairs, applies the table, and
//! only flags entities dead; removal happens after the pass.

use super::entity::{EntityClass, EntityId, EntityRegistry, PickupKind};
use super::state::{GameEvent, SessionState};
use crate::present::SoundCue;

/// Effect of an overlapping pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interaction {
    /// Player hits obstacle: obstacle destroyed, one damage
    Damage,
    /// Player picks up a pickup
    Collect(PickupKind),
    /// Debris shoves the player, nothing else
    Push,
    /// Both entities destroyed, no score/health effect
    DestroyBoth,
    /// Pass through each other
    Ignore,
}

/// Sort key so each class pair has one canonical order
fn rank(class: EntityClass) -> u8 {
    match class {
        EntityClass::Player => 0,
        EntityClass::Obstacle => 1,
        EntityClass::Pickup(PickupKind::Star) => 2,
        EntityClass::Pickup(PickupKind::Heart) => 3,
        EntityClass::Debris => 4,
    }
}

fn ordered(a: EntityClass, b: EntityClass) -> (EntityClass, EntityClass) {
    if rank(a) <= rank(b) { (a, b) } else { (b, a) }
}

/// The interaction table (order of arguments does not matter)
pub fn interaction(a: EntityClass, b: EntityClass) -> Interaction {
    use EntityClass::*;
    match ordered(a, b) {
        (Player, Obstacle) => Interaction::Damage,
        (Player, Pickup(kind)) => Interaction::Collect(kind),
        (Player, Debris) => Interaction::Push,
        (Obstacle, Obstacle) | (Obstacle, Pickup(_)) | (Obstacle, Debris) => {
            Interaction::DestroyBoth
        }
        (Pickup(PickupKind::Star), Pickup(PickupKind::Heart)) => Interaction::DestroyBoth,
        _ => Interaction::Ignore,
    }
}

/// What a resolution pass did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolveReport {
    pub destroyed: u32,
    pub damage_taken: u32,
    pub collected: u32,
    pub pushes: u32,
}

/// Apply the interaction table to a snapshot of overlapping pairs
///
/// Pairs whose members died earlier in the same pass are skipped, so every
/// entity is destroyed at most once and triggers at most one effect.
pub fn resolve(
    pairs: &[(EntityId, EntityId)],
    registry: &mut EntityRegistry,
    state: &mut SessionState,
) -> ResolveReport {
    let mut report = ResolveReport::default();

    for &(id_a, id_b) in pairs {
        let (Some(a), Some(b)) = (registry.get(id_a), registry.get(id_b)) else {
            continue;
        };
        if !a.alive || !b.alive {
            continue;
        }
        let (class_a, class_b) = (a.class, b.class);

        // Canonical order: lower rank first (the player, when present)
        let (first, second) = if rank(class_a) <= rank(class_b) {
            (id_a, id_b)
        } else {
            (id_b, id_a)
        };

        match interaction(class_a, class_b) {
            Interaction::Damage => {
                registry.mark_dead(second);
                report.destroyed += 1;
                if state.is_playing() {
                    state.events.push(GameEvent::Sound(SoundCue::Explosion));
                    state.take_damage(1);
                    report.damage_taken += 1;
                }
            }
            Interaction::Collect(kind) => {
                registry.mark_dead(second);
                report.destroyed += 1;
                if state.is_playing() {
                    state.events.push(GameEvent::Sound(SoundCue::Collect));
                    match kind {
                        PickupKind::Star => state.collect_score(1),
                        PickupKind::Heart => state.collect_heart(1),
                    }
                    report.collected += 1;
                }
            }
            Interaction::Push => {
                if push_out(registry, first, second) {
                    report.pushes += 1;
                }
            }
            Interaction::DestroyBoth => {
                registry.mark_dead(first);
                registry.mark_dead(second);
                report.destroyed += 2;
            }
            Interaction::Ignore => {}
        }
    }

    report
}

/// Move `body` out of `pusher` and carry it along the pusher's motion
fn push_out(registry: &mut EntityRegistry, body: EntityId, pusher: EntityId) -> bool {
    let Some(pusher) = registry.get(pusher) else {
        return false;
    };
    let (pusher_box, pusher_vel) = (pusher.aabb(), pusher.vel);
    let Some(body) = registry.get_mut(body) else {
        return false;
    };

    let contact = body.aabb().contact(&pusher_box);
    if !contact.hit {
        return false;
    }

    body.pos += contact.normal * contact.penetration;

    // Cancel motion into the pusher, then inherit its push along the normal
    let into = body.vel.dot(contact.normal);
    if into < 0.0 {
        body.vel -= contact.normal * into;
    }
    let shove = pusher_vel.dot(contact.normal);
    if shove > 0.0 {
        body.vel += contact.normal * shove;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::physics::find_overlaps;
    use crate::sim::variant::VariantId;
    use glam::Vec2;

    fn fresh_state() -> SessionState {
        SessionState::new(VariantId::Level1, 2, None)
    }

    #[test]
    fn test_table_is_symmetric() {
        let classes = [
            EntityClass::Player,
            EntityClass::Obstacle,
            EntityClass::STAR,
            EntityClass::HEART,
            EntityClass::Debris,
        ];
        for a in classes {
            for b in classes {
                assert_eq!(interaction(a, b), interaction(b, a), "{a:?} x {b:?}");
            }
        }
    }

    #[test]
    fn test_table_entries() {
        use EntityClass::{Debris, Obstacle, Player};
        const STAR: EntityClass = EntityClass::STAR;
        const HEART: EntityClass = EntityClass::HEART;
        assert_eq!(interaction(Player, Obstacle), Interaction::Damage);
        assert_eq!(interaction(STAR, Player), Interaction::Collect(PickupKind::Star));
        assert_eq!(interaction(Player, HEART), Interaction::Collect(PickupKind::Heart));
        assert_eq!(interaction(Debris, Player), Interaction::Push);
        assert_eq!(interaction(Obstacle, Obstacle), Interaction::DestroyBoth);
        assert_eq!(interaction(HEART, Obstacle), Interaction::DestroyBoth);
        assert_eq!(interaction(STAR, HEART), Interaction::DestroyBoth);
        assert_eq!(interaction(Obstacle, Debris), Interaction::DestroyBoth);
        assert_eq!(interaction(Debris, STAR), Interaction::Ignore);
        assert_eq!(interaction(STAR, STAR), Interaction::Ignore);
        assert_eq!(interaction(Debris, Debris), Interaction::Ignore);
    }

    #[test]
    fn test_obstacle_hit_damages_once() {
        let mut reg = EntityRegistry::new();
        let mut state = fresh_state();
        let player = reg.spawn(EntityClass::Player, Vec2::new(300.0, 500.0), Vec2::ZERO);
        let rock = reg.spawn(EntityClass::Obstacle, Vec2::new(300.0, 480.0), Vec2::ZERO);

        let pairs = find_overlaps(&reg);
        // Same pair reported twice still only hurts once
        let doubled = [pairs[0], pairs[0]];
        let report = resolve(&doubled, &mut reg, &mut state);

        assert_eq!(report.damage_taken, 1);
        assert_eq!(state.health, 1);
        assert!(!reg.is_alive(rock));
        assert!(reg.is_alive(player));
        assert!(state.events.contains(&GameEvent::Sound(SoundCue::Explosion)));
    }

    #[test]
    fn test_entity_in_two_destroying_pairs_dies_once() {
        let mut reg = EntityRegistry::new();
        let mut state = fresh_state();
        // A star touching two obstacles at once
        let left = reg.spawn(EntityClass::Obstacle, Vec2::new(80.0, 100.0), Vec2::ZERO);
        let star = reg.spawn(EntityClass::STAR, Vec2::new(110.0, 100.0), Vec2::ZERO);
        let right = reg.spawn(EntityClass::Obstacle, Vec2::new(140.0, 100.0), Vec2::ZERO);

        let pairs = find_overlaps(&reg);
        assert_eq!(pairs, vec![(left, star), (star, right)]);
        let report = resolve(&pairs, &mut reg, &mut state);

        // The first pair consumes the star; the second is skipped
        assert_eq!(report.destroyed, 2);
        assert!(!reg.is_alive(left));
        assert!(!reg.is_alive(star));
        assert!(reg.is_alive(right));
    }

    #[test]
    fn test_player_and_obstacle_race_for_star() {
        let mut reg = EntityRegistry::new();
        let mut state = fresh_state();
        let player = reg.spawn(EntityClass::Player, Vec2::new(300.0, 300.0), Vec2::ZERO);
        let star = reg.spawn(EntityClass::STAR, Vec2::new(300.0, 270.0), Vec2::ZERO);
        let rock = reg.spawn(EntityClass::Obstacle, Vec2::new(300.0, 240.0), Vec2::ZERO);

        let pairs = find_overlaps(&reg);
        assert_eq!(pairs, vec![(player, star), (star, rock)]);
        resolve(&pairs, &mut reg, &mut state);

        // Player pair comes first by id: star collected, rock survives
        assert_eq!(state.score, 1);
        assert!(!reg.is_alive(star));
        assert!(reg.is_alive(rock));
    }

    #[test]
    fn test_heart_collect_heals() {
        let mut reg = EntityRegistry::new();
        let mut state = fresh_state();
        reg.spawn(EntityClass::Player, Vec2::new(300.0, 300.0), Vec2::ZERO);
        reg.spawn(EntityClass::HEART, Vec2::new(310.0, 300.0), Vec2::ZERO);

        let pairs = find_overlaps(&reg);
        let report = resolve(&pairs, &mut reg, &mut state);
        assert_eq!(report.collected, 1);
        assert_eq!(state.health, 3);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_debris_pushes_without_damage() {
        let mut reg = EntityRegistry::new();
        let mut state = fresh_state();
        let player = reg.spawn(EntityClass::Player, Vec2::new(300.0, 300.0), Vec2::ZERO);
        let debris = reg.spawn(EntityClass::Debris, Vec2::new(300.0, 265.0), Vec2::new(0.0, 200.0));

        let pairs = find_overlaps(&reg);
        let report = resolve(&pairs, &mut reg, &mut state);

        assert_eq!(report.pushes, 1);
        assert_eq!(state.health, 2);
        assert_eq!(state.score, 0);
        assert!(state.events.is_empty());
        assert!(reg.is_alive(debris));

        let p = reg.get(player).unwrap();
        // Pushed down until the boxes just touch, moving with the debris
        let expected_y = 265.0 + (DEBRIS_HALF + PLAYER_HALF);
        assert!((p.pos.y - expected_y).abs() < 0.001);
        assert_eq!(p.vel, Vec2::new(0.0, 200.0));
    }

    const DEBRIS_HALF: f32 = crate::consts::DEBRIS_SIZE / 2.0;
    const PLAYER_HALF: f32 = crate::consts::PLAYER_SIZE / 2.0;

    #[test]
    fn test_no_player_effects_after_end() {
        let mut reg = EntityRegistry::new();
        let mut state = SessionState::new(VariantId::Level1, 1, None);
        reg.spawn(EntityClass::Player, Vec2::new(300.0, 300.0), Vec2::ZERO);
        reg.spawn(EntityClass::Obstacle, Vec2::new(290.0, 300.0), Vec2::ZERO);
        reg.spawn(EntityClass::Obstacle, Vec2::new(310.0, 330.0), Vec2::ZERO);
        reg.spawn(EntityClass::STAR, Vec2::new(300.0, 280.0), Vec2::ZERO);

        let pairs = find_overlaps(&reg);
        let report = resolve(&pairs, &mut reg, &mut state);
        assert_eq!(report.damage_taken, 1);
        assert_eq!(state.health, 0);
        assert_eq!(state.score, 0);
        let explosions = state
            .events
            .iter()
            .filter(|e| **e == GameEvent::Sound(SoundCue::Explosion))
            .count();
        assert_eq!(explosions, 1);
    }
}
