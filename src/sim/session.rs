//! Session: everything one play of a level owns
//!
//! Created on level entry, reset on retry. Nothing here is global; the
//! frontend holds the `Session` and passes it to [`super::tick`].

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::entity::{Entity, EntityClass, EntityId, EntityRegistry};
use super::ramp::SpawnTimer;
use super::schedule::Scheduler;
use super::spawn::{SpawnRequest, plan_cycle};
use super::state::{GameEvent, SessionOutcome, SessionPhase, SessionState};
use super::variant::LevelVariant;
use crate::player_start;
use crate::tuning::Tuning;

/// One play of a level
#[derive(Debug, Clone)]
pub struct Session {
    /// Ruleset, fixed for the session's lifetime
    pub variant: LevelVariant,
    pub tuning: Tuning,
    /// Run seed for reproducibility
    pub seed: u64,
    rng: Pcg32,
    pub state: SessionState,
    pub registry: EntityRegistry,
    pub timer: SpawnTimer,
    /// Staggered spawns waiting to fire
    pending: Scheduler<SpawnRequest>,
    player: EntityId,
    /// Simulation steps since (re)start
    pub time_ticks: u64,
}

impl Session {
    /// Out-of-range tuning is clamped by the timer and state constructors
    /// rather than rejected.
    pub fn new(variant: LevelVariant, tuning: Tuning, seed: u64) -> Self {
        if let Err(err) = tuning.validate() {
            log::warn!("Clamping out-of-range tuning: {err}");
        }
        let mut registry = EntityRegistry::new();
        let player = registry.spawn(EntityClass::Player, player_start(), Vec2::ZERO);
        let state = SessionState::new(variant.id, tuning.starting_health, tuning.max_health);
        let timer = SpawnTimer::from_tuning(&tuning);

        log::info!(
            "Session started: {} (seed {}, health {})",
            variant.id.as_str(),
            seed,
            state.health
        );

        Self {
            variant,
            tuning,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            state,
            registry,
            timer,
            pending: Scheduler::new(),
            player,
            time_ticks: 0,
        }
    }

    /// Fresh session on the same level. The RNG keeps running so a retry
    /// does not replay the previous run.
    pub fn restart(&mut self) {
        self.pending.clear();
        self.registry.clear();
        self.player = self
            .registry
            .spawn(EntityClass::Player, player_start(), Vec2::ZERO);
        self.state.reset();
        self.timer = SpawnTimer::from_tuning(&self.tuning);
        self.time_ticks = 0;
        log::info!("Session restarted: {}", self.variant.id.as_str());
    }

    pub fn score(&self) -> u32 {
        self.state.score
    }

    pub fn health(&self) -> u32 {
        self.state.health
    }

    pub fn phase(&self) -> SessionPhase {
        self.state.phase
    }

    pub fn is_playing(&self) -> bool {
        self.state.is_playing()
    }

    pub fn outcome(&self) -> Option<SessionOutcome> {
        self.state.outcome()
    }

    pub fn player_id(&self) -> EntityId {
        self.player
    }

    /// The player craft; gone once the session has ended
    pub fn player(&self) -> Option<&Entity> {
        self.registry.get(self.player)
    }

    pub fn player_mut(&mut self) -> Option<&mut Entity> {
        self.registry.get_mut(self.player)
    }

    /// Hand queued events to the presentation layer
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.state.events)
    }

    /// Staggered spawns not yet fired
    pub fn pending_spawns(&self) -> usize {
        self.pending.len()
    }

    /// Create a requested entity, unless the session is over
    pub fn apply_spawn(&mut self, req: &SpawnRequest) -> Option<EntityId> {
        if !self.is_playing() {
            return None;
        }
        Some(self.registry.spawn(req.class, req.pos, req.vel))
    }

    /// One firing of the spawn timer: plan, spawn or schedule, then shorten the interval
    pub fn run_spawn_cycle(&mut self) {
        if !self.is_playing() {
            return;
        }

        let scale = self.timer.speed_scale(self.tuning.max_speed_scale);
        let plan = plan_cycle(&self.variant, &self.tuning, &mut self.rng, scale);
        log::debug!(
            "Spawn cycle {} on {}: {} entities, interval {}ms",
            self.timer.cycles + 1,
            self.variant.id.as_str(),
            plan.len(),
            self.timer.interval_ms
        );

        for req in plan {
            if req.delay_ms > 0.0 {
                self.pending.schedule_once(req.delay_ms, req);
            } else {
                self.apply_spawn(&req);
            }
        }

        self.timer.complete_cycle();
        self.state.record_spawn_cycle();
    }

    /// Advance the stagger clock and spawn whatever came due
    pub(crate) fn fire_pending(&mut self, dt_ms: f32) {
        for req in self.pending.advance(dt_ms) {
            // Liveness guard: the session may have ended since scheduling
            if self.apply_spawn(&req).is_none() {
                break;
            }
        }
    }

    /// Drop everything that could still act on an ended session
    pub(crate) fn shut_down(&mut self) {
        self.pending.clear();
        self.registry.clear();
        log::info!(
            "Session over after {} spawn cycles ({} ticks)",
            self.state.elapsed_spawn_cycles,
            self.time_ticks
        );
    }
}
