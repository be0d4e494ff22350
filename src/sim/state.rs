//! Session state machine
//!
//! Score, health and phase for one play of a level. Every mutation is guarded
//! on `phase == Playing`, so an ended session is frozen.

use serde::{Deserialize, Serialize};

use super::variant::VariantId;
use crate::present::SoundCue;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Active gameplay
    Playing,
    /// Health ran out; terminal for this session instance
    Ended,
}

/// Terminal result handed to the results screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionOutcome {
    pub final_score: u32,
    /// Level the session was played on, for "retry same level"
    pub variant: VariantId,
}

/// Things the presentation layer should react to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    Sound(SoundCue),
    ScoreChanged(u32),
    HealthChanged(u32),
    Ended(SessionOutcome),
}

/// Score/health bookkeeping for one session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionState {
    pub score: u32,
    pub health: u32,
    pub phase: SessionPhase,
    pub elapsed_spawn_cycles: u32,
    pub variant: VariantId,
    starting_health: u32,
    max_health: Option<u32>,
    /// Pending events (drained by the presentation layer)
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl SessionState {
    /// A session always starts alive: `starting_health` below 1 counts as 1
    pub fn new(variant: VariantId, starting_health: u32, max_health: Option<u32>) -> Self {
        let starting_health = starting_health.max(1);
        Self {
            score: 0,
            health: starting_health,
            phase: SessionPhase::Playing,
            elapsed_spawn_cycles: 0,
            variant,
            starting_health,
            max_health,
            events: Vec::new(),
        }
    }

    pub fn is_playing(&self) -> bool {
        self.phase == SessionPhase::Playing
    }

    /// Lose health; reaching zero ends the session
    pub fn take_damage(&mut self, amount: u32) {
        if !self.is_playing() || amount == 0 {
            return;
        }
        self.health = self.health.saturating_sub(amount);
        self.events.push(GameEvent::HealthChanged(self.health));

        if self.health == 0 {
            self.phase = SessionPhase::Ended;
            let outcome = SessionOutcome {
                final_score: self.score,
                variant: self.variant,
            };
            log::info!(
                "Session ended on {} with score {}",
                self.variant.as_str(),
                self.score
            );
            self.events.push(GameEvent::Ended(outcome));
        }
    }

    /// Add score while playing
    pub fn collect_score(&mut self, amount: u32) {
        if !self.is_playing() {
            return;
        }
        self.score = self.score.saturating_add(amount);
        self.events.push(GameEvent::ScoreChanged(self.score));
    }

    /// Add health while playing, respecting the optional cap
    pub fn collect_heart(&mut self, amount: u32) {
        if !self.is_playing() {
            return;
        }
        let raised = self.health.saturating_add(amount);
        self.health = match self.max_health {
            Some(max) => raised.min(max.max(self.health)),
            None => raised,
        };
        self.events.push(GameEvent::HealthChanged(self.health));
    }

    /// Count one spawn cycle
    pub fn record_spawn_cycle(&mut self) {
        if self.is_playing() {
            self.elapsed_spawn_cycles += 1;
        }
    }

    /// Back to a fresh session on the same level
    pub fn reset(&mut self) {
        self.score = 0;
        self.health = self.starting_health;
        self.phase = SessionPhase::Playing;
        self.elapsed_spawn_cycles = 0;
        self.events.clear();
        self.events.push(GameEvent::ScoreChanged(0));
        self.events.push(GameEvent::HealthChanged(self.health));
    }

    /// Terminal result, once ended
    pub fn outcome(&self) -> Option<SessionOutcome> {
        match self.phase {
            SessionPhase::Playing => None,
            SessionPhase::Ended => Some(SessionOutcome {
                final_score: self.score,
                variant: self.variant,
            }),
        }
    }
}
