//! Game balance values
//!
//! Defaults reproduce the shipped game. A JSON file can override any subset.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Failure to load a tuning file
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning: {0}")]
    Invalid(String),
}

/// Data-driven balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Player ===
    /// Per-axis speed cap
    pub player_max_speed: f32,
    /// Deceleration on axes with no input
    pub player_drag: f32,
    /// Acceleration while a direction key is held
    pub player_acceleration: f32,
    /// Health at session start
    pub starting_health: u32,
    /// Optional heart cap; `None` means hearts always add health
    pub max_health: Option<u32>,

    // === Spawn timer ===
    pub spawn_interval_ms: f32,
    pub spawn_floor_ms: f32,
    pub spawn_decay_ms: f32,
    /// Gap between staggered obstacles inside one cycle
    pub stagger_ms: f32,

    /// Fall speed multiplier reached when the ramp hits its floor (1.0 = constant)
    pub max_speed_scale: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            player_max_speed: PLAYER_MAX_SPEED,
            player_drag: PLAYER_DRAG,
            player_acceleration: PLAYER_ACCELERATION,
            starting_health: PLAYER_HEALTH,
            max_health: None,

            spawn_interval_ms: SPAWN_INTERVAL_MS,
            spawn_floor_ms: SPAWN_FLOOR_MS,
            spawn_decay_ms: SPAWN_DECAY_MS,
            stagger_ms: STAGGER_MS,

            max_speed_scale: 1.0,
        }
    }
}

impl Tuning {
    /// Parse and validate a JSON document; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load from a JSON file on disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Reject values that would break the session invariants
    pub fn validate(&self) -> Result<(), TuningError> {
        let invalid = |msg: String| Err(TuningError::Invalid(msg));

        if !(self.spawn_interval_ms > 0.0) {
            return invalid(format!(
                "spawn_interval_ms must be positive, got {}",
                self.spawn_interval_ms
            ));
        }
        if !(self.spawn_floor_ms > 0.0) {
            return invalid(format!(
                "spawn_floor_ms must be positive, got {}",
                self.spawn_floor_ms
            ));
        }
        if self.spawn_floor_ms > self.spawn_interval_ms {
            return invalid(format!(
                "spawn_floor_ms ({}) exceeds spawn_interval_ms ({})",
                self.spawn_floor_ms, self.spawn_interval_ms
            ));
        }
        if !(self.spawn_decay_ms >= 0.0) {
            return invalid(format!(
                "spawn_decay_ms must not be negative, got {}",
                self.spawn_decay_ms
            ));
        }
        if !(self.stagger_ms >= 0.0) {
            return invalid(format!(
                "stagger_ms must not be negative, got {}",
                self.stagger_ms
            ));
        }
        if self.starting_health == 0 {
            return invalid("starting_health must be at least 1".to_string());
        }
        if let Some(max) = self.max_health {
            if max < self.starting_health {
                return invalid(format!(
                    "max_health ({max}) is below starting_health ({})",
                    self.starting_health
                ));
            }
        }
        if !(self.player_max_speed > 0.0) || !(self.player_acceleration > 0.0) {
            return invalid("player speed and acceleration must be positive".to_string());
        }
        if !(self.player_drag >= 0.0) {
            return invalid(format!(
                "player_drag must not be negative, got {}",
                self.player_drag
            ));
        }
        if !(self.max_speed_scale >= 1.0) {
            return invalid(format!(
                "max_speed_scale must be at least 1.0, got {}",
                self.max_speed_scale
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let tuning = Tuning::default();
        assert!(tuning.validate().is_ok());
        assert_eq!(tuning.starting_health, 2);
        assert_eq!(tuning.spawn_interval_ms, 2000.0);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let json = r#"{ "starting_health": 5, "spawn_decay_ms": 50.0 }"#;
        let tuning = Tuning::from_json(json).unwrap();
        assert_eq!(tuning.starting_health, 5);
        assert_eq!(tuning.spawn_decay_ms, 50.0);
        assert_eq!(tuning.spawn_floor_ms, SPAWN_FLOOR_MS);
    }

    #[test]
    fn test_rejects_floor_above_interval() {
        let err = Tuning::from_json(r#"{ "spawn_interval_ms": 300.0 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid(_)));
    }

    #[test]
    fn test_rejects_zero_health_and_bad_timer() {
        assert!(matches!(
            Tuning::from_json(r#"{ "starting_health": 0 }"#),
            Err(TuningError::Invalid(_))
        ));
        assert!(matches!(
            Tuning::from_json(r#"{ "spawn_floor_ms": 0.0 }"#),
            Err(TuningError::Invalid(_))
        ));
        assert!(matches!(
            Tuning::from_json(r#"{ "spawn_decay_ms": -1.0 }"#),
            Err(TuningError::Invalid(_))
        ));
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        assert!(matches!(Tuning::from_json("{ nope"), Err(TuningError::Parse(_))));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        assert!(matches!(
            Tuning::load("/definitely/not/here/tuning.json"),
            Err(TuningError::Io(_))
        ));
    }
}
