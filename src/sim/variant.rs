//! Level variants
//!
//! The three levels differ only in data: spawn layout, whether debris spawns,
//! the background, and how fast obstacles fall.

use serde::{Deserialize, Serialize};

use crate::consts::OBSTACLE_SPEED;

/// Which level a session was started from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VariantId {
    Level1,
    Level2,
    Level3,
}

impl VariantId {
    pub const ALL: [VariantId; 3] = [VariantId::Level1, VariantId::Level2, VariantId::Level3];

    pub fn as_str(&self) -> &'static str {
        match self {
            VariantId::Level1 => "level1",
            VariantId::Level2 => "level2",
            VariantId::Level3 => "level3",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "level1" | "1" => Some(VariantId::Level1),
            "level2" | "2" => Some(VariantId::Level2),
            "level3" | "3" => Some(VariantId::Level3),
            _ => None,
        }
    }

    /// The built-in ruleset for this level
    pub fn preset(&self) -> LevelVariant {
        match self {
            VariantId::Level1 => LevelVariant {
                id: *self,
                layout: SpawnLayout::Scatter,
                debris_enabled: false,
                background: "space".to_string(),
                obstacle_speed: OBSTACLE_SPEED,
            },
            VariantId::Level2 => LevelVariant {
                id: *self,
                layout: SpawnLayout::Scatter,
                debris_enabled: true,
                background: "debris_field".to_string(),
                obstacle_speed: OBSTACLE_SPEED,
            },
            VariantId::Level3 => LevelVariant {
                id: *self,
                layout: SpawnLayout::Row,
                debris_enabled: false,
                background: "barrier".to_string(),
                obstacle_speed: OBSTACLE_SPEED,
            },
        }
    }
}

/// Spawn algorithm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpawnLayout {
    /// 1-3 obstacles at random x, plus random pickups
    Scatter,
    /// Full row of obstacles with one two-slot gap holding a star
    Row,
}

/// Immutable per-session ruleset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelVariant {
    pub id: VariantId,
    pub layout: SpawnLayout,
    /// Scatter levels only
    #[serde(default)]
    pub debris_enabled: bool,
    /// Background asset key for the presentation layer
    pub background: String,
    /// Base fall speed (world units / s)
    pub obstacle_speed: f32,
}

impl Default for LevelVariant {
    fn default() -> Self {
        VariantId::Level1.preset()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_match_ids() {
        for id in VariantId::ALL {
            assert_eq!(id.preset().id, id);
            assert_eq!(VariantId::from_str(id.as_str()), Some(id));
        }
        assert_eq!(VariantId::from_str("bogus"), None);
    }

    #[test]
    fn test_only_row_level_uses_row_layout() {
        assert_eq!(VariantId::Level1.preset().layout, SpawnLayout::Scatter);
        assert_eq!(VariantId::Level3.preset().layout, SpawnLayout::Row);
        assert!(VariantId::Level2.preset().debris_enabled);
        assert!(!VariantId::Level3.preset().debris_enabled);
    }

    #[test]
    fn test_variant_json_roundtrip_keeps_identity() {
        let json = serde_json::to_string(&VariantId::Level2.preset()).unwrap();
        let back: LevelVariant = serde_json::from_str(&json).unwrap();
        assert_eq!(back, VariantId::Level2.preset());
    }
}
