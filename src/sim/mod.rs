//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod collision;
pub mod entity;
pub mod physics;
pub mod ramp;
pub mod schedule;
pub mod session;
pub mod spawn;
pub mod state;
pub mod tick;
pub mod variant;

pub use collision::{Interaction, ResolveReport, interaction, resolve};
pub use entity::{Entity, EntityClass, EntityId, EntityRegistry, PickupKind};
pub use physics::{Aabb, Contact, find_overlaps};
pub use ramp::SpawnTimer;
pub use schedule::Scheduler;
pub use session::Session;
pub use spawn::{DEBRIS_ODDS, HEART_ODDS, RollOdds, STAR_ODDS, SpawnRequest, plan_cycle};
pub use state::{GameEvent, SessionOutcome, SessionPhase, SessionState};
pub use tick::{TickInput, autopilot, tick};
pub use variant::{LevelVariant, SpawnLayout, VariantId};
