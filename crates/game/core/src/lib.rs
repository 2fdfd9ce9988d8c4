//! Entity, component and event runtime for a turn-based dungeon, plus the
//! combat pipeline built on it.
//!
//! Entities are bags of independent capability units that never reference one
//! another. Units register handlers on their owner's per-event chains and
//! cooperate by rewriting mutable event payloads as they pass down a chain
//! sorted by priority. All gameplay (damage, resistance, locks, equipment,
//! skills, AI) is expressed that way.
//!
//! `game-core` performs no I/O. The map, the message log and the prototype
//! catalog are collaborators reached through [`env::GameEnv`].
pub mod combat;
pub mod components;
pub mod config;
pub mod entity;
pub mod env;
pub mod error;
pub mod event;
pub mod narration;
pub mod scheduler;
pub mod state;

pub use combat::{
    CombatInstance, CombatOutcome, CombatTables, DamageType, Effectiveness, ThrowOutcome,
};
pub use components::{ComponentKind, ComponentSnapshot};
pub use config::GameConfig;
pub use entity::{
    Band, Component, Entity, EntityRef, EntitySnapshot, Priority, Propagation,
};
pub use env::{EntityFactory, EnvError, GameEnv, MapDimensions, Narrator, SpatialIndex, TerrainKind};
pub use error::{ErrorSeverity, GameError};
pub use event::{Event, EventTag, Payload};
pub use narration::{Line, Tone};
pub use scheduler::{CycleReport, TurnScheduler};
pub use state::{CardinalDirection, EntityId, Position, Vec2};
