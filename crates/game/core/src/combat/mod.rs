//! Combat resolution.
//!
//! - [`damage`]: damage types and the resistance matrix
//! - [`rules`]: pure arithmetic (resistance, effectiveness, throw range)
//! - [`instance`]: the per-transaction aggregate
//! - [`pipeline`]: the staged protocol that fires events to resolve it
pub mod damage;
pub mod instance;
pub mod pipeline;
pub mod rules;
mod tables;

pub use damage::{Affinity, DamageType, ResistanceTable};
pub use instance::{CombatInstance, Contribution};
pub use pipeline::{
    CombatOutcome, ThrowOutcome, attribute_level, can_attack, compile_attack, process_combat,
    resolve_attack, resolve_throw, screen_name, skill_strength,
};
pub use rules::{Effectiveness, Resisted};
pub use tables::CombatTables;
