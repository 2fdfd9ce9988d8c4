//! Static game content.
//!
//! - [`prototypes`]: the standard prototype set, one builder per [`Prototype`]
//! - [`catalog`]: named prototypes plus the instantiation collaborator
//!
//! Prototypes never enter a world. Every live entity is a structural copy made
//! through [`Catalog`], which implements [`game_core::EntityFactory`].

pub mod catalog;
pub mod prototypes;

pub use catalog::Catalog;
pub use prototypes::{LOOT, Prototype, teams};
