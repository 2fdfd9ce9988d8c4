//! Collaborators the rules call out to.
//!
//! Capability units never reach a world, a log or a prototype catalog
//! directly. Every dispatch carries a [`GameEnv`] bundling the collaborators
//! for the current world, so the same entity graph can run against a real
//! level, a test double, or nothing at all ([`GameEnv::empty`]).
mod error;
mod map;

pub use error::EnvError;
pub use map::{MapDimensions, SpatialIndex, TerrainKind, line_between};

use std::fmt;

use crate::combat::CombatTables;
use crate::entity::EntityRef;
use crate::narration::Line;

/// Narration collaborator (message log).
pub trait Narrator {
    /// Records one balanced markup line. `origin` lets the presentation layer
    /// filter lines about entities the player cannot see.
    fn narrate(&self, line: Line, origin: Option<&EntityRef>);
}

/// Instantiation collaborator: builds entities from named prototypes.
pub trait EntityFactory {
    fn instantiate(&self, prototype: &str) -> Result<EntityRef, EnvError>;
}

static STANDARD_TABLES: CombatTables = CombatTables::STANDARD;

/// Aggregates the collaborators handed to every dispatch.
#[derive(Clone, Copy)]
pub struct GameEnv<'a> {
    map: Option<&'a dyn SpatialIndex>,
    factory: Option<&'a dyn EntityFactory>,
    narrator: Option<&'a dyn Narrator>,
    tables: &'a CombatTables,
}

impl<'a> GameEnv<'a> {
    pub fn new(
        map: Option<&'a dyn SpatialIndex>,
        factory: Option<&'a dyn EntityFactory>,
        narrator: Option<&'a dyn Narrator>,
        tables: &'a CombatTables,
    ) -> Self {
        Self {
            map,
            factory,
            narrator,
            tables,
        }
    }

    pub fn with_all(
        map: &'a dyn SpatialIndex,
        factory: &'a dyn EntityFactory,
        narrator: &'a dyn Narrator,
        tables: &'a CombatTables,
    ) -> Self {
        Self::new(Some(map), Some(factory), Some(narrator), tables)
    }

    /// An environment with no collaborators and the standard tables.
    ///
    /// Spatial and instantiation requests fail, narration is discarded.
    pub fn empty() -> Self {
        Self {
            map: None,
            factory: None,
            narrator: None,
            tables: &STANDARD_TABLES,
        }
    }

    #[must_use]
    pub fn with_narrator(mut self, narrator: &'a dyn Narrator) -> Self {
        self.narrator = Some(narrator);
        self
    }

    #[must_use]
    pub fn with_map(mut self, map: &'a dyn SpatialIndex) -> Self {
        self.map = Some(map);
        self
    }

    #[must_use]
    pub fn with_factory(mut self, factory: &'a dyn EntityFactory) -> Self {
        self.factory = Some(factory);
        self
    }

    /// Returns the spatial index, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `EnvError::MapNotAvailable` if no spatial index was provided.
    pub fn map(&self) -> Result<&'a dyn SpatialIndex, EnvError> {
        self.map.ok_or(EnvError::MapNotAvailable)
    }

    /// Returns the entity factory, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `EnvError::FactoryNotAvailable` if no factory was provided.
    pub fn factory(&self) -> Result<&'a dyn EntityFactory, EnvError> {
        self.factory.ok_or(EnvError::FactoryNotAvailable)
    }

    pub fn tables(&self) -> &'a CombatTables {
        self.tables
    }

    /// Forwards a line to the narrator, if any.
    pub fn narrate(&self, line: Line, origin: Option<&EntityRef>) {
        if let Some(narrator) = self.narrator {
            narrator.narrate(line, origin);
        }
    }

    pub fn instantiate(&self, prototype: &str) -> Result<EntityRef, EnvError> {
        self.factory()?.instantiate(prototype)
    }
}

impl fmt::Debug for GameEnv<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameEnv")
            .field("map", &self.map.is_some())
            .field("factory", &self.factory.is_some())
            .field("narrator", &self.narrator.is_some())
            .finish_non_exhaustive()
    }
}
