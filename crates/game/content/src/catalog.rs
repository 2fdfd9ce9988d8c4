//! Named prototypes and instantiation by structural copy.

use std::cell::Cell;
use std::collections::BTreeMap;

use strum::IntoEnumIterator;
use tracing::debug;

use game_core::{EntityFactory, EntityId, EntityRef, EnvError};

use crate::prototypes::Prototype;

/// Prototype registry keyed by prototype name.
///
/// Instances get sequential ids starting at [`Catalog::FIRST_INSTANCE_ID`];
/// id 0 is left for the player, who is instantiated with an explicit id.
#[derive(Debug)]
pub struct Catalog {
    prototypes: BTreeMap<String, EntityRef>,
    next_id: Cell<u32>,
}

impl Catalog {
    pub const FIRST_INSTANCE_ID: u32 = 1;

    /// An empty catalog.
    pub fn new() -> Self {
        Self {
            prototypes: BTreeMap::new(),
            next_id: Cell::new(Self::FIRST_INSTANCE_ID),
        }
    }

    /// A catalog holding every [`Prototype`].
    pub fn standard() -> Self {
        let mut catalog = Self::new();
        for prototype in Prototype::iter() {
            catalog.register(prototype.build());
        }
        catalog
    }

    /// Registers `prototype` under its own name, returning any prototype it
    /// replaced.
    pub fn register(&mut self, prototype: EntityRef) -> Option<EntityRef> {
        self.prototypes
            .insert(prototype.name().to_string(), prototype)
    }

    pub fn prototype(&self, name: &str) -> Option<&EntityRef> {
        self.prototypes.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.prototypes.contains_key(name)
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.prototypes.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.prototypes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prototypes.is_empty()
    }

    /// Reserves the next instance id.
    pub fn allocate_id(&self) -> EntityId {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        EntityId(id)
    }

    /// Makes sure later ids are allocated above `id`.
    pub fn reserve_through(&self, id: EntityId) {
        if !id.is_prototype() && id.0 >= self.next_id.get() {
            self.next_id.set(id.0 + 1);
        }
    }

    /// Copies the named prototype into a new entity with the given id.
    ///
    /// # Errors
    ///
    /// Returns `EnvError::UnknownPrototype` if no prototype has that name.
    pub fn instantiate_with_id(&self, name: &str, id: EntityId) -> Result<EntityRef, EnvError> {
        let prototype = self
            .prototypes
            .get(name)
            .ok_or_else(|| EnvError::UnknownPrototype(name.to_string()))?;
        let instance = prototype.instantiate(id);
        debug!(target: "game_content::catalog", prototype = name, %id, "instantiated");
        Ok(instance)
    }

    /// Instantiates a standard prototype with the next free id.
    ///
    /// # Errors
    ///
    /// Returns `EnvError::UnknownPrototype` if `prototype` was not registered.
    pub fn spawn(&self, prototype: Prototype) -> Result<EntityRef, EnvError> {
        self.instantiate(prototype.as_ref())
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

impl EntityFactory for Catalog {
    fn instantiate(&self, prototype: &str) -> Result<EntityRef, EnvError> {
        self.instantiate_with_id(prototype, self.allocate_id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::components::Physics;
    use game_core::event::DoDamage;
    use game_core::{ComponentKind, GameEnv};

    fn health(entity: &EntityRef) -> i32 {
        entity
            .get::<Physics>()
            .map(|body| body.state().health)
            .unwrap_or_default()
    }

    #[test]
    fn standard_catalog_registers_every_prototype() {
        let catalog = Catalog::standard();
        assert_eq!(catalog.len(), Prototype::iter().count());
        for prototype in Prototype::iter() {
            assert!(catalog.contains(prototype.as_ref()));
        }
        assert!(Catalog::new().is_empty());
    }

    #[test]
    fn unknown_prototype_is_an_error() {
        let catalog = Catalog::standard();
        let missing = catalog.instantiate("Dragon");
        assert_eq!(
            missing.err(),
            Some(EnvError::UnknownPrototype("Dragon".to_string()))
        );
    }

    #[test]
    fn instances_get_sequential_ids() {
        let catalog = Catalog::standard();
        let first = catalog.spawn(Prototype::Rat).map(|rat| rat.id());
        let second = catalog.spawn(Prototype::Rat).map(|rat| rat.id());
        assert_eq!(first, Ok(EntityId(1)));
        assert_eq!(second, Ok(EntityId(2)));

        let player = catalog.instantiate_with_id("Player", EntityId::PLAYER);
        assert!(player.is_ok_and(|player| player.id().is_player()));
    }

    #[test]
    fn instances_do_not_share_state_with_the_prototype() -> Result<(), EnvError> {
        let catalog = Catalog::standard();
        let env = GameEnv::empty();
        let goblin = catalog.spawn(Prototype::Goblin)?;
        let prototype_kinds = catalog.prototype("Goblin").map(|prototype| prototype.kinds());
        assert_eq!(Some(goblin.kinds()), prototype_kinds);

        goblin.emit(
            &env,
            DoDamage {
                damage: 12,
                ..Default::default()
            },
        );
        assert_eq!(health(&goblin), 18);
        assert_eq!(catalog.prototype("Goblin").map(health), Some(30));
        assert!(goblin.has(ComponentKind::Think));
        Ok(())
    }
}
