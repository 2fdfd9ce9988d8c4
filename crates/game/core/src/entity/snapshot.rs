use crate::components::ComponentSnapshot;
use crate::state::{EntityId, Position};

use super::{Entity, EntityRef};

/// Introspectable record of an entity and all of its units.
///
/// Registrations are not part of a snapshot. Restoring re-attaches every
/// unit, which rebuilds them.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntitySnapshot {
    pub id: EntityId,
    pub name: String,
    pub position: Position,
    pub components: Vec<ComponentSnapshot>,
}

impl Entity {
    pub fn snapshot(&self) -> EntitySnapshot {
        EntitySnapshot {
            id: self.id,
            name: self.name.clone(),
            position: self.position(),
            components: self
                .components
                .borrow()
                .iter()
                .map(|component| component.snapshot())
                .collect(),
        }
    }

    /// Rebuilds an entity from a snapshot, attaching units in recorded order.
    pub fn restore(snapshot: &EntitySnapshot) -> EntityRef {
        let entity = Entity::new(snapshot.id, snapshot.name.clone());
        entity.set_position(snapshot.position);
        for component in &snapshot.components {
            component.restore_onto(&entity);
        }
        entity
    }
}
