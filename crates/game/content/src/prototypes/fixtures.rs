use game_core::components::{Chest, Door, Inventory, Lock, Obscuring, Openable, Physics, Render};
use game_core::entity::Entity;

use super::Prototype;

pub(super) fn door(entity: &Entity) {
    entity.attach(Physics::new(100, 200, 10, true));
    entity.attach(Render::new('+', "Door", 1));
    entity.attach(Openable::new('/'));
    entity.attach(Door);
    entity.attach(Obscuring::new());
}

pub(super) fn locked_door(entity: &Entity) {
    door(entity);
    entity.attach(Lock::new(Prototype::BrassKey.as_ref()));
}

pub(super) fn chest(entity: &Entity) {
    entity.attach(Physics::new(20, 80, 6, true));
    entity.attach(Render::new('=', "Chest", 1).with_gore('_'));
    entity.attach(Inventory::new(8));
    entity.attach(Openable::new('_'));
    entity.attach(Chest);
}
