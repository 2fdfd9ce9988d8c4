use game_core::DamageType;
use game_core::components::{
    Attribute, EquipSlot, Equipable, Physics, RangedWeapon, Render, Resistance, Weapon,
};
use game_core::entity::Entity;

pub(super) fn brass_key(entity: &Entity) {
    entity.attach(Physics::new(1, 1, 1, false));
    entity.attach(Render::new('-', "Brass Key", 1));
}

pub(super) fn sword(entity: &Entity) {
    entity.attach(Physics::new(1, 8, 2, false));
    entity.attach(Render::new('|', "Sword", 1));
    entity.attach(Weapon::new(DamageType::Physical, Attribute::Blades, 6));
    entity.attach(Equipable::new(EquipSlot::Weapon));
}

pub(super) fn bow(entity: &Entity) {
    entity.attach(Physics::new(1, 4, 2, false));
    entity.attach(Render::new(')', "Bow", 1));
    entity.attach(Weapon::new(DamageType::Physical, Attribute::Bows, 4));
    entity.attach(RangedWeapon::new(6));
    entity.attach(Equipable::new(EquipSlot::Weapon));
}

/// Heavy enough to hurt when thrown.
pub(super) fn rock(entity: &Entity) {
    entity.attach(Physics::new(1, 20, 1, false));
    entity.attach(Render::new('*', "Rock", 1));
}

pub(super) fn leather_armor(entity: &Entity) {
    entity.attach(Physics::new(1, 15, 3, false));
    entity.attach(Render::new('[', "Leather Armor", 1));
    entity.attach(Resistance::new(DamageType::Physical));
    entity.attach(Equipable::new(EquipSlot::Armor));
}
