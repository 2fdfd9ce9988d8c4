use crate::combat::screen_name;
use crate::entity::{Band, Binder, Component, EntityRef, Propagation, Receiver};
use crate::event::{
    CompileAttack, Equip, GetAttackRange, GetEquipSlot, GetStatList, ResistDamage,
};

use super::{ComponentKind, ComponentSnapshot};

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::EnumIter,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EquipSlot {
    Weapon,
    Armor,
}

/// Marks an item as wearable in one slot.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Equipable {
    pub slot: EquipSlot,
}

impl Equipable {
    pub fn new(slot: EquipSlot) -> Self {
        Self { slot }
    }

    fn on_get_slot(rx: &Receiver<'_, Self>, event: &mut GetEquipSlot) -> Propagation {
        event.slot = Some(rx.state().slot);
        Propagation::Continue
    }
}

impl Component for Equipable {
    const KIND: ComponentKind = ComponentKind::Equipable;

    fn on_attach(binder: &mut Binder<'_, Self>) {
        binder.on(Band::Baseline, Self::on_get_slot);
    }

    fn duplicate(&self) -> Self {
        self.clone()
    }

    fn snapshot(&self) -> ComponentSnapshot {
        ComponentSnapshot::Equipable(self.clone())
    }
}

/// Worn items. Attack compilation and range queries are forwarded to the
/// weapon entity, resistance queries to the armor entity, so their own units
/// contribute as if they were attached to the wearer.
#[derive(Clone, Debug, Default)]
pub struct Equipment {
    weapon: Option<EntityRef>,
    armor: Option<EntityRef>,
}

impl Equipment {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn holding(weapon: Option<EntityRef>, armor: Option<EntityRef>) -> Self {
        Self { weapon, armor }
    }

    pub fn weapon(&self) -> Option<&EntityRef> {
        self.weapon.as_ref()
    }

    pub fn armor(&self) -> Option<&EntityRef> {
        self.armor.as_ref()
    }

    fn on_equip(rx: &Receiver<'_, Self>, event: &mut Equip) -> Propagation {
        let Some(item) = event.item.clone() else {
            return Propagation::Continue;
        };
        let Some(slot) = item.emit(rx.env(), GetEquipSlot::default()).slot else {
            return Propagation::Continue;
        };
        let mut worn = rx.state_mut();
        let target = match slot {
            EquipSlot::Weapon => &mut worn.weapon,
            EquipSlot::Armor => &mut worn.armor,
        };
        event.replaced = target.replace(item);
        event.was_equipped = true;
        Propagation::Continue
    }

    fn on_compile(rx: &Receiver<'_, Self>, event: &mut CompileAttack) -> Propagation {
        let weapon = rx.state().weapon.clone();
        if let Some(weapon) = weapon {
            weapon.forward(rx.env(), event);
        }
        Propagation::Continue
    }

    fn on_get_range(rx: &Receiver<'_, Self>, event: &mut GetAttackRange) -> Propagation {
        let weapon = rx.state().weapon.clone();
        if let Some(weapon) = weapon {
            weapon.forward(rx.env(), event);
        }
        Propagation::Continue
    }

    fn on_resist(rx: &Receiver<'_, Self>, event: &mut ResistDamage) -> Propagation {
        let armor = rx.state().armor.clone();
        if let Some(armor) = armor {
            armor.forward(rx.env(), event);
        }
        Propagation::Continue
    }

    fn on_stat_list(rx: &Receiver<'_, Self>, event: &mut GetStatList) -> Propagation {
        let (weapon, armor) = {
            let worn = rx.state();
            (worn.weapon.clone(), worn.armor.clone())
        };
        if let Some(weapon) = weapon {
            let name = screen_name(rx.env(), &weapon);
            event.stats.push(format!("wielding    = {name}"));
        }
        if let Some(armor) = armor {
            let name = screen_name(rx.env(), &armor);
            event.stats.push(format!("wearing     = {name}"));
        }
        Propagation::Continue
    }
}

impl Component for Equipment {
    const KIND: ComponentKind = ComponentKind::Equipment;

    fn on_attach(binder: &mut Binder<'_, Self>) {
        binder.on(Band::Baseline, Self::on_equip);
        binder.on(Band::Primary, Self::on_compile);
        binder.on(Band::Baseline, Self::on_get_range);
        binder.on(Band::Primary, Self::on_resist);
        binder.on(Band::Detail, Self::on_stat_list);
    }

    /// Worn items belong to the instance, not the prototype.
    fn duplicate(&self) -> Self {
        Self::default()
    }

    fn snapshot(&self) -> ComponentSnapshot {
        ComponentSnapshot::Equipment {
            weapon: self.weapon.as_ref().map(|weapon| weapon.snapshot()),
            armor: self.armor.as_ref().map(|armor| armor.snapshot()),
        }
    }
}
