use crate::combat::DamageType;
use crate::entity::{Band, Binder, Component, Propagation, Receiver};
use crate::event::{CompileAttack, GetAttackRange, GetStatList};
use crate::state::Vec2;

use super::{Attribute, ComponentKind, ComponentSnapshot};

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Weapon {
    pub damage_type: DamageType,
    pub attribute: Attribute,
    pub base_damage: i32,
}

impl Weapon {
    pub fn new(damage_type: DamageType, attribute: Attribute, base_damage: i32) -> Self {
        Self {
            damage_type,
            attribute,
            base_damage,
        }
    }

    /// Adds base damage and stamps the weapon and its damage type on the attack.
    fn on_compile(rx: &Receiver<'_, Self>, event: &mut CompileAttack) -> Propagation {
        let weapon = rx.state();
        event.combat.add_damage(weapon.base_damage);
        event.combat.set_weapon(rx.owner());
        event.combat.set_damage_type(weapon.damage_type);
        Propagation::Continue
    }

    fn on_stat_list(rx: &Receiver<'_, Self>, event: &mut GetStatList) -> Propagation {
        let weapon = rx.state();
        event
            .stats
            .push(format!("damage type = {}", weapon.damage_type));
        event.stats.push(format!("attribute   = {}", weapon.attribute));
        event
            .stats
            .push(format!("base damage = {}", weapon.base_damage));
        Propagation::Continue
    }
}

impl Component for Weapon {
    const KIND: ComponentKind = ComponentKind::Weapon;

    fn on_attach(binder: &mut Binder<'_, Self>) {
        binder.on(Band::Primary, Self::on_stat_list);
        binder.on(Band::Baseline, Self::on_compile);
    }

    fn duplicate(&self) -> Self {
        self.clone()
    }

    fn snapshot(&self) -> ComponentSnapshot {
        ComponentSnapshot::Weapon(self.clone())
    }
}

/// Extends reach and refuses attacks beyond it.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RangedWeapon {
    pub max_range: i32,
}

impl RangedWeapon {
    pub fn new(max_range: i32) -> Self {
        Self { max_range }
    }

    /// Cancels the attack when the defender is farther from the attacker than
    /// the weapon reaches.
    fn on_compile(rx: &Receiver<'_, Self>, event: &mut CompileAttack) -> Propagation {
        let (Some(attacker), Some(defender)) = (event.combat.attacker(), event.combat.defender())
        else {
            return Propagation::Continue;
        };
        let displacement = Vec2::from(defender.position() - attacker.position());
        if displacement.magnitude() > rx.state().max_range as f32 {
            event.combat.cancel();
            return Propagation::Stop;
        }
        Propagation::Continue
    }

    fn on_get_range(rx: &Receiver<'_, Self>, event: &mut GetAttackRange) -> Propagation {
        event.range = event.range.max(rx.state().max_range);
        Propagation::Continue
    }

    fn on_stat_list(rx: &Receiver<'_, Self>, event: &mut GetStatList) -> Propagation {
        event
            .stats
            .push(format!("max range   = {}", rx.state().max_range));
        Propagation::Continue
    }
}

impl Component for RangedWeapon {
    const KIND: ComponentKind = ComponentKind::RangedWeapon;

    fn on_attach(binder: &mut Binder<'_, Self>) {
        binder.on(Band::Detail, Self::on_stat_list);
        binder.on(Band::Intercept, Self::on_compile);
        binder.on(Band::Baseline, Self::on_get_range);
    }

    fn duplicate(&self) -> Self {
        self.clone()
    }

    fn snapshot(&self) -> ComponentSnapshot {
        ComponentSnapshot::RangedWeapon(self.clone())
    }
}
