use tracing::trace;

use crate::combat::{resolve_attack, resolve_throw};
use crate::config::GameConfig;
use crate::entity::{Band, Binder, Component, Propagation, Receiver};
use crate::event::{DoAttack, GetAttackRange, ThrowItem};

use super::{ComponentKind, ComponentSnapshot};

/// Lets an entity start attacks and throws. `strength` is the base damage
/// before weapons and skills contribute.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Attack {
    pub strength: i32,
}

impl Attack {
    pub fn new(strength: i32) -> Self {
        Self { strength }
    }

    fn on_attack(rx: &Receiver<'_, Self>, event: &mut DoAttack) -> Propagation {
        let Some(target) = event.target.clone() else {
            return Propagation::Continue;
        };
        let owner = rx.owner();
        let env = rx.env();

        let range = owner.emit(env, GetAttackRange::default()).range;
        let distance = owner.position().taxi_distance(target.position());
        if distance > GameConfig::MELEE_REACH && distance > range {
            trace!(
                target: "game_core::combat",
                attacker = %owner.id(),
                defender = %target.id(),
                distance,
                range,
                "out of reach"
            );
            return Propagation::Continue;
        }

        let strength = rx.state().strength;
        event.outcome = resolve_attack(env, owner, &target, strength);
        Propagation::Continue
    }

    fn on_throw(rx: &Receiver<'_, Self>, event: &mut ThrowItem) -> Propagation {
        event.outcome = resolve_throw(rx.env(), rx.owner(), &event.item_name, event.target);
        Propagation::Continue
    }
}

impl Component for Attack {
    const KIND: ComponentKind = ComponentKind::Attack;

    fn on_attach(binder: &mut Binder<'_, Self>) {
        binder.on(Band::Baseline, Self::on_attack);
        binder.on(Band::Baseline, Self::on_throw);
    }

    fn duplicate(&self) -> Self {
        self.clone()
    }

    fn snapshot(&self) -> ComponentSnapshot {
        ComponentSnapshot::Attack(self.clone())
    }
}
