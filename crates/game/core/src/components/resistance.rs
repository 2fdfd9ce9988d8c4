use crate::combat::{DamageType, rules};
use crate::entity::{Band, Binder, Component, Propagation, Receiver};
use crate::event::{DoDamage, GetResistance, GetStatList, ResistDamage};

use super::{ComponentKind, ComponentSnapshot};

/// Elemental nature of a body. Contributes to every `ResistDamage` aggregation.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Resistance {
    pub resist_type: DamageType,
}

impl Resistance {
    pub fn new(resist_type: DamageType) -> Self {
        Self { resist_type }
    }

    fn on_resist(rx: &Receiver<'_, Self>, event: &mut ResistDamage) -> Propagation {
        let resist_type = rx.state().resist_type;
        let (resistance, effectiveness) = rules::resistance_contribution(
            event.damage_type,
            event.base_damage,
            Some(resist_type),
            rx.env().tables(),
        );
        event.resistance += resistance;
        event.effectiveness += effectiveness;
        Propagation::Continue
    }

    fn on_get_resistance(rx: &Receiver<'_, Self>, event: &mut GetResistance) -> Propagation {
        event.resist_type = Some(rx.state().resist_type);
        Propagation::Continue
    }

    fn on_stat_list(rx: &Receiver<'_, Self>, event: &mut GetStatList) -> Propagation {
        event
            .stats
            .push(format!("resistance  = {}", rx.state().resist_type));
        Propagation::Continue
    }
}

impl Component for Resistance {
    const KIND: ComponentKind = ComponentKind::Resistance;

    fn on_attach(binder: &mut Binder<'_, Self>) {
        binder.on(Band::Primary, Self::on_resist);
        binder.on(Band::Baseline, Self::on_get_resistance);
        binder.on(Band::Detail, Self::on_stat_list);
    }

    fn duplicate(&self) -> Self {
        self.clone()
    }

    fn snapshot(&self) -> ComponentSnapshot {
        ComponentSnapshot::Resistance(self.clone())
    }
}

/// Zeroes incoming damage before anything else sees it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Invulnerable;

impl Invulnerable {
    fn on_damage(_rx: &Receiver<'_, Self>, event: &mut DoDamage) -> Propagation {
        event.damage = 0;
        Propagation::Stop
    }
}

impl Component for Invulnerable {
    const KIND: ComponentKind = ComponentKind::Invulnerable;

    fn on_attach(binder: &mut Binder<'_, Self>) {
        binder.on(Band::Intercept, Self::on_damage);
    }

    fn duplicate(&self) -> Self {
        Invulnerable
    }

    fn snapshot(&self) -> ComponentSnapshot {
        ComponentSnapshot::Invulnerable
    }
}
