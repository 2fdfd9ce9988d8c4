use std::rc::Rc;

use crate::combat::{CombatInstance, skill_strength};
use crate::entity::{Band, Binder, Component, Propagation, Receiver};
use crate::event::{ApplyForce, CompileSkillEffects, GetSkillDescription};
use crate::narration::Tone;
use crate::state::Vec2;

use super::super::{ComponentKind, ComponentSnapshot};

fn scaled(strength: f32, amount: i32) -> i32 {
    (strength * amount as f32) as i32
}

// ============================================================================
// Damage / healing
// ============================================================================

/// Adds `base_damage * strength` to every affected instance.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IncreaseDamageSkill {
    pub base_damage: i32,
}

impl IncreaseDamageSkill {
    pub fn new(base_damage: i32) -> Self {
        Self { base_damage }
    }

    fn on_compile(rx: &Receiver<'_, Self>, event: &mut CompileSkillEffects) -> Propagation {
        let bonus = scaled(event.skill_strength, rx.state().base_damage);
        for combat in &mut event.combats {
            combat.add_damage(bonus);
        }
        Propagation::Continue
    }

    fn on_describe(rx: &Receiver<'_, Self>, event: &mut GetSkillDescription) -> Propagation {
        let strength = skill_strength(rx.env(), None, rx.owner());
        let bonus = scaled(strength, rx.state().base_damage);
        event.description.push_plain("Does damage ");
        event.description.push_tinted(Tone::Notice, format!("+{bonus}"));
        event.description.push_plain(". ");
        Propagation::Continue
    }
}

impl Component for IncreaseDamageSkill {
    const KIND: ComponentKind = ComponentKind::IncreaseDamageSkill;

    fn on_attach(binder: &mut Binder<'_, Self>) {
        binder.on(Band::Primary, Self::on_compile);
        binder.on(Band::Headline, Self::on_describe);
    }

    fn duplicate(&self) -> Self {
        self.clone()
    }

    fn snapshot(&self) -> ComponentSnapshot {
        ComponentSnapshot::IncreaseDamageSkill(self.clone())
    }
}

/// Adds `healing * strength` to every affected instance.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HealingSkill {
    pub healing: i32,
}

impl HealingSkill {
    pub fn new(healing: i32) -> Self {
        Self { healing }
    }

    fn on_compile(rx: &Receiver<'_, Self>, event: &mut CompileSkillEffects) -> Propagation {
        let amount = scaled(event.skill_strength, rx.state().healing);
        for combat in &mut event.combats {
            combat.set_healing(combat.healing() + amount);
        }
        Propagation::Continue
    }

    fn on_describe(rx: &Receiver<'_, Self>, event: &mut GetSkillDescription) -> Propagation {
        let strength = skill_strength(rx.env(), None, rx.owner());
        let amount = scaled(strength, rx.state().healing);
        event.description.push_plain("Heals ");
        event.description.push_tinted(Tone::Notice, format!("+{amount}"));
        event.description.push_plain(" points of damage. ");
        Propagation::Continue
    }
}

impl Component for HealingSkill {
    const KIND: ComponentKind = ComponentKind::HealingSkill;

    fn on_attach(binder: &mut Binder<'_, Self>) {
        binder.on(Band::Baseline, Self::on_compile);
        binder.on(Band::Headline, Self::on_describe);
    }

    fn duplicate(&self) -> Self {
        self.clone()
    }

    fn snapshot(&self) -> ComponentSnapshot {
        ComponentSnapshot::HealingSkill(self.clone())
    }
}

// ============================================================================
// Targeting / displacement
// ============================================================================

/// Widens the effect to everything within `radius` of the base location.
///
/// Runs before the per-instance effects so they apply to the added targets
/// too. The user and entities already targeted are skipped.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AreaOfEffectSkill {
    pub radius: f32,
}

impl AreaOfEffectSkill {
    pub fn new(radius: f32) -> Self {
        Self { radius }
    }

    fn on_compile(rx: &Receiver<'_, Self>, event: &mut CompileSkillEffects) -> Propagation {
        let Some(user) = event.user.clone() else {
            return Propagation::Continue;
        };
        let Ok(map) = rx.env().map() else {
            return Propagation::Continue;
        };
        let radius = rx.state().radius;
        for hit in map.entities_within(event.base_location, radius) {
            let already = event
                .combats
                .iter()
                .any(|combat| combat.defender().is_some_and(|d| Rc::ptr_eq(d, &hit)));
            if already || Rc::ptr_eq(&hit, &user) {
                continue;
            }
            event
                .combats
                .push(CombatInstance::new(&user, &hit).with_skill(rx.owner()));
        }
        Propagation::Continue
    }

    fn on_describe(rx: &Receiver<'_, Self>, event: &mut GetSkillDescription) -> Propagation {
        let radius = rx.state().radius as i32;
        event.description.push_plain("Hits all enemies in ");
        event.description.push_tinted(Tone::Notice, radius.to_string());
        event.description.push_plain(" tiles. ");
        Propagation::Continue
    }
}

impl Component for AreaOfEffectSkill {
    const KIND: ComponentKind = ComponentKind::AreaOfEffectSkill;

    fn on_attach(binder: &mut Binder<'_, Self>) {
        binder.on(Band::Expand, Self::on_compile);
        binder.on(Band::Preface, Self::on_describe);
    }

    fn duplicate(&self) -> Self {
        self.clone()
    }

    fn snapshot(&self) -> ComponentSnapshot {
        ComponentSnapshot::AreaOfEffectSkill(self.clone())
    }
}

/// Pushes every defender away from its attacker.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ApplyForceSkill {
    pub force: f32,
}

impl ApplyForceSkill {
    pub fn new(force: f32) -> Self {
        Self { force }
    }

    fn on_compile(rx: &Receiver<'_, Self>, event: &mut CompileSkillEffects) -> Propagation {
        let force = rx.state().force;
        for combat in &event.combats {
            let (Some(attacker), Some(defender)) = (combat.attacker(), combat.defender()) else {
                continue;
            };
            if Rc::ptr_eq(attacker, defender) {
                continue;
            }
            let direction = Vec2::from(defender.position() - attacker.position()).normalized();
            defender.emit(rx.env(), ApplyForce { direction, force });
        }
        Propagation::Continue
    }

    fn on_describe(rx: &Receiver<'_, Self>, event: &mut GetSkillDescription) -> Propagation {
        event.description.push_plain("Applies ");
        event
            .description
            .push_tinted(Tone::Notice, rx.state().force.to_string());
        event.description.push_plain(" force. ");
        Propagation::Continue
    }
}

impl Component for ApplyForceSkill {
    const KIND: ComponentKind = ComponentKind::ApplyForceSkill;

    fn on_attach(binder: &mut Binder<'_, Self>) {
        binder.on(Band::Primary, Self::on_compile);
        binder.on(Band::Lead, Self::on_describe);
    }

    fn duplicate(&self) -> Self {
        self.clone()
    }

    fn snapshot(&self) -> ComponentSnapshot {
        ComponentSnapshot::ApplyForceSkill(self.clone())
    }
}
