//! Skills are entities of their own.
//!
//! A skill entity carries a [`Skill`] unit (cost, name, scaling attribute)
//! plus one use-mode unit and any number of effect units. A [`SkillUser`] on
//! the actor holds the learned skill entities and owns energy. Activation is a
//! round trip: the user asks the skill to activate, the skill's mode unit
//! stamps the use mode, and the skill reports back to the user with
//! `SkillActivated`, which decides when the effects are compiled.
mod effects;
mod modes;
mod user;

pub use effects::{ApplyForceSkill, AreaOfEffectSkill, HealingSkill, IncreaseDamageSkill};
pub use modes::{AttackSkill, TargetSelfSkill};
pub use user::SkillUser;

use std::rc::{Rc, Weak};

use crate::entity::{Band, Binder, Component, Entity, EntityRef, Propagation, Receiver};
use crate::env::GameEnv;
use crate::event::{
    ActivateSkill, GetEnergy, GetScreenName, GetSkillAttribute, GetSkillDescription,
    GetSkillUser, SkillActivated, SkillEquipped,
};
use crate::narration::Line;

use super::{Attribute, ComponentKind, ComponentSnapshot};

/// When a skill's effects are applied.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::EnumIter,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SkillUseMode {
    /// Armed now, resolved in place of the user's next attack.
    NextAttack,
    /// Resolved immediately with the user as both attacker and defender.
    SelfCast,
}

#[derive(Clone, Debug)]
pub struct Skill {
    pub energy: i32,
    pub display_name: String,
    pub attribute: Attribute,
    user: Weak<Entity>,
}

impl Skill {
    pub fn new(display_name: impl Into<String>, energy: i32, attribute: Attribute) -> Self {
        Self {
            energy,
            display_name: display_name.into(),
            attribute,
            user: Weak::new(),
        }
    }

    pub fn user(&self) -> Option<EntityRef> {
        self.user.upgrade()
    }

    /// Tells `skill` that it is now equipped by `user`.
    pub fn bind_user(skill: &EntityRef, user: &EntityRef) {
        skill.emit(
            &GameEnv::empty(),
            SkillEquipped {
                user: Some(user.clone()),
            },
        );
    }

    /// Composes the skill's description from every unit on it.
    pub fn describe(env: &GameEnv<'_>, skill: &EntityRef) -> Line {
        skill.emit(env, GetSkillDescription::default()).description
    }

    fn on_screen_name(rx: &Receiver<'_, Self>, event: &mut GetScreenName) -> Propagation {
        event.text.push_str(&rx.state().display_name);
        Propagation::Continue
    }

    /// Runs after the mode unit has stamped `use_mode`; hands the activation
    /// back to the activator.
    fn on_activate(rx: &Receiver<'_, Self>, event: &mut ActivateSkill) -> Propagation {
        let Some(activator) = event.activator.clone() else {
            return Propagation::Continue;
        };
        activator.emit(
            rx.env(),
            SkillActivated {
                skill: Some(rx.owner().clone()),
                use_mode: event.use_mode,
            },
        );
        Propagation::Continue
    }

    fn on_get_energy(rx: &Receiver<'_, Self>, event: &mut GetEnergy) -> Propagation {
        event.required += rx.state().energy;
        Propagation::Continue
    }

    fn on_get_attribute(rx: &Receiver<'_, Self>, event: &mut GetSkillAttribute) -> Propagation {
        event.attribute = Some(rx.state().attribute);
        Propagation::Continue
    }

    fn on_get_user(rx: &Receiver<'_, Self>, event: &mut GetSkillUser) -> Propagation {
        event.user = rx.state().user();
        Propagation::Continue
    }

    fn on_equipped(rx: &Receiver<'_, Self>, event: &mut SkillEquipped) -> Propagation {
        rx.state_mut().user = event.user.as_ref().map(Rc::downgrade).unwrap_or_default();
        Propagation::Continue
    }
}

impl Component for Skill {
    const KIND: ComponentKind = ComponentKind::Skill;

    fn on_attach(binder: &mut Binder<'_, Self>) {
        binder.on(Band::Primary, Self::on_screen_name);
        binder.on(Band::Baseline, Self::on_activate);
        binder.on(Band::Baseline, Self::on_get_energy);
        binder.on(Band::Baseline, Self::on_get_attribute);
        binder.on(Band::Baseline, Self::on_get_user);
        binder.on(Band::Baseline, Self::on_equipped);
    }

    /// The copy is not equipped by anyone yet.
    fn duplicate(&self) -> Self {
        Self::new(self.display_name.clone(), self.energy, self.attribute)
    }

    fn snapshot(&self) -> ComponentSnapshot {
        ComponentSnapshot::Skill {
            energy: self.energy,
            display_name: self.display_name.clone(),
            attribute: self.attribute,
        }
    }
}
