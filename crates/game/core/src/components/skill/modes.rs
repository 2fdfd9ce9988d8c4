use crate::entity::{Band, Binder, Component, Propagation, Receiver};
use crate::event::{ActivateSkill, GetSkillDescription};

use super::super::{ComponentKind, ComponentSnapshot};
use super::SkillUseMode;

/// Arms the skill for the user's next attack.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AttackSkill;

impl AttackSkill {
    fn on_activate(_rx: &Receiver<'_, Self>, event: &mut ActivateSkill) -> Propagation {
        event.use_mode = Some(SkillUseMode::NextAttack);
        Propagation::Continue
    }

    fn on_describe(_rx: &Receiver<'_, Self>, event: &mut GetSkillDescription) -> Propagation {
        event.description.push_plain("Next attack ");
        Propagation::Continue
    }
}

impl Component for AttackSkill {
    const KIND: ComponentKind = ComponentKind::AttackSkill;

    fn on_attach(binder: &mut Binder<'_, Self>) {
        binder.on(Band::Primary, Self::on_activate);
        binder.on(Band::Intercept, Self::on_describe);
    }

    fn duplicate(&self) -> Self {
        AttackSkill
    }

    fn snapshot(&self) -> ComponentSnapshot {
        ComponentSnapshot::AttackSkill
    }
}

/// Resolves the skill on its user immediately.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TargetSelfSkill;

impl TargetSelfSkill {
    fn on_activate(_rx: &Receiver<'_, Self>, event: &mut ActivateSkill) -> Propagation {
        event.use_mode = Some(SkillUseMode::SelfCast);
        Propagation::Continue
    }

    fn on_describe(_rx: &Receiver<'_, Self>, event: &mut GetSkillDescription) -> Propagation {
        event.description.push_plain("Self: ");
        Propagation::Continue
    }
}

impl Component for TargetSelfSkill {
    const KIND: ComponentKind = ComponentKind::TargetSelfSkill;

    fn on_attach(binder: &mut Binder<'_, Self>) {
        binder.on(Band::Primary, Self::on_activate);
        binder.on(Band::Intercept, Self::on_describe);
    }

    fn duplicate(&self) -> Self {
        TargetSelfSkill
    }

    fn snapshot(&self) -> ComponentSnapshot {
        ComponentSnapshot::TargetSelfSkill
    }
}
