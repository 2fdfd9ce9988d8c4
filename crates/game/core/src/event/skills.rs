use crate::combat::CombatInstance;
use crate::components::{Attribute, SkillUseMode};
use crate::entity::EntityRef;
use crate::narration::Line;
use crate::state::Position;

/// Fired on a skill entity by whoever wants to use it.
#[derive(Debug, Default)]
pub struct ActivateSkill {
    pub activator: Option<EntityRef>,
    pub use_mode: Option<SkillUseMode>,
}

/// Sent back to the activator once the skill knows how it is used.
#[derive(Debug, Default)]
pub struct SkillActivated {
    pub skill: Option<EntityRef>,
    pub use_mode: Option<SkillUseMode>,
}

#[derive(Debug, Default)]
pub struct RequestUseSkill {
    pub slot: usize,
    pub found: bool,
}

#[derive(Debug, Default)]
pub struct GetEnergy {
    pub required: i32,
}

#[derive(Debug, Default)]
pub struct GetSkillAttribute {
    pub attribute: Option<Attribute>,
}

#[derive(Debug, Default)]
pub struct GetSkillUser {
    pub user: Option<EntityRef>,
}

#[derive(Debug, Default)]
pub struct SkillEquipped {
    pub user: Option<EntityRef>,
}

/// Turns a skill activation into combat instances.
///
/// `combats` starts with the instance the skill was triggered on; effect
/// units modify it and may append more.
#[derive(Debug, Default)]
pub struct CompileSkillEffects {
    pub user: Option<EntityRef>,
    pub base_location: Position,
    pub skill_strength: f32,
    pub combats: Vec<CombatInstance>,
}

#[derive(Debug, Default)]
pub struct GetSkillDescription {
    pub description: Line,
}

/// Starts `completed = true`; multi-use skills clear it.
#[derive(Debug, Default)]
pub struct GetSkillCompleted {
    pub completed: bool,
}
