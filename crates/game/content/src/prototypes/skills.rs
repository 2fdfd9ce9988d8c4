use game_core::components::{
    ApplyForceSkill, AreaOfEffectSkill, AttackSkill, Attribute, HealingSkill,
    IncreaseDamageSkill, Skill, TargetSelfSkill,
};
use game_core::entity::Entity;

pub(super) fn power_strike(entity: &Entity) {
    entity.attach(Skill::new("Power Strike", 3, Attribute::Strength));
    entity.attach(AttackSkill);
    entity.attach(IncreaseDamageSkill::new(8));
}

pub(super) fn mend(entity: &Entity) {
    entity.attach(Skill::new("Mend", 4, Attribute::Wisdom));
    entity.attach(TargetSelfSkill);
    entity.attach(HealingSkill::new(25));
}

pub(super) fn shockwave(entity: &Entity) {
    entity.attach(Skill::new("Shockwave", 5, Attribute::Strength));
    entity.attach(AttackSkill);
    entity.attach(AreaOfEffectSkill::new(2.0));
    entity.attach(IncreaseDamageSkill::new(4));
    entity.attach(ApplyForceSkill::new(150.0));
}
