//! Domain capability units.
//!
//! Each unit owns one behaviour slice and reacts only to events; none of them
//! holds a reference to a sibling unit. Priority bands per tag:
//!
//! | tag | units (band) |
//! |-----|--------------|
//! | `DoDamage` | Invulnerable (intercept), Physics (baseline) |
//! | `ResistDamage` | Resistance, Equipment (primary) |
//! | `CompileAttack` | RangedWeapon (intercept), Equipment (primary), Weapon (baseline) |
//! | `Open` | Lock (guard), Openable (primary), Door and Chest (baseline) |
//! | `GetScreenName` | Lock (guard), Render and Skill (primary), Physics (baseline) |
//! | `CompileSkillEffects` | AreaOfEffect (expand), IncreaseDamage and ApplyForce (primary), Healing (baseline) |
//! | `GetSkillDescription` | AttackSkill and TargetSelfSkill (intercept), IncreaseDamage and Healing (headline), ApplyForce (lead), AreaOfEffect (preface) |
mod attack;
mod attributes;
mod equipment;
mod inventory;
mod movement;
mod openable;
mod physics;
mod render;
mod resistance;
mod senses;
mod skill;
mod team;
mod think;
mod turn;
mod weapon;

pub use attack::Attack;
pub use attributes::{Attribute, Attributes};
pub use equipment::{EquipSlot, Equipable, Equipment};
pub use inventory::Inventory;
pub use movement::{Walk, is_blocked};
pub use openable::{Chest, Door, Lock, Openable};
pub use physics::Physics;
pub use render::Render;
pub use resistance::{Invulnerable, Resistance};
pub use senses::{Obscuring, Sense, can_see};
pub use skill::{
    ApplyForceSkill, AreaOfEffectSkill, AttackSkill, HealingSkill, IncreaseDamageSkill, Skill,
    SkillUseMode, SkillUser, TargetSelfSkill,
};
pub use team::Team;
pub use think::Think;
pub use turn::Turn;
pub use weapon::{RangedWeapon, Weapon};

use crate::entity::{Entity, EntitySnapshot};

/// Names every kind of capability unit.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::AsRefStr,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ComponentKind {
    Attributes,
    Physics,
    Resistance,
    Invulnerable,
    Weapon,
    RangedWeapon,
    Equipment,
    Equipable,
    Attack,
    Team,
    Lock,
    Openable,
    Door,
    Chest,
    Inventory,
    Render,
    Walk,
    Sense,
    Obscuring,
    Think,
    Turn,
    Skill,
    SkillUser,
    AttackSkill,
    TargetSelfSkill,
    IncreaseDamageSkill,
    HealingSkill,
    AreaOfEffectSkill,
    ApplyForceSkill,
}

/// Field record of one unit, enumerable and reconstructable by kind.
///
/// Units that hold other entities (inventories, equipment, skill users) record
/// them as nested entity snapshots. Back-references (a skill's user, an AI's
/// current target) are not recorded: the first is rebuilt when the owning
/// skill user is restored, the second is reacquired on the next turn.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ComponentSnapshot {
    Attributes(Attributes),
    Physics(Physics),
    Resistance(Resistance),
    Invulnerable,
    Weapon(Weapon),
    RangedWeapon(RangedWeapon),
    Equipment {
        weapon: Option<EntitySnapshot>,
        armor: Option<EntitySnapshot>,
    },
    Equipable(Equipable),
    Attack(Attack),
    Team(Team),
    Lock(Lock),
    Openable(Openable),
    Door,
    Chest,
    Inventory {
        capacity: usize,
        items: Vec<EntitySnapshot>,
    },
    Render(Render),
    Walk,
    Sense(Sense),
    Obscuring(Obscuring),
    Think {
        dead: bool,
    },
    Turn(Turn),
    Skill {
        energy: i32,
        display_name: String,
        attribute: Attribute,
    },
    SkillUser {
        max_energy: i32,
        regen: f32,
        energy: i32,
        next_energy_point: f32,
        skills: Vec<EntitySnapshot>,
        /// Index into `skills` of the armed next-attack skill.
        pending: Option<usize>,
    },
    AttackSkill,
    TargetSelfSkill,
    IncreaseDamageSkill(IncreaseDamageSkill),
    HealingSkill(HealingSkill),
    AreaOfEffectSkill(AreaOfEffectSkill),
    ApplyForceSkill(ApplyForceSkill),
}

impl ComponentSnapshot {
    pub fn kind(&self) -> ComponentKind {
        match self {
            ComponentSnapshot::Attributes(_) => ComponentKind::Attributes,
            ComponentSnapshot::Physics(_) => ComponentKind::Physics,
            ComponentSnapshot::Resistance(_) => ComponentKind::Resistance,
            ComponentSnapshot::Invulnerable => ComponentKind::Invulnerable,
            ComponentSnapshot::Weapon(_) => ComponentKind::Weapon,
            ComponentSnapshot::RangedWeapon(_) => ComponentKind::RangedWeapon,
            ComponentSnapshot::Equipment { .. } => ComponentKind::Equipment,
            ComponentSnapshot::Equipable(_) => ComponentKind::Equipable,
            ComponentSnapshot::Attack(_) => ComponentKind::Attack,
            ComponentSnapshot::Team(_) => ComponentKind::Team,
            ComponentSnapshot::Lock(_) => ComponentKind::Lock,
            ComponentSnapshot::Openable(_) => ComponentKind::Openable,
            ComponentSnapshot::Door => ComponentKind::Door,
            ComponentSnapshot::Chest => ComponentKind::Chest,
            ComponentSnapshot::Inventory { .. } => ComponentKind::Inventory,
            ComponentSnapshot::Render(_) => ComponentKind::Render,
            ComponentSnapshot::Walk => ComponentKind::Walk,
            ComponentSnapshot::Sense(_) => ComponentKind::Sense,
            ComponentSnapshot::Obscuring(_) => ComponentKind::Obscuring,
            ComponentSnapshot::Think { .. } => ComponentKind::Think,
            ComponentSnapshot::Turn(_) => ComponentKind::Turn,
            ComponentSnapshot::Skill { .. } => ComponentKind::Skill,
            ComponentSnapshot::SkillUser { .. } => ComponentKind::SkillUser,
            ComponentSnapshot::AttackSkill => ComponentKind::AttackSkill,
            ComponentSnapshot::TargetSelfSkill => ComponentKind::TargetSelfSkill,
            ComponentSnapshot::IncreaseDamageSkill(_) => ComponentKind::IncreaseDamageSkill,
            ComponentSnapshot::HealingSkill(_) => ComponentKind::HealingSkill,
            ComponentSnapshot::AreaOfEffectSkill(_) => ComponentKind::AreaOfEffectSkill,
            ComponentSnapshot::ApplyForceSkill(_) => ComponentKind::ApplyForceSkill,
        }
    }

    /// Attaches the recorded unit to `entity`, re-running its attach hook.
    pub fn restore_onto(&self, entity: &Entity) {
        match self {
            ComponentSnapshot::Attributes(unit) => {
                entity.attach(unit.clone());
            }
            ComponentSnapshot::Physics(unit) => {
                entity.attach(unit.clone());
            }
            ComponentSnapshot::Resistance(unit) => {
                entity.attach(unit.clone());
            }
            ComponentSnapshot::Invulnerable => {
                entity.attach(Invulnerable);
            }
            ComponentSnapshot::Weapon(unit) => {
                entity.attach(unit.clone());
            }
            ComponentSnapshot::RangedWeapon(unit) => {
                entity.attach(unit.clone());
            }
            ComponentSnapshot::Equipment { weapon, armor } => {
                entity.attach(Equipment::holding(
                    weapon.as_ref().map(Entity::restore),
                    armor.as_ref().map(Entity::restore),
                ));
            }
            ComponentSnapshot::Equipable(unit) => {
                entity.attach(unit.clone());
            }
            ComponentSnapshot::Attack(unit) => {
                entity.attach(unit.clone());
            }
            ComponentSnapshot::Team(unit) => {
                entity.attach(unit.clone());
            }
            ComponentSnapshot::Lock(unit) => {
                entity.attach(unit.clone());
            }
            ComponentSnapshot::Openable(unit) => {
                entity.attach(unit.clone());
            }
            ComponentSnapshot::Door => {
                entity.attach(Door);
            }
            ComponentSnapshot::Chest => {
                entity.attach(Chest);
            }
            ComponentSnapshot::Inventory { capacity, items } => {
                entity.attach(Inventory::holding(
                    *capacity,
                    items.iter().map(Entity::restore).collect(),
                ));
            }
            ComponentSnapshot::Render(unit) => {
                entity.attach(unit.clone());
            }
            ComponentSnapshot::Walk => {
                entity.attach(Walk);
            }
            ComponentSnapshot::Sense(unit) => {
                entity.attach(unit.clone());
            }
            ComponentSnapshot::Obscuring(unit) => {
                entity.attach(unit.clone());
            }
            ComponentSnapshot::Think { dead } => {
                entity.attach(Think::restored(*dead));
            }
            ComponentSnapshot::Turn(unit) => {
                entity.attach(unit.clone());
            }
            ComponentSnapshot::Skill {
                energy,
                display_name,
                attribute,
            } => {
                entity.attach(Skill::new(display_name.clone(), *energy, *attribute));
            }
            ComponentSnapshot::SkillUser {
                max_energy,
                regen,
                energy,
                next_energy_point,
                skills,
                pending,
            } => {
                let skills: Vec<_> = skills.iter().map(Entity::restore).collect();
                let pending = pending.and_then(|index| skills.get(index).cloned());
                let user = SkillUser::restored(
                    *max_energy,
                    *regen,
                    *energy,
                    *next_energy_point,
                    skills,
                    pending,
                );
                let attached = entity.attach(user);
                if let Some(owner) = entity.handle() {
                    for skill in attached.state().skills() {
                        Skill::bind_user(skill, &owner);
                    }
                }
            }
            ComponentSnapshot::AttackSkill => {
                entity.attach(AttackSkill);
            }
            ComponentSnapshot::TargetSelfSkill => {
                entity.attach(TargetSelfSkill);
            }
            ComponentSnapshot::IncreaseDamageSkill(unit) => {
                entity.attach(unit.clone());
            }
            ComponentSnapshot::HealingSkill(unit) => {
                entity.attach(unit.clone());
            }
            ComponentSnapshot::AreaOfEffectSkill(unit) => {
                entity.attach(unit.clone());
            }
            ComponentSnapshot::ApplyForceSkill(unit) => {
                entity.attach(unit.clone());
            }
        }
    }
}
