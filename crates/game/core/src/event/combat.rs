use crate::combat::{CombatInstance, CombatOutcome, DamageType, ThrowOutcome};
use crate::entity::EntityRef;
use crate::state::Position;

/// Request to attack `target`. `outcome` is set when the attack resolved.
#[derive(Debug, Default)]
pub struct DoAttack {
    pub target: Option<EntityRef>,
    pub outcome: Option<CombatOutcome>,
}

/// Query for the reach of the current weapon, in tiles.
#[derive(Debug, Default)]
pub struct GetAttackRange {
    pub range: i32,
}

/// Gathers contributions to an attack on the attacker (and its weapon).
#[derive(Debug, Default)]
pub struct CompileAttack {
    pub combat: CombatInstance,
}

/// Last chance to veto a compiled attack. Starts with `can_perform = true`.
#[derive(Debug, Default)]
pub struct PerformAttack {
    pub combat: CombatInstance,
    pub can_perform: bool,
}

/// Asked of a defender: may `asker` attack you? Starts valid.
#[derive(Debug, Default)]
pub struct CanAttack {
    pub asker: Option<EntityRef>,
    pub valid_target: bool,
}

/// Damage arriving at an entity. After the chain runs, `damage` holds the
/// damage actually dealt.
#[derive(Debug, Default)]
pub struct DoDamage {
    pub damage: i32,
    pub damage_type: Option<DamageType>,
    pub instigator: Option<EntityRef>,
    pub effectiveness: i32,
}

/// Aggregates resistance across every resistance-bearing unit.
///
/// `resistance` is subtracted from `base_damage`; positive values reduce it.
#[derive(Debug, Default)]
pub struct ResistDamage {
    pub base_damage: i32,
    pub damage_type: Option<DamageType>,
    pub instigator: Option<EntityRef>,
    pub resistance: i32,
    pub effectiveness: i32,
}

#[derive(Debug, Default)]
pub struct GetResistance {
    pub resist_type: Option<DamageType>,
}

/// Healing arriving at an entity. `healed` is what actually got applied.
#[derive(Debug, Default)]
pub struct DoHeal {
    pub amount: i32,
    pub healed: i32,
}

#[derive(Debug, Default)]
pub struct Died {
    pub instigator: Option<EntityRef>,
}

#[derive(Debug, Default)]
pub struct GetHealth {
    pub current: i32,
    pub maximum: i32,
}

/// Throw the first carried item named `item_name` toward `target`.
#[derive(Debug, Default)]
pub struct ThrowItem {
    pub item_name: String,
    pub target: Position,
    pub outcome: Option<ThrowOutcome>,
}
