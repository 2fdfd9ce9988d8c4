//! Staged resolution of attacks, throws and heals.
//!
//! Every stage is a firing that lets independently attached units negotiate
//! the transaction:
//!
//! 1. **Legality**: `CanAttack` on the defender (teams, factions).
//! 2. **Compile**: `CompileAttack` on the attacker with a [`CombatInstance`]
//!    seeded with the base damage. Equipment forwards it to the weapon.
//! 3. **Confirm**: `PerformAttack` on the attacker; any unit may veto, e.g. an
//!    armed skill that resolves the attack itself.
//! 4. **Resolve**: `DoDamage` and/or `DoHeal` on the defender, plus narration.
//!
//! Any stage may end the transaction early. That is the action fizzling, not
//! an error, so these functions return `Option` rather than `Result`.

use tracing::debug;

use crate::components::{Attribute, is_blocked};
use crate::entity::EntityRef;
use crate::env::{GameEnv, SpatialIndex};
use crate::event::{
    CanAttack, CompileAttack, ConsumeItem, DoDamage, DoHeal, GetAttributeLevel, GetHealth,
    GetScreenName, GetSkillAttribute, GetSkillUser, GetWeight, PerformAttack,
};
use crate::narration::{Line, Tone};
use crate::state::{Position, Vec2};

use super::instance::CombatInstance;
use super::rules::{self, Effectiveness};

/// What resolving one combat instance did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CombatOutcome {
    /// Damage that reached the defender's health, after resistances.
    pub damage_dealt: i32,
    /// Present when a damage path ran.
    pub effectiveness: Option<Effectiveness>,
    pub healed: i32,
}

/// Where a thrown item ended up.
#[derive(Clone, Debug)]
pub struct ThrowOutcome {
    pub projectile: EntityRef,
    /// Tile the throw stopped at (the target, or the first obstacle).
    pub impact: Position,
    /// Tile the projectile was placed on.
    pub rest: Position,
    pub hits: Vec<CombatOutcome>,
}

// ============================================================================
// Queries
// ============================================================================

/// Asks `defender` whether `attacker` may target it.
pub fn can_attack(env: &GameEnv<'_>, attacker: &EntityRef, defender: &EntityRef) -> bool {
    defender
        .emit(
            env,
            CanAttack {
                asker: Some(attacker.clone()),
                valid_target: true,
            },
        )
        .valid_target
}

/// Display name with every modifier applied ("Locked Door", "Rat remains").
///
/// Falls back to the prototype name when no unit contributes one.
pub fn screen_name(env: &GameEnv<'_>, entity: &EntityRef) -> String {
    let name = entity.emit(env, GetScreenName::default()).text;
    if name.is_empty() {
        entity.name().to_string()
    } else {
        name
    }
}

pub fn attribute_level(env: &GameEnv<'_>, entity: &EntityRef, attribute: Attribute) -> i32 {
    entity
        .emit(
            env,
            GetAttributeLevel {
                attribute: Some(attribute),
                level: 0,
            },
        )
        .level
}

/// Skill multiplier from the user's level in the skill's attribute.
///
/// Without an explicit user the skill is asked who it is equipped on; with
/// no user at all the strength is 1.0.
pub fn skill_strength(env: &GameEnv<'_>, user: Option<&EntityRef>, skill: &EntityRef) -> f32 {
    let user = match user {
        Some(user) => user.clone(),
        None => match skill.emit(env, GetSkillUser::default()).user {
            Some(user) => user,
            None => return 1.0,
        },
    };
    let Some(attribute) = skill.emit(env, GetSkillAttribute::default()).attribute else {
        return 1.0;
    };
    rules::skill_strength(attribute_level(env, &user, attribute))
}

// ============================================================================
// Attack
// ============================================================================

/// Runs the compile stage and returns the aggregated instance.
pub fn compile_attack(
    env: &GameEnv<'_>,
    attacker: &EntityRef,
    defender: &EntityRef,
    base_damage: i32,
) -> CombatInstance {
    attacker
        .emit(
            env,
            CompileAttack {
                combat: CombatInstance::new(attacker, defender).with_damage(base_damage),
            },
        )
        .combat
}

/// Full attack protocol: legality, compile, confirm, resolve.
///
/// Returns `None` when the attack fizzled or was taken over by another unit.
pub fn resolve_attack(
    env: &GameEnv<'_>,
    attacker: &EntityRef,
    defender: &EntityRef,
    base_damage: i32,
) -> Option<CombatOutcome> {
    if !can_attack(env, attacker, defender) {
        debug!(
            target: "game_core::combat",
            attacker = %attacker.id(),
            defender = %defender.id(),
            "invalid target"
        );
        return None;
    }

    let combat = compile_attack(env, attacker, defender, base_damage);
    if combat.is_cancelled() {
        debug!(target: "game_core::combat", ?combat, "attack cancelled during compile");
        return None;
    }

    let confirmed = attacker.emit(
        env,
        PerformAttack {
            combat,
            can_perform: true,
        },
    );
    if !confirmed.can_perform {
        debug!(target: "game_core::combat", attacker = %attacker.id(), "attack vetoed");
        return None;
    }

    Some(process_combat(env, &confirmed.combat))
}

/// Applies a compiled instance: damage if positive, then healing if positive.
pub fn process_combat(env: &GameEnv<'_>, combat: &CombatInstance) -> CombatOutcome {
    let mut outcome = CombatOutcome::default();
    let (Some(attacker), Some(defender)) = (combat.attacker(), combat.defender()) else {
        return outcome;
    };
    if combat.is_cancelled() {
        return outcome;
    }

    if combat.damage() > 0 {
        if let Some((dealt, effectiveness)) = process_damage(env, combat, attacker, defender) {
            outcome.damage_dealt = dealt;
            outcome.effectiveness = Some(effectiveness);
        }
    }
    if combat.healing() > 0 {
        outcome.healed = process_healing(env, combat, attacker, defender);
    }
    outcome
}

/// Name of the tool used: the skill if one is involved, else the weapon.
fn tool_name(env: &GameEnv<'_>, combat: &CombatInstance) -> Option<String> {
    combat
        .skill()
        .or(combat.weapon())
        .map(|tool| screen_name(env, tool))
}

fn process_damage(
    env: &GameEnv<'_>,
    combat: &CombatInstance,
    attacker: &EntityRef,
    defender: &EntityRef,
) -> Option<(i32, Effectiveness)> {
    if !can_attack(env, attacker, defender) {
        return None;
    }

    // Names are taken before damage lands so a kill never reads "hits Rat remains".
    let attacker_name = screen_name(env, attacker);
    let defender_name = screen_name(env, defender);
    let tool = tool_name(env, combat);

    let dealt = defender.emit(
        env,
        DoDamage {
            damage: combat.damage(),
            damage_type: combat.damage_type(),
            instigator: Some(attacker.clone()),
            effectiveness: 0,
        },
    );
    let maximum = defender.emit(env, GetHealth::default()).maximum;
    let effectiveness =
        Effectiveness::classify(dealt.effectiveness, dealt.damage, maximum, env.tables());

    let mut line = Line::new()
        .tinted(Tone::Actor, attacker_name)
        .plain(" hits ")
        .tinted(Tone::Target, defender_name);
    if let Some(tool) = tool {
        line.push_plain(" with ");
        line.push_tinted(Tone::Item, tool);
    }
    line.push_plain(effectiveness.phrase());
    env.narrate(line, Some(defender));

    debug!(
        target: "game_core::combat",
        attacker = %attacker.id(),
        defender = %defender.id(),
        requested = combat.damage(),
        dealt = dealt.damage,
        %effectiveness,
        "damage resolved"
    );
    Some((dealt.damage, effectiveness))
}

fn process_healing(
    env: &GameEnv<'_>,
    combat: &CombatInstance,
    _healer: &EntityRef,
    patient: &EntityRef,
) -> i32 {
    let patient_name = screen_name(env, patient);
    let tool = tool_name(env, combat);
    let healing = combat.healing();

    let healed = patient.emit(
        env,
        DoHeal {
            amount: healing,
            healed: 0,
        },
    );

    let mut line = Line::new()
        .tinted(Tone::Actor, patient_name)
        .plain(" is healed for ")
        .tinted(Tone::Notice, healing.to_string())
        .plain(" points");
    if let Some(tool) = tool {
        line.push_plain(" by ");
        line.push_tinted(Tone::Item, tool);
    }
    env.narrate(line, Some(patient));
    healed.healed
}

// ============================================================================
// Throw
// ============================================================================

/// Throws the first carried item named `item_name` toward `target`.
///
/// The landing point is clamped to the throw range, the flight stops at the
/// first wall or blocking entity, everything on the impact tile takes
/// `strength ratio * item weight` damage, and the item comes to rest on the
/// impact tile (or one step short of an obstacle).
pub fn resolve_throw(
    env: &GameEnv<'_>,
    thrower: &EntityRef,
    item_name: &str,
    target: Position,
) -> Option<ThrowOutcome> {
    let map = env.map().ok()?;
    let consumed = thrower.emit(
        env,
        ConsumeItem {
            item_name: item_name.to_string(),
            ..Default::default()
        },
    );
    let projectile = consumed.consumed?;

    let strength = attribute_level(env, thrower, Attribute::Strength);
    let weight = projectile.emit(env, GetWeight::default()).weight;
    let range = rules::throw_range(strength, weight, env.tables());
    let damage = rules::throw_damage(strength, weight);

    let origin = thrower.position();
    let landing = rules::clamp_throw_target(origin, target, range);
    let (impact, obstructed) = trace_flight(env, map, thrower, origin, landing);

    let hits: Vec<CombatOutcome> = map
        .entities_at(impact)
        .iter()
        .filter(|hit| !std::rc::Rc::ptr_eq(*hit, thrower))
        .map(|hit| {
            let combat = CombatInstance::new(thrower, hit)
                .with_damage(damage)
                .with_weapon(&projectile);
            process_combat(env, &combat)
        })
        .collect();

    let rest = if obstructed || !hits.is_empty() {
        let back = Vec2::from(target - origin).ortho_normal();
        impact - back
    } else {
        impact
    };
    let rest = map.nearest_open(rest).unwrap_or(origin);
    map.spawn(projectile.clone(), rest);

    debug!(
        target: "game_core::combat",
        thrower = %thrower.id(),
        projectile = %projectile.id(),
        range,
        damage,
        %impact,
        %rest,
        "throw resolved"
    );
    Some(ThrowOutcome {
        projectile,
        impact,
        rest,
        hits,
    })
}

/// Walks the flight path; returns the stopping tile and whether something
/// other than the end of the path stopped it.
fn trace_flight(
    env: &GameEnv<'_>,
    map: &dyn SpatialIndex,
    thrower: &EntityRef,
    origin: Position,
    landing: Position,
) -> (Position, bool) {
    for tile in map.line(origin, landing) {
        if !map.can_occupy(tile) || is_blocked(env, map, thrower, tile) {
            return (tile, true);
        }
    }
    (landing, false)
}
