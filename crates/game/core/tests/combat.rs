mod common;

use common::{GridMap, Transcript, fighter, health, on_team};
use game_core::combat::{CombatInstance, process_combat, resolve_attack};
use game_core::components::{
    Attribute, Attributes, EquipSlot, Equipable, Equipment, Inventory, Invulnerable, Physics,
    RangedWeapon, Resistance, Weapon,
};
use game_core::event::{AcquireItem, DoAttack, DoDamage, DoHeal, Equip, ThrowItem};
use game_core::narration::is_balanced;
use game_core::{
    CombatTables, DamageType, Effectiveness, Entity, EntityId, EntityRef, GameEnv, Position,
};

fn attack(env: &GameEnv<'_>, attacker: &EntityRef, defender: &EntityRef) -> DoAttack {
    attacker.emit(
        env,
        DoAttack {
            target: Some(defender.clone()),
            outcome: None,
        },
    )
}

fn sword(id: u32) -> EntityRef {
    let sword = Entity::new(EntityId(id), "Sword");
    sword.attach(Weapon::new(DamageType::Physical, Attribute::Blades, 6));
    sword.attach(Equipable::new(EquipSlot::Weapon));
    sword
}

#[test]
fn bare_handed_hit_within_reach() {
    let map = GridMap::new(10, 10);
    let attacker = fighter(0, "Player", 30, 10);
    let defender = fighter(1, "Rat", 20, 1);
    map.place(&attacker, Position::new(1, 1));
    map.place(&defender, Position::new(2, 2));
    let env = GameEnv::empty().with_map(&map);

    let result = attack(&env, &attacker, &defender);
    assert_eq!(health(&defender), 10);
    let outcome = result.outcome.map(|outcome| outcome.damage_dealt);
    assert_eq!(outcome, Some(10));
    assert!(defender.get::<Physics>().is_some_and(|body| !body.state().dead));
}

#[test]
fn attacks_beyond_reach_fizzle() {
    let map = GridMap::new(10, 10);
    let attacker = fighter(0, "Player", 30, 10);
    let defender = fighter(1, "Rat", 20, 1);
    map.place(&attacker, Position::new(0, 0));
    map.place(&defender, Position::new(2, 1));
    let env = GameEnv::empty().with_map(&map);

    let result = attack(&env, &attacker, &defender);
    assert!(result.outcome.is_none());
    assert_eq!(health(&defender), 20);
}

#[test]
fn invulnerable_defenders_shrug_off_attacks() {
    let map = GridMap::new(10, 10);
    let attacker = fighter(0, "Player", 30, 10);
    let statue = fighter(1, "Statue", 20, 1);
    statue.attach(Invulnerable);
    map.place(&attacker, Position::new(1, 1));
    map.place(&statue, Position::new(2, 1));
    let log = Transcript::default();
    let env = GameEnv::empty().with_map(&map).with_narrator(&log);

    let outcome = attack(&env, &attacker, &statue).outcome;
    assert_eq!(outcome.map(|outcome| outcome.damage_dealt), Some(0));
    assert_eq!(
        outcome.and_then(|outcome| outcome.effectiveness),
        Some(Effectiveness::Nothing)
    );
    assert_eq!(health(&statue), 20);
    assert!(statue.get::<Physics>().is_some_and(|body| !body.state().dead));
    assert_eq!(log.plain(), vec!["Player hits Statue, it does nothing"]);

    let direct = resolve_attack(&env, &attacker, &statue, 10);
    assert_eq!(direct.map(|outcome| outcome.damage_dealt), Some(0));
    assert_eq!(health(&statue), 20);
}

#[test]
fn teammates_are_not_valid_targets() {
    let attacker = fighter(1, "Goblin", 30, 10);
    let ally = fighter(2, "Goblin", 30, 10);
    on_team(&attacker, 2);
    on_team(&ally, 2);
    let env = GameEnv::empty();

    assert!(resolve_attack(&env, &attacker, &ally, 10).is_none());
    assert_eq!(health(&ally), 30);
}

#[test]
fn equipped_weapon_contributes_through_equipment() {
    let attacker = fighter(0, "Player", 30, 4);
    attacker.attach(Equipment::new());
    let defender = fighter(1, "Goblin", 40, 1);
    let blade = sword(50);
    let log = Transcript::default();
    let env = GameEnv::empty().with_narrator(&log);

    let equipped = attacker.emit(
        &env,
        Equip {
            item: Some(blade.clone()),
            ..Default::default()
        },
    );
    assert!(equipped.was_equipped);
    assert!(equipped.replaced.is_none());

    let outcome = resolve_attack(&env, &attacker, &defender, 4);
    assert_eq!(outcome.map(|outcome| outcome.damage_dealt), Some(10));
    assert_eq!(health(&defender), 30);
    assert_eq!(log.plain(), vec!["Player hits Goblin with Sword".to_string()]);
}

#[test]
fn ranged_weapon_cancels_out_of_range_attacks() {
    let attacker = fighter(0, "Player", 30, 2);
    attacker.attach(Equipment::new());
    let bow = Entity::new(EntityId(51), "Bow");
    bow.attach(Weapon::new(DamageType::Physical, Attribute::Bows, 5));
    bow.attach(RangedWeapon::new(4));
    bow.attach(Equipable::new(EquipSlot::Weapon));
    let near = fighter(1, "Rat", 20, 1);
    let far = fighter(2, "Rat", 20, 1);
    let map = GridMap::new(12, 3);
    map.place(&attacker, Position::new(0, 1));
    map.place(&near, Position::new(3, 1));
    map.place(&far, Position::new(6, 1));
    let env = GameEnv::empty().with_map(&map);

    attacker.emit(
        &env,
        Equip {
            item: Some(bow),
            ..Default::default()
        },
    );

    assert!(attack(&env, &attacker, &near).outcome.is_some());
    assert_eq!(health(&near), 13);

    assert!(attack(&env, &attacker, &far).outcome.is_none());
    assert_eq!(health(&far), 20);
}

#[test]
fn resistance_reduces_matching_damage() {
    let attacker = fighter(0, "Player", 30, 0);
    let imp = fighter(1, "Imp", 40, 1);
    imp.attach(Resistance::new(DamageType::Fire));
    let env = GameEnv::empty();

    let mut fireball = CombatInstance::new(&attacker, &imp).with_damage(20);
    fireball.set_damage_type(DamageType::Fire);
    let outcome = process_combat(&env, &fireball);

    assert_eq!(outcome.damage_dealt, 14);
    assert_eq!(outcome.effectiveness, Some(Effectiveness::NotVeryEffective));
    assert_eq!(health(&imp), 26);
}

#[test]
fn vulnerable_targets_take_extra_damage() {
    let attacker = fighter(0, "Player", 30, 0);
    let yeti = fighter(1, "Yeti", 100, 1);
    yeti.attach(Resistance::new(DamageType::Cold));
    let env = GameEnv::empty();

    let mut torch = CombatInstance::new(&attacker, &yeti).with_damage(20);
    torch.set_damage_type(DamageType::Fire);
    let outcome = process_combat(&env, &torch);

    assert_eq!(outcome.damage_dealt, 26);
    assert_eq!(outcome.effectiveness, Some(Effectiveness::Effective));
}

#[test]
fn health_floors_at_zero_and_death_happens_once() {
    let attacker = fighter(0, "Player", 30, 0);
    let rat = fighter(1, "Rat", 8, 1);
    let log = Transcript::default();
    let env = GameEnv::empty().with_narrator(&log);

    let first = process_combat(&env, &CombatInstance::new(&attacker, &rat).with_damage(50));
    assert_eq!(first.damage_dealt, 50);
    assert_eq!(first.effectiveness, Some(Effectiveness::SuperEffective));
    assert_eq!(health(&rat), 0);
    assert!(rat.get::<Physics>().is_some_and(|body| {
        let body = body.state();
        body.dead && !body.blocking
    }));

    let again = rat.emit(
        &env,
        DoDamage {
            damage: 5,
            ..Default::default()
        },
    );
    assert_eq!(again.damage, 0);
    assert_eq!(health(&rat), 0);
    assert!(log.markup().iter().all(|line| is_balanced(line)));
}

#[test]
fn healing_clamps_to_maximum() {
    let patient = fighter(0, "Player", 30, 1);
    let env = GameEnv::empty();
    patient.emit(
        &env,
        DoDamage {
            damage: 5,
            ..Default::default()
        },
    );

    let healed = patient.emit(
        &env,
        DoHeal {
            amount: 20,
            healed: 0,
        },
    );
    assert_eq!(healed.healed, 5);
    assert_eq!(health(&patient), 30);
}

#[test]
fn healing_narration_is_balanced() {
    let patient = fighter(0, "Player", 30, 1);
    let log = Transcript::default();
    let env = GameEnv::empty().with_narrator(&log);
    patient.emit(
        &env,
        DoDamage {
            damage: 10,
            ..Default::default()
        },
    );

    let mut remedy = CombatInstance::new(&patient, &patient);
    remedy.set_healing(4);
    let outcome = process_combat(&env, &remedy);

    assert_eq!(outcome.healed, 4);
    assert_eq!(log.plain(), vec!["Player is healed for 4 points".to_string()]);
    assert!(is_balanced(&log.markup()[0]));
}

// ============================================================================
// Throwing
// ============================================================================

fn thrower(strength: i32) -> EntityRef {
    let thrower = fighter(0, "Player", 30, 1);
    thrower.attach(Attributes::new().with(Attribute::Strength, strength));
    thrower.attach(Inventory::new(4));
    thrower
}

fn rock(id: u32) -> EntityRef {
    let rock = Entity::new(EntityId(id), "Rock");
    rock.attach(Physics::new(1, 100, 1, false));
    rock
}

fn pick_up(env: &GameEnv<'_>, holder: &EntityRef, item: &EntityRef) {
    let acquired = holder.emit(
        env,
        AcquireItem {
            item: Some(item.clone()),
            acquired: false,
        },
    );
    assert!(acquired.acquired);
}

#[test]
fn throws_are_clamped_to_range() {
    let map = GridMap::new(30, 5);
    let player = thrower(50);
    let stone = rock(60);
    map.place(&player, Position::new(0, 2));
    let env = GameEnv::empty().with_map(&map);
    pick_up(&env, &player, &stone);

    let thrown = player.emit(
        &env,
        ThrowItem {
            item_name: "Rock".to_string(),
            target: Position::new(20, 2),
            outcome: None,
        },
    );

    let range = game_core::combat::rules::throw_range(50, 100, &CombatTables::STANDARD);
    assert!((range - 7.071).abs() < 0.01);
    let outcome = thrown.outcome.map(|outcome| (outcome.impact, outcome.rest));
    assert_eq!(outcome, Some((Position::new(7, 2), Position::new(7, 2))));
    assert!(map.is_indexed(&stone));
    assert_eq!(stone.position(), Position::new(7, 2));
}

#[test]
fn thrown_items_hit_the_first_blocker_and_drop_short() {
    let map = GridMap::new(30, 5);
    let player = thrower(50);
    let stone = rock(60);
    let goblin = fighter(1, "Goblin", 60, 1);
    map.place(&player, Position::new(0, 2));
    map.place(&goblin, Position::new(4, 2));
    let env = GameEnv::empty().with_map(&map);
    pick_up(&env, &player, &stone);

    let thrown = player.emit(
        &env,
        ThrowItem {
            item_name: "Rock".to_string(),
            target: Position::new(6, 2),
            outcome: None,
        },
    );

    let Some(outcome) = thrown.outcome else {
        panic!("throw fizzled");
    };
    assert_eq!(outcome.impact, Position::new(4, 2));
    assert_eq!(outcome.rest, Position::new(3, 2));
    assert_eq!(outcome.hits.len(), 1);
    assert_eq!(health(&goblin), 10);
}

#[test]
fn throwing_without_the_item_does_nothing() {
    let map = GridMap::new(10, 5);
    let player = thrower(50);
    map.place(&player, Position::new(0, 2));
    let env = GameEnv::empty().with_map(&map);

    let thrown = player.emit(
        &env,
        ThrowItem {
            item_name: "Rock".to_string(),
            target: Position::new(5, 2),
            outcome: None,
        },
    );
    assert!(thrown.outcome.is_none());
}
