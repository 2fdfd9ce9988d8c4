mod common;

use common::{carried, has_item, health, plain, session_with_player, wielded};
use game_content::Prototype;
use game_core::event::DoDamage;
use game_core::{CardinalDirection, EntityId, Position, SpatialIndex};
use runtime::scenario::PLAYER_START;
use runtime::{Command, MapSize, RuntimeConfig, RuntimeError, Session, demo};

#[test]
fn commands_need_a_player() {
    let mut session = Session::new(RuntimeConfig::default());
    assert!(matches!(
        session.command(Command::Wait),
        Err(RuntimeError::MissingPlayer)
    ));
}

#[test]
fn walking_into_a_wall_does_not_spend_the_turn() {
    let (mut session, player) = session_with_player(Position::new(1, 1));

    let report = session
        .command(Command::Move(CardinalDirection::West))
        .unwrap();
    assert!(!report.spent);
    assert!(report.cycle.is_none());
    assert_eq!(session.cycle(), 0);

    let report = session
        .command(Command::Move(CardinalDirection::North))
        .unwrap();
    assert!(report.spent);
    assert_eq!(player.position(), Position::new(1, 2));
    assert_eq!(session.cycle(), 1);
}

#[test]
fn bumping_a_monster_attacks_and_the_monster_answers() {
    let (mut session, player) = session_with_player(Position::new(2, 2));
    let rat = session.spawn(Prototype::Rat, Position::new(3, 2)).unwrap();

    let report = session
        .command(Command::Move(CardinalDirection::East))
        .unwrap();

    assert!(report.spent);
    assert_eq!(player.position(), Position::new(2, 2));
    assert_eq!(health(&rat), 4);
    assert_eq!(health(&player), 58);
    assert_eq!(plain(&report.lines), vec!["Player hits Rat", "Rat hits Player"]);
    let acted = report.cycle.map(|cycle| cycle.acted).unwrap_or_default();
    assert_eq!(acted, vec![EntityId::PLAYER, rat.id()]);
    assert!(report.player_alive);
}

#[test]
fn picking_up_and_dropping_moves_items_between_map_and_pack() {
    let at = Position::new(2, 2);
    let (mut session, player) = session_with_player(at);

    let report = session.command(Command::PickUp).unwrap();
    assert!(!report.spent, "nothing to pick up yet");

    session.spawn(Prototype::BrassKey, at).unwrap();
    let report = session.command(Command::PickUp).unwrap();
    assert!(report.spent);
    assert_eq!(plain(&report.lines), vec!["Player grabs Brass Key"]);
    assert_eq!(carried(&player), vec!["BrassKey"]);
    assert_eq!(session.map().entities_at(at).len(), 1);

    let report = session
        .command(Command::Drop("BrassKey".to_string()))
        .unwrap();
    assert!(report.spent);
    assert_eq!(plain(&report.lines), vec!["Player drops Brass Key"]);
    assert!(carried(&player).is_empty());
    assert_eq!(session.map().entities_at(at).len(), 2);
}

#[test]
fn equipping_returns_the_replaced_weapon_to_the_pack() {
    let (mut session, player) = session_with_player(Position::new(2, 2));
    session.give(&player, Prototype::Sword).unwrap();
    session.give(&player, Prototype::Bow).unwrap();

    assert!(session.command(Command::Equip("Sword".into())).unwrap().spent);
    assert_eq!(wielded(&player).as_deref(), Some("Sword"));
    assert_eq!(carried(&player), vec!["Bow"]);

    let report = session.command(Command::Equip("Bow".into())).unwrap();
    assert_eq!(plain(&report.lines), vec!["Player equips Bow"]);
    assert_eq!(wielded(&player).as_deref(), Some("Bow"));
    assert!(has_item(&session, &player, "Sword"));

    assert!(!session.command(Command::Equip("Rock".into())).unwrap().spent);
}

#[test]
fn thrown_rock_hits_and_lands_short_of_the_target() {
    let (mut session, player) = session_with_player(Position::new(2, 2));
    let rat = session.spawn(Prototype::Rat, Position::new(5, 2)).unwrap();
    session.give(&player, Prototype::Rock).unwrap();

    let report = session
        .command(Command::Throw {
            item: "Rock".into(),
            target: Position::new(5, 2),
        })
        .unwrap();

    assert!(report.spent);
    assert_eq!(health(&rat), 0);
    assert!(carried(&player).is_empty());
    let landed = session.map().entities_at(Position::new(4, 2));
    assert_eq!(landed.len(), 1);
    assert_eq!(landed[0].name(), "Rock");
    let lines = plain(&report.lines);
    assert!(lines[0].starts_with("Player hits Rat with Rock"), "{lines:?}");
}

#[test]
fn using_a_skill_spends_energy() {
    let (mut session, player) = session_with_player(Position::new(2, 2));
    session.learn(&player, Prototype::Mend).unwrap();

    assert!(!session.command(Command::UseSkill(3)).unwrap().spent);
    assert!(session.command(Command::UseSkill(0)).unwrap().spent);

    let stats = session.player_stats().unwrap();
    assert!(stats.iter().any(|line| line == "energy      = 6/10"), "{stats:?}");
}

#[test]
fn a_dead_player_cannot_act() {
    let (mut session, player) = session_with_player(Position::new(2, 2));
    player.emit(
        &session.env(),
        DoDamage {
            damage: 1000,
            ..Default::default()
        },
    );

    let report = session.command(Command::Wait).unwrap();
    assert!(!report.spent);
    assert!(!report.player_alive);
    assert_eq!(session.cycle(), 0);
}

#[test]
fn demo_level_is_stocked() {
    let session = demo(RuntimeConfig::default()).unwrap();
    let player = session.player().unwrap();

    assert_eq!(player.position(), PLAYER_START);
    assert_eq!(carried(player), vec!["Rock", "Rock"]);
    assert_eq!(session.skill_descriptions().unwrap().len(), 3);
    assert_eq!(
        plain(&session.log().drain_new()),
        vec!["You enter the dungeon."]
    );

    let chest = session
        .map()
        .entities()
        .into_iter()
        .find(|entity| entity.name() == "Chest")
        .unwrap();
    assert_eq!(carried(&chest).len(), 2);

    let again = demo(RuntimeConfig::default()).unwrap();
    let chest_again = again
        .map()
        .entities()
        .into_iter()
        .find(|entity| entity.name() == "Chest")
        .unwrap();
    assert_eq!(carried(&chest), carried(&chest_again));
}

#[test]
fn demo_fits_the_smallest_map() {
    let config = RuntimeConfig {
        map: MapSize {
            width: MapSize::MIN,
            height: MapSize::MIN,
        },
        ..RuntimeConfig::default()
    };
    assert!(demo(config).is_ok());
}

#[test]
fn snapshot_json_restores_the_same_world() {
    let mut session = demo(RuntimeConfig::default()).unwrap();
    session.command(Command::Wait).unwrap();
    session.command(Command::Wait).unwrap();

    let json = session.snapshot_json().unwrap();
    let mut restored = Session::from_json(RuntimeConfig::default(), &json).unwrap();

    assert_eq!(restored.snapshot(), session.snapshot());
    assert_eq!(restored.cycle(), 2);
    assert_eq!(restored.player().unwrap().id(), EntityId::PLAYER);

    let rock = restored
        .spawn(Prototype::Rock, Position::new(3, 3))
        .unwrap();
    assert_eq!(rock.id(), EntityId(17));
    assert!(restored.command(Command::Wait).unwrap().spent);
}

#[test]
fn restore_rejects_a_truncated_terrain_grid() {
    let session = demo(RuntimeConfig::default()).unwrap();
    let mut snapshot = session.snapshot();
    snapshot.terrain.pop();
    assert!(matches!(
        Session::restore(RuntimeConfig::default(), &snapshot),
        Err(RuntimeError::InvalidSnapshot(_))
    ));
}
