mod common;

use common::{GridMap, Transcript, fighter, health, on_team};
use game_core::components::{
    Chest, Door, Inventory, Lock, Obscuring, Openable, Physics, Render, Sense, Think, Walk,
    can_see,
};
use game_core::event::{
    AcquireItem, ApplyForce, GetBlockState, GetScreenName, HasItem, Move, NewTurn, Open,
};
use game_core::narration::is_balanced;
use game_core::{CardinalDirection, Entity, EntityId, EntityRef, GameEnv, Position, Vec2};

fn locked_door(id: u32) -> EntityRef {
    let door = Entity::new(EntityId(id), "Door");
    door.attach(Physics::new(100, 200, 10, true));
    door.attach(Render::new('+', "Door", 1));
    door.attach(Openable::new('/'));
    door.attach(Door);
    door.attach(Obscuring::new());
    door.attach(Lock::new("BrassKey"));
    door
}

fn key(id: u32) -> EntityRef {
    let key = Entity::new(EntityId(id), "BrassKey");
    key.attach(Render::new('-', "Brass Key", 1));
    key
}

fn open(env: &GameEnv<'_>, target: &EntityRef, opener: &EntityRef) -> Open {
    target.emit(
        env,
        Open {
            asker: Some(opener.clone()),
            was_opened: false,
        },
    )
}

fn is_opened(door: &EntityRef) -> bool {
    door.get::<Openable>()
        .is_some_and(|openable| openable.state().opened)
}

#[test]
fn lock_without_key_stops_the_open_chain() {
    let door = locked_door(10);
    let player = fighter(0, "Player", 20, 5);
    player.attach(Inventory::new(4));
    let env = GameEnv::empty();

    let attempt = open(&env, &door, &player);
    assert!(!attempt.was_opened);
    assert!(!is_opened(&door));
    assert_eq!(door.emit(&env, GetScreenName::default()).text, "Locked Door");
}

#[test]
fn matching_key_is_consumed_and_door_opens() {
    let door = locked_door(10);
    let player = fighter(0, "Player", 20, 5);
    player.attach(Inventory::new(4));
    let log = Transcript::default();
    let env = GameEnv::empty().with_narrator(&log);

    let brass = key(11);
    player.emit(
        &env,
        AcquireItem {
            item: Some(brass),
            acquired: false,
        },
    );

    let attempt = open(&env, &door, &player);
    assert!(attempt.was_opened);
    assert!(is_opened(&door));

    let still_has_key = player
        .emit(
            &env,
            HasItem {
                item_name: "BrassKey".to_string(),
                has_item: false,
            },
        )
        .has_item;
    assert!(!still_has_key);

    let blocking = door
        .emit(&env, GetBlockState::default())
        .blocking;
    assert!(!blocking);
    assert_eq!(door.emit(&env, GetScreenName::default()).text, "Door");

    assert_eq!(
        log.plain(),
        vec![
            "Player grabs Brass Key".to_string(),
            "Player unlocks Door with Brass Key".to_string(),
            "Player opens Door".to_string(),
        ]
    );
    assert!(log.markup().iter().all(|line| is_balanced(line)));
}

#[test]
fn a_door_only_opens_once() {
    let door = Entity::new(EntityId(10), "Door");
    door.attach(Openable::new('/'));
    let player = fighter(0, "Player", 20, 5);
    let env = GameEnv::empty();

    assert!(open(&env, &door, &player).was_opened);
    assert!(!open(&env, &door, &player).was_opened);
}

#[test]
fn opened_chest_spills_its_contents() {
    let map = GridMap::new(6, 6);
    let chest = Entity::new(EntityId(20), "Chest");
    chest.attach(Physics::new(10, 50, 6, true));
    chest.attach(Inventory::new(8));
    chest.attach(Openable::new('='));
    chest.attach(Chest);
    let player = fighter(0, "Player", 20, 5);
    player.attach(Walk);
    map.place(&chest, Position::new(2, 2));
    map.place(&player, Position::new(1, 2));
    let env = GameEnv::empty().with_map(&map);

    let loot = key(21);
    let stored = chest.emit(
        &env,
        AcquireItem {
            item: Some(loot.clone()),
            acquired: false,
        },
    );
    assert!(stored.acquired);

    let step = player.emit(
        &env,
        Move {
            direction: Some(CardinalDirection::East),
            moved: false,
        },
    );
    assert!(!step.moved);
    assert!(is_opened(&chest));
    assert!(map.is_indexed(&loot));
    assert_eq!(player.position(), Position::new(1, 2));
}

#[test]
fn walking_into_a_creature_attacks_it() {
    let map = GridMap::new(6, 6);
    let player = fighter(0, "Player", 20, 7);
    player.attach(Walk);
    let rat = fighter(1, "Rat", 10, 1);
    map.place(&player, Position::new(1, 1));
    map.place(&rat, Position::new(1, 2));
    let env = GameEnv::empty().with_map(&map);

    let step = player.emit(
        &env,
        Move {
            direction: Some(CardinalDirection::North),
            moved: false,
        },
    );
    assert!(!step.moved);
    assert_eq!(health(&rat), 3);
    assert_eq!(player.position(), Position::new(1, 1));
}

#[test]
fn walking_stops_at_walls_and_crosses_open_floor() {
    let map = GridMap::new(6, 6).with_wall(Position::new(2, 1));
    let player = fighter(0, "Player", 20, 7);
    player.attach(Walk);
    map.place(&player, Position::new(1, 1));
    let env = GameEnv::empty().with_map(&map);

    let blocked = player.emit(
        &env,
        Move {
            direction: Some(CardinalDirection::East),
            moved: false,
        },
    );
    assert!(!blocked.moved);

    let walked = player.emit(
        &env,
        Move {
            direction: Some(CardinalDirection::North),
            moved: false,
        },
    );
    assert!(walked.moved);
    assert_eq!(player.position(), Position::new(1, 2));
}

#[test]
fn knockback_slides_until_something_blocks() {
    let map = GridMap::new(10, 3).with_wall(Position::new(6, 1));
    let goblin = fighter(1, "Goblin", 20, 1);
    map.place(&goblin, Position::new(2, 1));
    let env = GameEnv::empty().with_map(&map);

    goblin.emit(
        &env,
        ApplyForce {
            direction: Vec2::new(1.0, 0.0),
            force: 600.0,
        },
    );
    goblin.emit(&env, NewTurn);
    assert_eq!(goblin.position(), Position::new(5, 1));

    let velocity = goblin.get::<Physics>().map(|body| body.state().velocity);
    assert_eq!(velocity, Some(Vec2::ZERO));
}

#[test]
fn thinkers_chase_visible_enemies() {
    let map = GridMap::new(12, 5);
    let player = fighter(0, "Player", 20, 5);
    on_team(&player, 1);
    let goblin = fighter(1, "Goblin", 20, 3);
    on_team(&goblin, 2);
    goblin.attach(Walk);
    goblin.attach(Sense::new(8));
    goblin.attach(Think::new());
    map.place(&player, Position::new(1, 2));
    map.place(&goblin, Position::new(5, 2));
    let env = GameEnv::empty().with_map(&map);

    assert!(can_see(&env, &map, &goblin, player.position()));
    goblin.emit(&env, NewTurn);
    assert_eq!(goblin.position(), Position::new(4, 2));

    let target = goblin
        .get::<Think>()
        .and_then(|think| think.state().target())
        .map(|target| target.id());
    assert_eq!(target, Some(EntityId(0)));

    goblin.emit(&env, NewTurn);
    goblin.emit(&env, NewTurn);
    assert_eq!(goblin.position(), Position::new(2, 2));
    goblin.emit(&env, NewTurn);
    assert_eq!(goblin.position(), Position::new(2, 2));
    assert_eq!(health(&player), 17);
}

#[test]
fn walls_and_closed_doors_block_sight() {
    let map = GridMap::new(12, 5).with_wall(Position::new(3, 2));
    let watcher = fighter(1, "Goblin", 20, 3);
    watcher.attach(Sense::new(8));
    map.place(&watcher, Position::new(1, 2));
    let door = Entity::new(EntityId(10), "Door");
    door.attach(Physics::new(100, 200, 10, true));
    door.attach(Openable::new('/'));
    door.attach(Door);
    door.attach(Obscuring::new());
    map.place(&door, Position::new(1, 3));
    let env = GameEnv::empty().with_map(&map);

    assert!(!can_see(&env, &map, &watcher, Position::new(5, 2)));
    assert!(can_see(&env, &map, &watcher, Position::new(4, 0)));
    assert!(can_see(&env, &map, &watcher, Position::new(1, 3)));
    assert!(!can_see(&env, &map, &watcher, Position::new(1, 4)));
    assert!(!can_see(&env, &map, &watcher, Position::new(11, 0)));

    assert!(open(&env, &door, &watcher).was_opened);
    assert!(can_see(&env, &map, &watcher, Position::new(1, 4)));
}
