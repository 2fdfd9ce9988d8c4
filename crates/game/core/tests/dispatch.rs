mod common;

use common::{fighter, health};
use game_core::components::{Door, Invulnerable, Lock, Openable, Physics, Render};
use game_core::event::{DoDamage, GetHealth, GetScreenName, Open};
use game_core::{Band, Entity, EntityId, Event, EventTag, GameEnv, Priority};

#[test]
fn fire_hands_back_the_same_event() {
    let rat = fighter(1, "Rat", 10, 1);
    let env = GameEnv::empty();

    let mut event = Event::from(GetHealth::default());
    let sent: *const Event = &event;
    let returned = rat.fire(&env, &mut event);
    assert!(std::ptr::eq(returned, sent));

    match event {
        Event::GetHealth(health) => assert_eq!((health.current, health.maximum), (10, 10)),
        other => panic!("unexpected event {other:?}"),
    }
}

#[test]
fn tags_without_listeners_are_a_no_op() {
    let rock = Entity::new(EntityId(3), "Rock");
    let env = GameEnv::empty();

    let health = rock.emit(&env, GetHealth::default());
    assert_eq!((health.current, health.maximum), (0, 0));
    assert!(rock.listeners(EventTag::DoDamage).is_empty());
}

#[test]
fn chains_run_in_descending_priority() {
    let door = Entity::new(EntityId(4), "Door");
    door.attach(Door);
    door.attach(Openable::new('/'));
    door.attach(Lock::new("BrassKey"));

    assert_eq!(
        door.listeners(EventTag::Open),
        vec![Band::Guard.priority(), Band::Primary.priority(), Priority(0)]
    );
}

#[test]
fn name_is_composed_in_band_order() {
    let door = Entity::new(EntityId(4), "Door");
    door.attach(Render::new('+', "Door", 1));
    door.attach(Lock::new("BrassKey"));
    let env = GameEnv::empty();

    let name = door.emit(&env, GetScreenName::default()).text;
    assert_eq!(name, "Locked Door");
}

#[test]
fn stop_hides_the_event_from_lower_handlers() {
    let golem = fighter(2, "Golem", 20, 5);
    golem.attach(Invulnerable);
    let env = GameEnv::empty();

    assert_eq!(
        golem.listeners(EventTag::DoDamage),
        vec![Band::Intercept.priority(), Band::Baseline.priority()]
    );

    let hit = golem.emit(
        &env,
        DoDamage {
            damage: 15,
            ..Default::default()
        },
    );
    assert_eq!(hit.damage, 0);
    assert_eq!(health(&golem), 20);
}

#[test]
fn detach_purges_every_registration() {
    let golem = fighter(2, "Golem", 20, 5);
    let shield = golem.attach(Invulnerable);
    let env = GameEnv::empty();

    assert!(golem.registrations_of(shield.key()) > 0);
    assert!(golem.detach(shield.key()));
    assert_eq!(golem.registrations_of(shield.key()), 0);
    assert!(!golem.detach(shield.key()));

    golem.emit(
        &env,
        DoDamage {
            damage: 15,
            ..Default::default()
        },
    );
    assert_eq!(health(&golem), 5);
}

#[test]
fn instances_rebuild_their_own_registrations() {
    let prototype = fighter(100, "Goblin", 30, 4);
    let goblin = prototype.instantiate(EntityId(7));
    let env = GameEnv::empty();

    assert_eq!(goblin.kinds(), prototype.kinds());
    assert_eq!(
        goblin.listeners(EventTag::DoDamage),
        prototype.listeners(EventTag::DoDamage)
    );

    goblin.emit(
        &env,
        DoDamage {
            damage: 12,
            ..Default::default()
        },
    );
    assert_eq!(health(&goblin), 18);
    assert_eq!(health(&prototype), 30);

    let physics = goblin.get::<Physics>().map(|body| body.state().max_health);
    assert_eq!(physics, Some(30));
}

#[test]
fn opening_a_door_fires_nested_tags_without_reentry() {
    let door = Entity::new(EntityId(4), "Door");
    door.attach(Physics::new(50, 100, 10, true));
    door.attach(Openable::new('/'));
    door.attach(Door);
    let opener = fighter(0, "Player", 20, 5);
    let env = GameEnv::empty();

    let open = door.emit(
        &env,
        Open {
            asker: Some(opener.clone()),
            was_opened: false,
        },
    );
    assert!(open.was_opened);
    assert_eq!(door.reentrant_firings(), 0);
}
