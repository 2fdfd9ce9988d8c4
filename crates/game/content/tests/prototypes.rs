use game_content::{Catalog, Prototype};
use game_core::components::{Inventory, Openable, Physics, SkillUser};
use game_core::event::{AcquireItem, DoAttack, Equip, GetAttackRange, GetScreenName, Open};
use game_core::{EntityFactory, EntityId, EntityRef, EnvError, GameEnv};

fn health(entity: &EntityRef) -> i32 {
    entity
        .get::<Physics>()
        .map(|body| body.state().health)
        .unwrap_or_default()
}

fn give(env: &GameEnv<'_>, holder: &EntityRef, item: EntityRef) -> bool {
    holder
        .emit(
            env,
            AcquireItem {
                item: Some(item),
                acquired: false,
            },
        )
        .acquired
}

fn equip(env: &GameEnv<'_>, holder: &EntityRef, item: EntityRef) -> bool {
    holder
        .emit(
            env,
            Equip {
                item: Some(item),
                ..Default::default()
            },
        )
        .was_equipped
}

#[test]
fn brass_key_opens_the_locked_door() -> Result<(), EnvError> {
    let catalog = Catalog::standard();
    let env = GameEnv::empty();
    let player = catalog.instantiate_with_id("Player", EntityId::PLAYER)?;
    let door = catalog.spawn(Prototype::LockedDoor)?;

    assert_eq!(door.emit(&env, GetScreenName::default()).text, "Locked Door");
    let refused = door.emit(
        &env,
        Open {
            asker: Some(player.clone()),
            was_opened: false,
        },
    );
    assert!(!refused.was_opened);

    assert!(give(&env, &player, catalog.spawn(Prototype::BrassKey)?));
    let opened = door.emit(
        &env,
        Open {
            asker: Some(player.clone()),
            was_opened: false,
        },
    );
    assert!(opened.was_opened);
    assert!(door.get::<Openable>().is_some_and(|open| open.state().opened));
    let carried = player
        .get::<Inventory>()
        .map(|inventory| inventory.state().items().len());
    assert_eq!(carried, Some(0));
    Ok(())
}

#[test]
fn sword_adds_to_bare_handed_damage() -> Result<(), EnvError> {
    let catalog = Catalog::standard();
    let env = GameEnv::empty();
    let player = catalog.instantiate_with_id("Player", EntityId::PLAYER)?;
    let first = catalog.spawn(Prototype::Goblin)?;
    let second = catalog.spawn(Prototype::Goblin)?;

    let attack = |target: &EntityRef| {
        player.emit(
            &env,
            DoAttack {
                target: Some(target.clone()),
                outcome: None,
            },
        )
    };

    attack(&first);
    let bare = 30 - health(&first);
    assert!(bare > 0);

    assert!(equip(&env, &player, catalog.spawn(Prototype::Sword)?));
    attack(&second);
    let armed = 30 - health(&second);
    assert_eq!(armed, bare + 6);
    Ok(())
}

#[test]
fn bow_extends_attack_range() -> Result<(), EnvError> {
    let catalog = Catalog::standard();
    let env = GameEnv::empty();
    let player = catalog.instantiate_with_id("Player", EntityId::PLAYER)?;

    assert_eq!(player.emit(&env, GetAttackRange::default()).range, 0);
    assert!(equip(&env, &player, catalog.spawn(Prototype::Bow)?));
    assert_eq!(player.emit(&env, GetAttackRange::default()).range, 6);
    Ok(())
}

#[test]
fn chest_instances_start_empty_and_independent() -> Result<(), EnvError> {
    let catalog = Catalog::standard();
    let env = GameEnv::empty();
    let first = catalog.spawn(Prototype::Chest)?;
    let second = catalog.spawn(Prototype::Chest)?;

    assert!(give(&env, &first, catalog.spawn(Prototype::Rock)?));
    let count = |chest: &EntityRef| {
        chest
            .get::<Inventory>()
            .map(|inventory| inventory.state().items().len())
    };
    assert_eq!(count(&first), Some(1));
    assert_eq!(count(&second), Some(0));
    Ok(())
}

#[test]
fn catalog_skills_can_be_learned() -> Result<(), EnvError> {
    let catalog = Catalog::standard();
    let env = GameEnv::empty().with_factory(&catalog);
    let player = catalog.instantiate_with_id("Player", EntityId::PLAYER)?;
    let skill = env.instantiate("Mend")?;

    assert!(SkillUser::learn(&env, &player, skill));
    let learned = player
        .get::<SkillUser>()
        .map(|user| user.state().skills().len());
    assert_eq!(learned, Some(1));
    assert!(catalog.instantiate("Fireball").is_err());
    Ok(())
}
