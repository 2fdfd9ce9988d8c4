//! The demo level.
//!
//! Two rooms split by a wall with a plain door and a locked one. The player
//! starts in the west room with a goblin and a rat; the key to the locked
//! door lies on the floor, and a skeleton guards a stocked chest behind it.
use game_content::Prototype;
use game_core::{Line, Position, TerrainKind, Tone};
use tracing::info;

use crate::config::RuntimeConfig;
use crate::error::Result;
use crate::session::Session;

/// Column of the wall between the two rooms.
pub const PARTITION_X: i32 = 7;
pub const PLAYER_START: Position = Position { x: 2, y: 2 };
pub const LOCKED_DOOR_AT: Position = Position { x: PARTITION_X, y: 3 };
pub const PLAIN_DOOR_AT: Position = Position { x: PARTITION_X, y: 8 };

/// Builds the demo session. Every placement fits the smallest allowed map.
///
/// # Errors
///
/// Fails only if a placement lands on unwalkable terrain.
pub fn demo(config: RuntimeConfig) -> Result<Session> {
    let mut session = Session::new(config);
    let height = session.config().map.height as i32;

    let map = session.map_mut();
    for y in 1..height - 1 {
        map.set_terrain(Position::new(PARTITION_X, y), TerrainKind::Wall);
    }
    map.set_terrain(LOCKED_DOOR_AT, TerrainKind::Floor);
    map.set_terrain(PLAIN_DOOR_AT, TerrainKind::Floor);
    map.set_terrain(Position::new(4, 7), TerrainKind::Water);
    map.set_terrain(Position::new(5, 7), TerrainKind::Water);

    let player = session.spawn_player(PLAYER_START)?;
    session.give(&player, Prototype::Rock)?;
    session.give(&player, Prototype::Rock)?;
    session.equip(&player, Prototype::LeatherArmor)?;
    session.learn(&player, Prototype::PowerStrike)?;
    session.learn(&player, Prototype::Mend)?;
    session.learn(&player, Prototype::Shockwave)?;

    session.spawn(Prototype::BrassKey, Position::new(3, 4))?;
    session.spawn(Prototype::Sword, Position::new(2, 6))?;
    session.spawn(Prototype::Rat, Position::new(5, 4))?;
    session.spawn(Prototype::Goblin, Position::new(5, 9))?;

    session.spawn(Prototype::LockedDoor, LOCKED_DOOR_AT)?;
    session.spawn(Prototype::Door, PLAIN_DOOR_AT)?;
    session.spawn(Prototype::Skeleton, Position::new(9, 4))?;
    let chest = session.spawn(Prototype::Chest, Position::new(10, 2))?;
    session.populate_chest(&chest, 2)?;

    session.log().push(
        Line::new()
            .plain("You enter the ")
            .tinted(Tone::Notice, "dungeon")
            .plain("."),
    );
    info!(target: "runtime::session", entities = session.map().len(), "demo level ready");
    Ok(session)
}
