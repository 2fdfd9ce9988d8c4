#![allow(dead_code)]

use game_core::components::{Equipment, Inventory, Physics};
use game_core::event::HasItem;
use game_core::{EntityRef, Position};
use runtime::{RuntimeConfig, Session};

/// An empty walled level with the player at `at`.
pub fn session_with_player(at: Position) -> (Session, EntityRef) {
    let mut session = Session::new(RuntimeConfig::default());
    let player = session
        .spawn_player(at)
        .expect("player start must be walkable");
    (session, player)
}

pub fn health(entity: &EntityRef) -> i32 {
    entity
        .get::<Physics>()
        .map(|body| body.state().health)
        .unwrap_or_default()
}

pub fn carried(entity: &EntityRef) -> Vec<String> {
    entity
        .get::<Inventory>()
        .map(|inventory| {
            inventory
                .state()
                .items()
                .iter()
                .map(|item| item.name().to_string())
                .collect()
        })
        .unwrap_or_default()
}

pub fn has_item(session: &Session, entity: &EntityRef, name: &str) -> bool {
    entity
        .emit(
            &session.env(),
            HasItem {
                item_name: name.to_string(),
                has_item: false,
            },
        )
        .has_item
}

pub fn wielded(entity: &EntityRef) -> Option<String> {
    entity
        .get::<Equipment>()
        .and_then(|worn| worn.state().weapon().map(|weapon| weapon.name().to_string()))
}

pub fn plain(lines: &[game_core::Line]) -> Vec<String> {
    lines.iter().map(game_core::Line::plain_text).collect()
}
