#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use game_core::components::{Attack, Physics, Render, Team};
use game_core::{
    Entity, EntityId, EntityRef, Line, MapDimensions, Narrator, Position, SpatialIndex, Vec2,
};

/// Open floor with optional walls; entities kept in spawn order.
pub struct GridMap {
    dimensions: MapDimensions,
    walls: HashSet<Position>,
    entities: RefCell<Vec<EntityRef>>,
}

impl GridMap {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            dimensions: MapDimensions::new(width, height),
            walls: HashSet::new(),
            entities: RefCell::new(Vec::new()),
        }
    }

    pub fn with_wall(mut self, at: Position) -> Self {
        self.walls.insert(at);
        self
    }

    pub fn place(&self, entity: &EntityRef, at: Position) {
        assert!(self.spawn(entity.clone(), at));
    }

    pub fn is_indexed(&self, entity: &EntityRef) -> bool {
        self.entities
            .borrow()
            .iter()
            .any(|indexed| Rc::ptr_eq(indexed, entity))
    }
}

impl SpatialIndex for GridMap {
    fn dimensions(&self) -> MapDimensions {
        self.dimensions
    }

    fn entities_at(&self, position: Position) -> Vec<EntityRef> {
        self.entities
            .borrow()
            .iter()
            .filter(|entity| entity.position() == position)
            .cloned()
            .collect()
    }

    fn entities_within(&self, center: Position, radius: f32) -> Vec<EntityRef> {
        self.entities
            .borrow()
            .iter()
            .filter(|entity| Vec2::from(entity.position() - center).magnitude() <= radius)
            .cloned()
            .collect()
    }

    fn can_occupy(&self, position: Position) -> bool {
        self.contains(position) && !self.walls.contains(&position)
    }

    fn move_entity(&self, entity: &EntityRef, to: Position) -> bool {
        if !self.is_indexed(entity) || !self.can_occupy(to) {
            return false;
        }
        entity.set_position(to);
        true
    }

    fn spawn(&self, entity: EntityRef, at: Position) -> bool {
        if !self.can_occupy(at) || self.is_indexed(&entity) {
            return false;
        }
        entity.set_position(at);
        self.entities.borrow_mut().push(entity);
        true
    }

    fn despawn(&self, entity: &EntityRef) -> bool {
        let mut entities = self.entities.borrow_mut();
        let before = entities.len();
        entities.retain(|indexed| !Rc::ptr_eq(indexed, entity));
        before != entities.len()
    }

    fn nearest_open(&self, around: Position) -> Option<Position> {
        if self.can_occupy(around) {
            return Some(around);
        }
        let reach = self.dimensions.width.max(self.dimensions.height) as i32;
        (1..=reach).find_map(|ring| {
            (-ring..=ring)
                .flat_map(|dx| (-ring..=ring).map(move |dy| Position::new(dx, dy)))
                .filter(|offset| offset.x.abs() == ring || offset.y.abs() == ring)
                .map(|offset| around + offset)
                .find(|tile| self.can_occupy(*tile))
        })
    }
}

/// Narrator that keeps every line.
#[derive(Default)]
pub struct Transcript {
    lines: RefCell<Vec<Line>>,
}

impl Transcript {
    pub fn plain(&self) -> Vec<String> {
        self.lines.borrow().iter().map(Line::plain_text).collect()
    }

    pub fn markup(&self) -> Vec<String> {
        self.lines
            .borrow()
            .iter()
            .map(|line| line.as_markup().to_string())
            .collect()
    }
}

impl Narrator for Transcript {
    fn narrate(&self, line: Line, _origin: Option<&EntityRef>) {
        self.lines.borrow_mut().push(line);
    }
}

/// A fighter with a body, a name and bare-handed strength.
pub fn fighter(id: u32, name: &str, health: i32, strength: i32) -> EntityRef {
    let entity = Entity::new(EntityId(id), name);
    entity.attach(Physics::new(health, 60, 5, true));
    entity.attach(Render::new('@', name, 2).with_gore('%'));
    entity.attach(Attack::new(strength));
    entity
}

pub fn on_team(entity: &EntityRef, team: u32) -> &EntityRef {
    entity.attach(Team::new(team));
    entity
}

pub fn health(entity: &EntityRef) -> i32 {
    entity
        .get::<Physics>()
        .map(|body| body.state().health)
        .unwrap_or_default()
}
