use crate::components::Attribute;
use crate::entity::EntityRef;
use crate::state::{CardinalDirection, Vec2};

#[derive(Debug, Default)]
pub struct GetAttributeLevel {
    pub attribute: Option<Attribute>,
    pub level: i32,
}

#[derive(Debug, Default)]
pub struct GetWeight {
    pub weight: i32,
}

#[derive(Debug, Default)]
pub struct GetSize {
    pub size: i32,
}

/// Does this entity block `asker` from entering its tile?
#[derive(Debug, Default)]
pub struct GetBlockState {
    pub asker: Option<EntityRef>,
    pub blocking: bool,
}

#[derive(Debug, Default)]
pub struct SetBlockState {
    pub blocking: bool,
}

#[derive(Debug, Default)]
pub struct GetBlocksSight {
    pub blocks: bool,
}

#[derive(Debug, Default)]
pub struct SetBlocksSight {
    pub blocks: bool,
}

/// Impulse applied to a body. Velocity changes by `direction * force / weight`.
#[derive(Debug, Default)]
pub struct ApplyForce {
    pub direction: Vec2,
    pub force: f32,
}

/// Start of this entity's turn.
#[derive(Debug, Default)]
pub struct NewTurn;

/// Request to step one tile. `moved` reports whether the entity changed tiles.
#[derive(Debug, Default)]
pub struct Move {
    pub direction: Option<CardinalDirection>,
    pub moved: bool,
}
