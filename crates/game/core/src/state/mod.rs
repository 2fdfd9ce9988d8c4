//! Plain value types shared by every layer: identifiers, grid positions,
//! directions, and the floating point vector used for throws and knockback.
mod common;
mod vector;

pub use common::{CardinalDirection, EntityId, Position};
pub use vector::Vec2;
