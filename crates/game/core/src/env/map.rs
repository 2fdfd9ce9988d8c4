use crate::entity::EntityRef;
use crate::state::Position;

/// Spatial collaborator: the per-tile entity index and terrain of one level.
///
/// The rules read and request mutation of positions through this trait; they
/// never store the index themselves. Mutations happen only as direct side
/// effects of move, spawn and despawn requests and complete before the call
/// returns.
pub trait SpatialIndex {
    fn dimensions(&self) -> MapDimensions;

    /// Entities standing on a tile, in spawn order.
    fn entities_at(&self, position: Position) -> Vec<EntityRef>;

    /// Entities whose Euclidean distance from `center` is at most `radius`.
    fn entities_within(&self, center: Position, radius: f32) -> Vec<EntityRef>;

    /// True when the terrain at `position` is inside the map and passable.
    ///
    /// Entities on the tile are not considered; blocking is negotiated with
    /// the occupants through events.
    fn can_occupy(&self, position: Position) -> bool;

    /// Moves an indexed entity and updates its position.
    fn move_entity(&self, entity: &EntityRef, to: Position) -> bool;

    /// Adds an entity to the index at `at` and sets its position.
    fn spawn(&self, entity: EntityRef, at: Position) -> bool;

    /// Removes an entity from the index.
    fn despawn(&self, entity: &EntityRef) -> bool;

    /// Closest occupiable tile to `around`, searching outward ring by ring.
    fn nearest_open(&self, around: Position) -> Option<Position>;

    /// True when the terrain at `position` stops line of sight.
    fn is_opaque(&self, position: Position) -> bool {
        !self.can_occupy(position)
    }

    fn contains(&self, position: Position) -> bool {
        self.dimensions().contains(position)
    }

    /// Tiles crossed walking from `from` to `to`, excluding `from`.
    fn line(&self, from: Position, to: Position) -> Vec<Position> {
        line_between(from, to)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapDimensions {
    pub width: u32,
    pub height: u32,
}

impl MapDimensions {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn contains(&self, position: Position) -> bool {
        position.x >= 0
            && position.y >= 0
            && position.x < self.width as i32
            && position.y < self.height as i32
    }
}

/// Canonical terrain classes for map tiles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TerrainKind {
    #[default]
    Floor,
    Wall,
    Void,
    Water,
}

impl TerrainKind {
    pub fn is_passable(self) -> bool {
        matches!(self, TerrainKind::Floor)
    }

    pub fn glyph(self) -> char {
        match self {
            TerrainKind::Floor => '.',
            TerrainKind::Wall => '#',
            TerrainKind::Void => ' ',
            TerrainKind::Water => '~',
        }
    }
}

/// Bresenham line from `from` to `to`, excluding the start tile.
pub fn line_between(from: Position, to: Position) -> Vec<Position> {
    let dx = (to.x - from.x).abs();
    let dy = -(to.y - from.y).abs();
    let sx = if from.x < to.x { 1 } else { -1 };
    let sy = if from.y < to.y { 1 } else { -1 };
    let mut err = dx + dy;
    let mut current = from;
    let mut tiles = Vec::with_capacity((dx - dy) as usize);

    while current != to {
        let doubled = 2 * err;
        if doubled >= dy {
            err += dy;
            current.x += sx;
        }
        if doubled <= dx {
            err += dx;
            current.y += sy;
        }
        tiles.push(current);
    }
    tiles
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_excludes_start_and_ends_on_target() {
        let tiles = line_between(Position::ORIGIN, Position::new(3, 0));
        assert_eq!(
            tiles,
            vec![Position::new(1, 0), Position::new(2, 0), Position::new(3, 0)]
        );
        assert!(line_between(Position::new(2, 2), Position::new(2, 2)).is_empty());
    }

    #[test]
    fn diagonal_line_is_contiguous() {
        let tiles = line_between(Position::ORIGIN, Position::new(-3, 3));
        assert_eq!(tiles.last(), Some(&Position::new(-3, 3)));
        let mut previous = Position::ORIGIN;
        for tile in tiles {
            assert!((tile.x - previous.x).abs() <= 1 && (tile.y - previous.y).abs() <= 1);
            previous = tile;
        }
    }

    #[test]
    fn dimensions_bound_positions() {
        let dims = MapDimensions::new(4, 3);
        assert!(dims.contains(Position::new(3, 2)));
        assert!(!dims.contains(Position::new(4, 0)));
        assert!(!dims.contains(Position::new(0, -1)));
    }
}
