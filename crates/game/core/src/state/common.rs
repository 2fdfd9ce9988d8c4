use std::fmt;
use std::ops::{Add, Sub};

/// Unique identifier for any entity tracked by a world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntityId(pub u32);

impl EntityId {
    /// Reserved identifier for the controllable player character.
    pub const PLAYER: Self = Self(0);

    /// Reserved identifier for prototype entities.
    ///
    /// Prototypes live in a catalog and are never placed in a world; every
    /// instance copied from them receives a fresh identifier.
    pub const PROTOTYPE: Self = Self(u32::MAX);

    /// Returns true if this entity is a catalog prototype.
    #[inline]
    pub const fn is_prototype(self) -> bool {
        self.0 == Self::PROTOTYPE.0
    }

    /// Returns true if this entity represents the player.
    #[inline]
    pub const fn is_player(self) -> bool {
        self.0 == Self::PLAYER.0
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::PROTOTYPE
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Discrete grid position expressed in tile coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Manhattan distance between two tiles.
    pub fn taxi_distance(self, other: Position) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }

    pub fn step(self, direction: CardinalDirection) -> Position {
        let (dx, dy) = direction.delta();
        Position::new(self.x + dx, self.y + dy)
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::ORIGIN
    }
}

impl Add for Position {
    type Output = Position;
    fn add(self, rhs: Position) -> Position {
        Position::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Position {
    type Output = Position;
    fn sub(self, rhs: Position) -> Position {
        Position::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CardinalDirection {
    North,
    South,
    East,
    West,
}

impl CardinalDirection {
    pub const ALL: [CardinalDirection; 4] = [
        CardinalDirection::North,
        CardinalDirection::South,
        CardinalDirection::East,
        CardinalDirection::West,
    ];

    pub fn delta(self) -> (i32, i32) {
        match self {
            CardinalDirection::North => (0, 1),
            CardinalDirection::South => (0, -1),
            CardinalDirection::East => (1, 0),
            CardinalDirection::West => (-1, 0),
        }
    }

    /// Direction of the dominant axis of an offset. Horizontal wins ties.
    ///
    /// Returns `None` for a zero offset.
    pub fn toward(offset: Position) -> Option<CardinalDirection> {
        if offset == Position::ORIGIN {
            return None;
        }
        Some(if offset.x.abs() >= offset.y.abs() {
            if offset.x > 0 {
                CardinalDirection::East
            } else {
                CardinalDirection::West
            }
        } else if offset.y > 0 {
            CardinalDirection::North
        } else {
            CardinalDirection::South
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn taxi_distance_sums_axes() {
        assert_eq!(Position::new(1, 1).taxi_distance(Position::new(-1, 2)), 3);
        assert_eq!(Position::ORIGIN.taxi_distance(Position::ORIGIN), 0);
    }

    #[test]
    fn toward_prefers_dominant_axis() {
        assert_eq!(
            CardinalDirection::toward(Position::new(3, -1)),
            Some(CardinalDirection::East)
        );
        assert_eq!(
            CardinalDirection::toward(Position::new(0, -2)),
            Some(CardinalDirection::South)
        );
        assert_eq!(
            CardinalDirection::toward(Position::new(-2, 2)),
            Some(CardinalDirection::West)
        );
        assert_eq!(CardinalDirection::toward(Position::ORIGIN), None);
    }

    #[test]
    fn direction_parses_case_insensitively() {
        assert_eq!(
            "NORTH".parse::<CardinalDirection>().ok(),
            Some(CardinalDirection::North)
        );
        assert_eq!(CardinalDirection::West.to_string(), "west");
    }
}
