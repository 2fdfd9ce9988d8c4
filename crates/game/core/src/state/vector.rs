use std::ops::{Add, Mul, Sub};

use super::Position;

/// Continuous 2D vector used where tile math is not precise enough:
/// throw trajectories, knockback velocity, and area radii.
///
/// Conversion back to a tile truncates each axis toward zero.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn magnitude(self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// Unit vector in the same direction, or zero for a zero vector.
    pub fn normalized(self) -> Vec2 {
        let length = self.magnitude();
        if length == 0.0 {
            return Vec2::ZERO;
        }
        Vec2::new(self.x / length, self.y / length)
    }

    /// Single orthogonal tile step along the dominant axis.
    pub fn ortho_normal(self) -> Position {
        if self.x == 0.0 && self.y == 0.0 {
            return Position::ORIGIN;
        }
        if self.x.abs() >= self.y.abs() {
            Position::new(self.x.signum() as i32, 0)
        } else {
            Position::new(0, self.y.signum() as i32)
        }
    }

    /// Tile containing this point, truncating toward zero.
    pub fn to_position(self) -> Position {
        Position::new(self.x.trunc() as i32, self.y.trunc() as i32)
    }
}

impl From<Position> for Vec2 {
    fn from(position: Position) -> Self {
        Vec2::new(position.x as f32, position.y as f32)
    }
}

impl Add for Vec2 {
    type Output = Vec2;
    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vec2 {
    type Output = Vec2;
    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Vec2 {
    type Output = Vec2;
    fn mul(self, rhs: f32) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalized_zero_stays_zero() {
        assert_eq!(Vec2::ZERO.normalized(), Vec2::ZERO);
        let unit = Vec2::new(3.0, 4.0).normalized();
        assert!((unit.magnitude() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn ortho_normal_picks_dominant_axis() {
        assert_eq!(Vec2::new(-5.0, 2.0).ortho_normal(), Position::new(-1, 0));
        assert_eq!(Vec2::new(0.5, -3.0).ortho_normal(), Position::new(0, -1));
        assert_eq!(Vec2::ZERO.ortho_normal(), Position::ORIGIN);
    }

    #[test]
    fn to_position_truncates_toward_zero() {
        assert_eq!(Vec2::new(7.07, -0.9).to_position(), Position::new(7, 0));
        assert_eq!(Vec2::new(-1.5, 2.99).to_position(), Position::new(-1, 2));
    }
}
