//! Pure combat arithmetic.
//!
//! Nothing here fires events or touches entities; the pipeline and the
//! capability units call into these functions and own every side effect.

use crate::config::GameConfig;
use crate::state::{Position, Vec2};

use super::damage::DamageType;
use super::tables::CombatTables;

// ============================================================================
// Resistance
// ============================================================================

/// Result of running base damage through one resistance type.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Resisted {
    /// Damage after the adjustment.
    pub damage: i32,
    /// Signed effectiveness: positive amplified, negative reduced, zero unchanged.
    pub effectiveness: i32,
}

/// Adjusts base damage by the affinity between a damage type and a resist type.
///
/// # Formula
///
/// ```text
/// effectiveness = -resist_level            (resist_level in {1, 0, -1})
/// damage        = base + trunc(effectiveness * base * resist_ratio)
/// ```
///
/// Either type being absent leaves the damage unchanged with zero effectiveness.
pub fn calc_damage_resistance(
    damage_type: Option<DamageType>,
    base_damage: i32,
    resist_type: Option<DamageType>,
    tables: &CombatTables,
) -> Resisted {
    let (Some(damage_type), Some(resist_type)) = (damage_type, resist_type) else {
        return Resisted {
            damage: base_damage,
            effectiveness: 0,
        };
    };

    let effectiveness = -tables.resistances.affinity(resist_type, damage_type).level();
    let adjustment = (effectiveness as f32 * base_damage as f32 * tables.resist_ratio).trunc() as i32;
    Resisted {
        damage: base_damage + adjustment,
        effectiveness,
    }
}

/// Signed resistance value a single resistance unit contributes.
///
/// Positive values reduce damage; the damage path subtracts the aggregated
/// total from base damage.
pub fn resistance_contribution(
    damage_type: Option<DamageType>,
    base_damage: i32,
    resist_type: Option<DamageType>,
    tables: &CombatTables,
) -> (i32, i32) {
    let resisted = calc_damage_resistance(damage_type, base_damage, resist_type, tables);
    (base_damage - resisted.damage, resisted.effectiveness)
}

// ============================================================================
// Effectiveness
// ============================================================================

/// Narration category for a resolved hit. Never feeds back into game state.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr, strum::EnumIter,
)]
#[strum(serialize_all = "snake_case")]
pub enum Effectiveness {
    /// No damage got through.
    Nothing,
    /// Damage reached the super-effective share of maximum health.
    SuperEffective,
    Effective,
    NotVeryEffective,
    Neutral,
}

impl Effectiveness {
    /// Classifies a hit from the resistance sign and the damage actually dealt.
    pub fn classify(
        effectiveness: i32,
        damage_dealt: i32,
        max_health: i32,
        tables: &CombatTables,
    ) -> Self {
        if damage_dealt <= 0 {
            return Effectiveness::Nothing;
        }
        if damage_dealt as f32 >= max_health as f32 * tables.super_effective_threshold {
            return Effectiveness::SuperEffective;
        }
        match effectiveness.signum() {
            1 => Effectiveness::Effective,
            -1 => Effectiveness::NotVeryEffective,
            _ => Effectiveness::Neutral,
        }
    }

    /// Trailing phrase appended to a hit line.
    pub const fn phrase(self) -> &'static str {
        match self {
            Effectiveness::Nothing => ", it does nothing",
            Effectiveness::SuperEffective => ", it's super effective",
            Effectiveness::Effective => ", it's effective",
            Effectiveness::NotVeryEffective => ", it's not very effective",
            Effectiveness::Neutral => "",
        }
    }
}

// ============================================================================
// Throwing
// ============================================================================

/// Maximum throw distance in tiles.
///
/// ```text
/// range = |(strength / 100, min(weight / max_weight, 1))| * max_range
/// ```
pub fn throw_range(strength: i32, weight: i32, tables: &CombatTables) -> f32 {
    let strength_ratio = strength as f32 / GameConfig::ATTRIBUTE_SCALE;
    let weight_ratio = (weight as f32 / tables.max_throw_weight).min(1.0);
    Vec2::new(strength_ratio, weight_ratio).magnitude() * tables.max_throw_range
}

/// Damage dealt by a thrown item: strength ratio times item weight, truncated.
pub fn throw_damage(strength: i32, weight: i32) -> i32 {
    (strength as f32 / GameConfig::ATTRIBUTE_SCALE * weight as f32).trunc() as i32
}

/// Pulls a requested landing point back inside the throw range.
///
/// A target farther than `range` is replaced by the point at exactly `range`
/// along the same direction. Only the offset from `origin` is truncated to a
/// whole tile, so the landing tile never lies beyond `range`.
pub fn clamp_throw_target(origin: Position, target: Position, range: f32) -> Position {
    let to_target = Vec2::from(target - origin);
    if to_target.magnitude() > range {
        origin + (to_target.normalized() * range).to_position()
    } else {
        target
    }
}

/// Skill multiplier derived from an attribute level (100 maps to 1.0).
pub fn skill_strength(attribute_level: i32) -> f32 {
    attribute_level as f32 / GameConfig::ATTRIBUTE_SCALE
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLES: CombatTables = CombatTables::STANDARD;

    #[test]
    fn absent_types_leave_damage_unchanged() {
        let none_damage = calc_damage_resistance(None, 17, Some(DamageType::Fire), &TABLES);
        assert_eq!(none_damage, Resisted { damage: 17, effectiveness: 0 });

        let none_resist = calc_damage_resistance(Some(DamageType::Fire), 17, None, &TABLES);
        assert_eq!(none_resist, Resisted { damage: 17, effectiveness: 0 });
    }

    #[test]
    fn resisted_damage_is_reduced_by_ratio() {
        let resisted =
            calc_damage_resistance(Some(DamageType::Fire), 10, Some(DamageType::Fire), &TABLES);
        assert_eq!(resisted, Resisted { damage: 7, effectiveness: -1 });
        assert_eq!(
            resistance_contribution(Some(DamageType::Fire), 10, Some(DamageType::Fire), &TABLES),
            (3, -1)
        );
    }

    #[test]
    fn vulnerable_damage_is_amplified_and_truncated() {
        // 0.3 * 7 = 2.1 -> 2
        let amplified =
            calc_damage_resistance(Some(DamageType::Cold), 7, Some(DamageType::Fire), &TABLES);
        assert_eq!(amplified, Resisted { damage: 9, effectiveness: 1 });
        assert_eq!(
            resistance_contribution(Some(DamageType::Cold), 7, Some(DamageType::Fire), &TABLES),
            (-2, 1)
        );
    }

    #[test]
    fn classification_order() {
        assert_eq!(Effectiveness::classify(1, 0, 20, &TABLES), Effectiveness::Nothing);
        assert_eq!(Effectiveness::classify(-1, 15, 20, &TABLES), Effectiveness::SuperEffective);
        assert_eq!(Effectiveness::classify(1, 5, 20, &TABLES), Effectiveness::Effective);
        assert_eq!(Effectiveness::classify(-1, 5, 20, &TABLES), Effectiveness::NotVeryEffective);
        assert_eq!(Effectiveness::classify(0, 10, 20, &TABLES), Effectiveness::Neutral);
        assert_eq!(Effectiveness::Neutral.phrase(), "");
    }

    #[test]
    fn throw_range_matches_reference_values() {
        let range = throw_range(50, 100, &TABLES);
        assert!((range - 7.071_068).abs() < 1e-4, "range was {range}");

        // weight term saturates
        let heavy = throw_range(0, 1000, &TABLES);
        assert!((heavy - 10.0).abs() < 1e-4);
        assert_eq!(throw_damage(50, 100), 50);
        assert_eq!(throw_damage(33, 10), 3);
    }

    #[test]
    fn far_targets_clamp_along_direction() {
        let range = throw_range(50, 100, &TABLES);
        let landing = clamp_throw_target(Position::ORIGIN, Position::new(20, 0), range);
        assert_eq!(landing, Position::new(7, 0));

        let near = clamp_throw_target(Position::ORIGIN, Position::new(3, 4), range);
        assert_eq!(near, Position::new(3, 4));
    }

    #[test]
    fn clamped_landing_never_exceeds_range_in_any_direction() {
        let range = throw_range(50, 100, &TABLES);
        let origin = Position::new(10, 10);
        let cases = [
            (Position::new(0, 10), Position::new(3, 10)),
            (Position::new(10, 0), Position::new(10, 3)),
            (Position::new(0, 4), Position::new(4, 7)),
            (Position::new(20, 4), Position::new(16, 7)),
        ];
        for (target, expected) in cases {
            let landing = clamp_throw_target(origin, target, range);
            assert_eq!(landing, expected, "throw toward {target}");
            let travelled = Vec2::from(landing - origin).magnitude();
            assert!(travelled <= range, "travelled {travelled}, range {range}");
        }
    }
}
