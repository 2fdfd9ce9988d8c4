//! Damage types and the resistance matrix.

// ============================================================================
// Damage Type
// ============================================================================

/// Damage type for resistances and damage calculation.
///
/// The same set names an entity's resistance type: a resistance unit with
/// `resist_type = Fire` consults the `Fire` row of [`ResistanceTable`].
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumCount,
    strum::EnumIter,
    strum::AsRefStr,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DamageType {
    /// Physical damage (melee, projectiles).
    Physical,
    /// Fire damage (burns, explosions).
    Fire,
    /// Cold damage (ice, frost).
    Cold,
    /// Lightning damage (electricity, storms).
    Lightning,
    /// Poison damage (toxins, venom).
    Poison,
    /// Arcane damage (pure magic).
    Arcane,
    /// True damage (ignores all resistances).
    True,
}

impl DamageType {
    const fn index(self) -> usize {
        self as usize
    }
}

// ============================================================================
// Resistance Table
// ============================================================================

/// How a resistance type reacts to a damage type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Affinity {
    /// Damage is reduced.
    Resists,
    #[default]
    Neutral,
    /// Damage is amplified.
    Vulnerable,
}

impl Affinity {
    /// Signed resist level: 1 resists, 0 neutral, -1 vulnerable.
    pub const fn level(self) -> i32 {
        match self {
            Affinity::Resists => 1,
            Affinity::Neutral => 0,
            Affinity::Vulnerable => -1,
        }
    }
}

const COUNT: usize = <DamageType as strum::EnumCount>::COUNT;

/// Square matrix indexed by `[resist type][damage type]`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResistanceTable {
    rows: [[Affinity; COUNT]; COUNT],
}

impl ResistanceTable {
    /// Every pair neutral.
    pub const NEUTRAL: Self = Self {
        rows: [[Affinity::Neutral; COUNT]; COUNT],
    };

    /// The standard elemental matrix.
    ///
    /// Columns: physical, fire, cold, lightning, poison, arcane, true.
    pub const STANDARD: Self = {
        use Affinity::{Neutral as N, Resists as R, Vulnerable as V};
        Self {
            rows: [
                [R, N, N, N, N, V, N], // physical
                [N, R, V, N, N, N, N], // fire
                [N, V, R, N, N, N, N], // cold
                [N, N, N, R, N, N, N], // lightning
                [N, N, N, V, R, N, N], // poison
                [V, N, N, N, N, R, N], // arcane
                [N, N, N, N, N, N, N], // true
            ],
        }
    };

    pub const fn affinity(&self, resist: DamageType, damage: DamageType) -> Affinity {
        self.rows[resist.index()][damage.index()]
    }

    pub fn set(&mut self, resist: DamageType, damage: DamageType, affinity: Affinity) {
        self.rows[resist.index()][damage.index()] = affinity;
    }
}

impl Default for ResistanceTable {
    fn default() -> Self {
        Self::STANDARD
    }
}
