use super::damage::ResistanceTable;

/// Balance parameters consulted by the combat rules.
///
/// A world hands one table set to every dispatch through the environment, so
/// rule functions never reach for globals.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatTables {
    pub resistances: ResistanceTable,
    /// Fraction of base damage shifted by one level of (in)effectiveness.
    pub resist_ratio: f32,
    /// Damage at or above this fraction of the target's maximum health is super effective.
    pub super_effective_threshold: f32,
    /// Throw distance in tiles at full strength and full weight ratio.
    pub max_throw_range: f32,
    /// Weight at which the weight term of the throw distance saturates.
    pub max_throw_weight: f32,
}

impl CombatTables {
    pub const STANDARD: Self = Self {
        resistances: ResistanceTable::STANDARD,
        resist_ratio: 0.3,
        super_effective_threshold: 0.75,
        max_throw_range: 10.0,
        max_throw_weight: 200.0,
    };
}

impl Default for CombatTables {
    fn default() -> Self {
        Self::STANDARD
    }
}
