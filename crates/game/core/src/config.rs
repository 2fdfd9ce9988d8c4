/// Game configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameConfig {
    /// Accumulated initiative an actor needs before it is admitted to a turn.
    pub initiative_threshold: i32,
}

impl GameConfig {
    // ===== compile-time constants =====
    /// Taxi distance within which any attacker may strike, regardless of weapon range.
    pub const MELEE_REACH: i32 = 2;
    /// Attribute level that maps to a skill strength of 1.0.
    pub const ATTRIBUTE_SCALE: f32 = 100.0;
    /// Energy regeneration accumulates until it reaches this value, then grants one point.
    pub const ENERGY_POINT: f32 = 1.0;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_INITIATIVE_THRESHOLD: i32 = 2000;

    pub fn new() -> Self {
        Self {
            initiative_threshold: Self::DEFAULT_INITIATIVE_THRESHOLD,
        }
    }

    pub fn with_initiative_threshold(initiative_threshold: i32) -> Self {
        Self {
            initiative_threshold,
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}
