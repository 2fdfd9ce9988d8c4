//! Runtime configuration structures and loaders.
use std::env;

use game_core::GameConfig;
use tracing::warn;

/// Settings for one session.
#[derive(Clone, Debug)]
pub struct RuntimeConfig {
    pub map: MapSize,
    pub game: GameConfig,
    /// Narration lines kept by the message log.
    pub log_capacity: usize,
    /// Mirror every narration line into the tracing output.
    pub narration_trace: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            map: MapSize::default(),
            game: GameConfig::default(),
            log_capacity: 64,
            narration_trace: false,
        }
    }
}

impl RuntimeConfig {
    /// Construct configuration from process environment variables.
    ///
    /// - `DUNGEON_MAP_WIDTH` / `DUNGEON_MAP_HEIGHT` (both required to take effect)
    /// - `DUNGEON_LOG_CAPACITY`
    /// - `DUNGEON_INITIATIVE_THRESHOLD`
    /// - `DUNGEON_NARRATION_TRACE`
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let (Some(width), Some(height)) = (
            read_env::<u32>("DUNGEON_MAP_WIDTH"),
            read_env::<u32>("DUNGEON_MAP_HEIGHT"),
        ) {
            if width < MapSize::MIN || height < MapSize::MIN {
                warn!(
                    target: "runtime::config",
                    width,
                    height,
                    minimum = MapSize::MIN,
                    "map size too small, keeping default"
                );
            } else {
                config.map = MapSize { width, height };
            }
        }

        if let Some(capacity) = read_env::<usize>("DUNGEON_LOG_CAPACITY") {
            config.log_capacity = capacity.max(1);
        }

        if let Some(threshold) = read_env::<i32>("DUNGEON_INITIATIVE_THRESHOLD") {
            if threshold > 0 {
                config.game = GameConfig::with_initiative_threshold(threshold);
            } else {
                warn!(target: "runtime::config", threshold, "initiative threshold must be positive");
            }
        }

        if let Some(trace) = read_env_bool("DUNGEON_NARRATION_TRACE") {
            config.narration_trace = trace;
        }

        config
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MapSize {
    pub width: u32,
    pub height: u32,
}

impl MapSize {
    /// Smallest side that still fits the demo level.
    pub const MIN: u32 = 12;
}

impl Default for MapSize {
    fn default() -> Self {
        Self {
            width: 24,
            height: 14,
        }
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}

fn read_env_bool(key: &str) -> Option<bool> {
    match env::var(key).ok()?.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
