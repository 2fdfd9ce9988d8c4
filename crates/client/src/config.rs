//! Client configuration.
use std::env;
use std::path::PathBuf;

#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// When set, logs are also written to `dungeon.log` in this directory.
    pub log_dir: Option<PathBuf>,
    /// Colour narration with ANSI escapes.
    pub color: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            log_dir: None,
            color: true,
        }
    }
}

impl ClientConfig {
    /// Construct client configuration from environment variables.
    ///
    /// Environment variables:
    /// - `DUNGEON_LOG_DIR` - Directory for the log file (default: stderr only)
    /// - `DUNGEON_COLOR` - Colourise narration (default: true; `NO_COLOR` also disables)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(dir) = env::var_os("DUNGEON_LOG_DIR").filter(|dir| !dir.is_empty()) {
            config.log_dir = Some(PathBuf::from(dir));
        }

        if let Some(color) = read_env_bool("DUNGEON_COLOR") {
            config.color = color;
        }
        if env::var_os("NO_COLOR").is_some() {
            config.color = false;
        }

        config
    }
}

fn read_env_bool(key: &str) -> Option<bool> {
    match env::var(key).ok()?.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
