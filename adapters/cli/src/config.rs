use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use nightmare_maze_core::Rules;
use nightmare_maze_system_generation::MazeConfig;
use serde::Deserialize;
use thiserror::Error;

/// Rows shown on screen at once when no configuration overrides it.
const DEFAULT_VISIBLE_ROWS: u32 = 15;

/// Settings read from an optional TOML file.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub(crate) struct GameConfig {
    /// Maze generation knobs.
    pub(crate) maze: MazeConfig,
    /// Gameplay timings and distances.
    pub(crate) rules: RulesConfig,
    /// Window layout.
    pub(crate) display: DisplayConfig,
}

impl GameConfig {
    /// Reads and parses the configuration stored at `path`.
    pub(crate) fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }
}

/// Gameplay rules with durations expressed in milliseconds.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub(crate) struct RulesConfig {
    tile_length: f32,
    player_move_delay_ms: u64,
    shot_cooldown_ms: u64,
    enemy_step_interval_ms: u64,
    bullet_speed: f32,
    hit_radius: f32,
    visibility_radius: f32,
}

impl RulesConfig {
    /// Converts the file representation into the world's rules.
    pub(crate) fn to_rules(&self) -> Rules {
        Rules {
            tile_length: self.tile_length,
            player_move_delay: Duration::from_millis(self.player_move_delay_ms),
            shot_cooldown: Duration::from_millis(self.shot_cooldown_ms),
            enemy_step_interval: Duration::from_millis(self.enemy_step_interval_ms),
            bullet_speed: self.bullet_speed,
            hit_radius: self.hit_radius,
            visibility_radius: self.visibility_radius,
        }
    }
}

impl Default for RulesConfig {
    fn default() -> Self {
        let millis = |duration: Duration| duration.as_millis() as u64;
        Self {
            tile_length: Rules::DEFAULT_TILE_LENGTH,
            player_move_delay_ms: millis(Rules::DEFAULT_PLAYER_MOVE_DELAY),
            shot_cooldown_ms: millis(Rules::DEFAULT_SHOT_COOLDOWN),
            enemy_step_interval_ms: millis(Rules::DEFAULT_ENEMY_STEP_INTERVAL),
            bullet_speed: Rules::DEFAULT_BULLET_SPEED,
            hit_radius: Rules::DEFAULT_HIT_RADIUS,
            visibility_radius: Rules::DEFAULT_VISIBILITY_RADIUS,
        }
    }
}

/// Window settings.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub(crate) struct DisplayConfig {
    /// Number of maze rows visible before the view pages.
    pub(crate) visible_rows: u32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            visible_rows: DEFAULT_VISIBLE_ROWS,
        }
    }
}

/// Errors raised while loading a configuration file.
#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    /// The file could not be read.
    #[error("could not read configuration file {}", path.display())]
    Read {
        /// Location of the file.
        path: PathBuf,
        /// Underlying I/O failure.
        source: std::io::Error,
    },
    /// The file is not valid configuration TOML.
    #[error("could not parse configuration file {}", path.display())]
    Parse {
        /// Location of the file.
        path: PathBuf,
        /// Underlying parse failure.
        source: toml::de::Error,
    },
}
