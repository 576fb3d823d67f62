//! Self-play configuration loading.
//!
//! A `play.toml` looks like:
//!
//! ```toml
//! white = "ai"
//! black = "random"
//! max_plies = 200
//!
//! [search]
//! depth = 2
//! ```

use chess_ai::{ConfigError, SearchConfig};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Which selector plays a side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PlayerKind {
    /// Negamax search.
    #[default]
    Ai,
    /// Uniformly random legal moves.
    Random,
}

/// Self-play settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PlayConfig {
    #[serde(default)]
    pub white: PlayerKind,
    #[serde(default = "default_black")]
    pub black: PlayerKind,
    /// Plies after which an unfinished game is abandoned.
    #[serde(default = "default_max_plies")]
    pub max_plies: usize,
    /// Seed for the random players and search fallbacks. Unseeded games
    /// draw from system entropy.
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub search: SearchConfig,
}

fn default_black() -> PlayerKind {
    PlayerKind::Random
}

fn default_max_plies() -> usize {
    200
}

impl Default for PlayConfig {
    fn default() -> Self {
        PlayConfig {
            white: PlayerKind::default(),
            black: default_black(),
            max_plies: default_max_plies(),
            seed: None,
            search: SearchConfig::default(),
        }
    }
}

impl PlayConfig {
    /// Loads the configuration at `path`, or the defaults if the file does
    /// not exist.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: PlayConfig = toml::from_str(&content)?;
            SearchConfig::with_depth(config.search.depth)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Returns the default configuration path, `play.toml` in the current
    /// working directory.
    pub fn config_path() -> PathBuf {
        PathBuf::from("play.toml")
    }
}
