//! Search configuration loaded from TOML.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur when loading or validating a search configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("Failed to read config file: {0}")]
    Read(#[from] std::io::Error),
    /// Failed to parse the configuration file as valid TOML.
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    /// Depth outside `1..=SearchConfig::MAX_DEPTH`.
    #[error("Invalid search depth {0}: expected 1 to {max}", max = SearchConfig::MAX_DEPTH)]
    InvalidDepth(u32),
}

/// Settings for [`Searcher`](crate::Searcher).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct SearchConfig {
    /// Plies searched from the root. Defaults to 2.
    #[serde(default = "default_depth")]
    pub depth: u32,
}

fn default_depth() -> u32 {
    2
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            depth: default_depth(),
        }
    }
}

impl SearchConfig {
    /// Deepest search accepted from configuration. The search has no time
    /// limit, so this keeps a typo from hanging the caller.
    pub const MAX_DEPTH: u32 = 8;

    pub fn with_depth(depth: u32) -> Result<Self, ConfigError> {
        SearchConfig { depth }.validated()
    }

    /// Loads a configuration from `path`, or the defaults if the file does
    /// not exist.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] if the file exists but cannot be read,
    /// [`ConfigError::Parse`] if it is not valid TOML, or
    /// [`ConfigError::InvalidDepth`] if the depth is out of range.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Self::from_toml(&content)
        } else {
            Ok(Self::default())
        }
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: SearchConfig = toml::from_str(content)?;
        config.validated()
    }

    fn validated(self) -> Result<Self, ConfigError> {
        if (1..=Self::MAX_DEPTH).contains(&self.depth) {
            Ok(self)
        } else {
            Err(ConfigError::InvalidDepth(self.depth))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn default_depth_is_two() {
        assert_eq!(SearchConfig::default().depth, 2);
        assert_eq!(SearchConfig::from_toml("").unwrap(), SearchConfig::default());
    }

    #[test]
    fn parse_depth() {
        let config = SearchConfig::from_toml("depth = 3").unwrap();
        assert_eq!(config.depth, 3);
    }

    #[test]
    fn rejects_out_of_range_depth() {
        assert!(matches!(
            SearchConfig::from_toml("depth = 0"),
            Err(ConfigError::InvalidDepth(0))
        ));
        assert!(matches!(
            SearchConfig::with_depth(40),
            Err(ConfigError::InvalidDepth(40))
        ));
    }

    #[test]
    fn rejects_invalid_toml() {
        assert!(matches!(
            SearchConfig::from_toml("depth = \"deep\""),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn load_missing_file_returns_default() {
        let config = SearchConfig::load("/nonexistent/search.toml").unwrap();
        assert_eq!(config, SearchConfig::default());
    }

    #[test]
    fn load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "depth = 4").unwrap();
        let config = SearchConfig::load(file.path()).unwrap();
        assert_eq!(config.depth, 4);
    }
}
