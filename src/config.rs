//! Game configuration, loadable from TOML.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::board::{DEFAULT_BOARD_SIZE, MAX_BOARD_SIZE};
use crate::engine::DEFAULT_TIME_LIMIT_MS;
use crate::rules::WIN_LENGTH;

/// Default AI search depth in plies
pub const DEFAULT_SEARCH_DEPTH: u8 = 2;

/// Deepest search the configuration accepts
pub const MAX_SEARCH_DEPTH: u8 = 8;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Invalid(String),
}

/// Settings for one game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub board_size: usize,
    pub search_depth: u8,
    pub ai_time_limit_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            board_size: DEFAULT_BOARD_SIZE,
            search_depth: DEFAULT_SEARCH_DEPTH,
            ai_time_limit_ms: DEFAULT_TIME_LIMIT_MS,
        }
    }
}

impl GameConfig {
    /// Parse and validate a TOML document. Missing keys take their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_toml_str(&content)
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.board_size < WIN_LENGTH || self.board_size > MAX_BOARD_SIZE {
            return Err(ConfigError::Invalid(format!(
                "board_size must be in {WIN_LENGTH}..={MAX_BOARD_SIZE}, got {}",
                self.board_size
            )));
        }
        if self.search_depth == 0 || self.search_depth > MAX_SEARCH_DEPTH {
            return Err(ConfigError::Invalid(format!(
                "search_depth must be in 1..={MAX_SEARCH_DEPTH}, got {}",
                self.search_depth
            )));
        }
        if self.ai_time_limit_ms == 0 {
            return Err(ConfigError::Invalid(
                "ai_time_limit_ms must be > 0".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GameConfig::default();
        assert_eq!(config.board_size, 19);
        assert_eq!(config.search_depth, 2);
        assert_eq!(config.ai_time_limit_ms, 2_000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = GameConfig::from_toml_str("board_size = 15\n").unwrap();
        assert_eq!(config.board_size, 15);
        assert_eq!(config.search_depth, DEFAULT_SEARCH_DEPTH);
        assert_eq!(config.ai_time_limit_ms, DEFAULT_TIME_LIMIT_MS);
    }

    #[test]
    fn test_full_toml() {
        let config = GameConfig::from_toml_str(
            "board_size = 9\nsearch_depth = 3\nai_time_limit_ms = 250\n",
        )
        .unwrap();
        assert_eq!(
            config,
            GameConfig {
                board_size: 9,
                search_depth: 3,
                ai_time_limit_ms: 250,
            }
        );
    }

    #[test]
    fn test_bad_toml() {
        let err = GameConfig::from_toml_str("board_size = \"big\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        for content in [
            "board_size = 4",
            "board_size = 65",
            "search_depth = 0",
            "search_depth = 9",
            "ai_time_limit_ms = 0",
        ] {
            let err = GameConfig::from_toml_str(content).unwrap_err();
            assert!(matches!(err, ConfigError::Invalid(_)), "{content}");
        }
    }

    #[test]
    fn test_load_missing_file() {
        let err = GameConfig::load(Path::new("/nonexistent/gomoku.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
        assert!(err.to_string().contains("/nonexistent/gomoku.toml"));
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::Invalid("search_depth must be in 1..=8, got 0".to_string());
        assert_eq!(
            err.to_string(),
            "config validation error: search_depth must be in 1..=8, got 0"
        );
    }
}
