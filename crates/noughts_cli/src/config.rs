//! Match configuration loaded from TOML.

use crate::controller::Mode;
use derive_getters::Getters;
use derive_more::{Display, Error};
use noughts::SearchConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument};

/// Settings for the terminal front end.
///
/// Every field has a default, so an empty file is a valid config.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Engine settings.
    search: SearchConfig,

    /// Rounds per `play` or `selfplay` session.
    rounds: u32,

    /// Seating for `play`.
    mode: Mode,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            search: SearchConfig::default(),
            rounds: 1,
            mode: Mode::default(),
        }
    }
}

impl CliConfig {
    /// Loads configuration from TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_toml(&content)?;
        info!(rounds = config.rounds, mode = ?config.mode, "Config loaded successfully");
        Ok(config)
    }

    /// Parses configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))
    }

    /// Loads `path` if given, otherwise the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Replaces the engine settings.
    pub fn set_search(&mut self, search: SearchConfig) {
        self.search = search;
    }

    /// Replaces the round count.
    pub fn set_rounds(&mut self, rounds: u32) {
        self.rounds = rounds;
    }

    /// Replaces the seating.
    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use noughts::Player;

    #[test]
    fn test_empty_config_uses_defaults() {
        assert_eq!(CliConfig::from_toml("").unwrap(), CliConfig::default());
        assert_eq!(CliConfig::load(None).unwrap(), CliConfig::default());
    }

    #[test]
    fn test_full_config() {
        let config = CliConfig::from_toml(
            r#"
rounds = 3
mode = "vs-human"

[search]
automated = "X"
parallel_root = true
"#,
        )
        .unwrap();
        assert_eq!(*config.rounds(), 3);
        assert_eq!(*config.mode(), Mode::VsHuman);
        assert_eq!(*config.search(), SearchConfig::new(Player::X, true));
    }

    #[test]
    fn test_bad_config_reports_location() {
        let err = CliConfig::from_toml("rounds = \"many\"").unwrap_err();
        assert!(err.message.starts_with("Failed to parse config"));
        assert!(err.file.ends_with("config.rs"));
    }

    #[test]
    fn test_missing_file() {
        let err = CliConfig::from_file("does/not/exist.toml").unwrap_err();
        assert!(err.message.starts_with("Failed to read config file"));
    }
}
