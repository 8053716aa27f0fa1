//! Configuration management for the lobby client.

use crate::error::{Error, Result};
use crate::platform;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default minimum display-name length (non-whitespace-trimmed characters).
pub const DEFAULT_MIN_IDENTITY_LEN: usize = 3;

/// Default maximum outbound message body length (10KB).
pub const DEFAULT_MAX_BODY_LENGTH: usize = 10 * 1024;

/// Main configuration struct.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    /// Minimum length of a trimmed display name accepted at join.
    #[serde(default = "default_min_identity_len")]
    pub min_identity_len: usize,

    /// Maximum length in bytes of an outbound message body.
    #[serde(default = "default_max_body_length")]
    pub max_body_length: usize,
}

fn default_min_identity_len() -> usize {
    DEFAULT_MIN_IDENTITY_LEN
}

fn default_max_body_length() -> usize {
    DEFAULT_MAX_BODY_LENGTH
}

impl Default for Config {
    fn default() -> Self {
        Self {
            min_identity_len: DEFAULT_MIN_IDENTITY_LEN,
            max_body_length: DEFAULT_MAX_BODY_LENGTH,
        }
    }
}

impl Config {
    /// Load configuration from the default config file.
    pub fn load() -> Result<Self> {
        let config_path = platform::config_file_path();

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            Ok(Config::default())
        }
    }

    /// Load configuration from an explicit path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let mut config: Config = serde_json::from_str(&contents)?;
        config.fix_invalid_values();
        Ok(config)
    }

    /// Fix any invalid values with sensible defaults.
    ///
    /// The name rule may be tightened but never loosened below the default.
    fn fix_invalid_values(&mut self) {
        if self.min_identity_len < DEFAULT_MIN_IDENTITY_LEN {
            self.min_identity_len = DEFAULT_MIN_IDENTITY_LEN;
        }
        if self.max_body_length == 0 {
            self.max_body_length = DEFAULT_MAX_BODY_LENGTH;
        }
    }

    /// Save configuration to the default config file.
    pub fn save(&mut self) -> Result<()> {
        self.save_to(&platform::config_file_path())
    }

    /// Save configuration to an explicit path.
    pub fn save_to(&mut self, config_path: &Path) -> Result<()> {
        self.fix_invalid_values();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(config_path, contents)?;

        Ok(())
    }

    /// Load configuration from environment variables, falling back to file/defaults.
    pub fn load_with_env() -> Result<Self> {
        let mut config = Self::load()?;
        config.apply_env()?;
        Ok(config)
    }

    fn apply_env(&mut self) -> Result<()> {
        if let Ok(value) = std::env::var("LOBBY_MIN_IDENTITY_LEN") {
            self.min_identity_len = parse_env("LOBBY_MIN_IDENTITY_LEN", &value)?;
        }

        if let Ok(value) = std::env::var("LOBBY_MAX_BODY_LENGTH") {
            self.max_body_length = parse_env("LOBBY_MAX_BODY_LENGTH", &value)?;
        }

        self.fix_invalid_values();
        Ok(())
    }
}

fn parse_env(name: &str, value: &str) -> Result<usize> {
    value
        .trim()
        .parse()
        .map_err(|e| Error::Config(format!("{name}={value:?} is not a valid number: {e}")))
}
