//! Configuration loading, validation and persistence.
//!
//! The config lives in a TOML file under the user config directory. A
//! missing file is created with defaults on first load. The `[basic]`
//! section can name a per-series override file which wholly replaces the
//! effective configuration; nested overrides are not followed.

mod migrate;

pub use migrate::{migrate_config, MigrationResult};

use std::fs;
use std::path::{Path, PathBuf};

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::pipeline::FeatureSet;

/// Configuration errors. All of these are fatal before any pipeline stage
/// runs; a bad decoration pattern in particular is never retried per-line.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not determine the user configuration directory")]
    NoConfigDir,

    #[error("chapter_label must not be empty")]
    EmptyChapterLabel,

    #[error("invalid decoration pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        source: regex::Error,
    },

    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("failed to parse config: {0}")]
    Edit(#[from] toml_edit::TomlError),
}

/// File paths and the chapter label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BasicConfig {
    /// Pre-resolved input path; empty means resolve from arguments or prompt.
    pub input: String,
    /// Pre-resolved output path; empty means resolve from arguments or prompt.
    pub output: String,
    /// Case-insensitive label protecting chapter-header lines.
    pub chapter_label: String,
    /// Path of a per-series config file that replaces this one when set.
    pub series_config: String,
}

impl Default for BasicConfig {
    fn default() -> Self {
        Self {
            input: String::new(),
            output: String::new(),
            chapter_label: "chapter".to_string(),
            series_config: String::new(),
        }
    }
}

/// The ordered decoration pattern list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdvancedConfig {
    /// Regex patterns removed from every line, applied in order.
    pub decorations: Vec<String>,
}

/// Persisted tool configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub basic: BasicConfig,
    pub advanced: AdvancedConfig,
    pub features: FeatureSet,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            basic: BasicConfig::default(),
            advanced: AdvancedConfig::default(),
            features: FeatureSet::all_enabled(),
        }
    }
}

impl Config {
    /// Path of the user config file.
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        let dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(dir.join("tsf").join("config.toml"))
    }

    /// Load the user config, creating it with defaults on first run, and
    /// following a per-series override if one is configured.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::config_path()?;
        if !path.exists() {
            let config = Self::default();
            config.save()?;
            return Ok(config);
        }
        Self::load_from(&path)
    }

    /// Load a config from an explicit path, following a per-series override
    /// if one is configured there.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let config = Self::read_file(path)?;
        if config.basic.series_config.is_empty() {
            return Ok(config);
        }

        let series_path = PathBuf::from(&config.basic.series_config);
        let mut series = Self::read_file(&series_path)?;
        // One level only: a series config naming another series config is
        // treated as plain data.
        series.basic.series_config = String::new();
        Ok(series)
    }

    fn read_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Write this config to the user config path.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::config_path()?;
        self.save_to(&path)
    }

    /// Write this config to an explicit path, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| ConfigError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Check required keys and compile every decoration pattern, failing
    /// fast before the pipeline runs.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.basic.chapter_label.trim().is_empty() {
            return Err(ConfigError::EmptyChapterLabel);
        }
        self.compiled_decorations().map(|_| ())
    }

    /// Compile the decoration pattern list in order.
    pub fn compiled_decorations(&self) -> Result<Vec<Regex>, ConfigError> {
        self.advanced
            .decorations
            .iter()
            .map(|pattern| {
                Regex::new(pattern).map_err(|source| ConfigError::InvalidPattern {
                    pattern: pattern.clone(),
                    source,
                })
            })
            .collect()
    }
}
