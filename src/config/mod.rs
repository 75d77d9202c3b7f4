//! Configuration system for schmuck.
//!
//! This module provides the configuration structure with sensible defaults
//! and support for serialization/deserialization via serde. Configuration is
//! loaded from a TOML file and merged with command-line arguments.
//!
//! # Example
//!
//! ```
//! use schmuck::config::{Config, OutputFormat};
//!
//! // Use default configuration
//! let config = Config::default();
//! assert_eq!(config.cache_max_size, 200);
//! assert_eq!(config.output_format, OutputFormat::Yaml);
//!
//! // Disable expression caching
//! let uncached = Config {
//!     cache_max_size: 0,
//!     ..Config::default()
//! };
//! ```

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// How results are printed by the command-line tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Yaml,
    Json,
}

/// Configuration for schmuck.
///
/// # Fields
///
/// * `cache_max_size` - Compiled expressions kept before the cache is cleared; 0 disables caching (default: 200)
/// * `output_format` - Output format of the command-line tool (default: yaml)
/// * `symbolize_colon_strings` - Load `:name` strings and keys as symbols (default: true)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Compiled expressions kept before the cache is cleared
    #[serde(default = "default_cache_max_size")]
    pub cache_max_size: usize,

    /// Output format of the command-line tool
    #[serde(default)]
    pub output_format: OutputFormat,

    /// Load `:name` strings and keys as symbols
    #[serde(default = "default_symbolize_colon_strings")]
    pub symbolize_colon_strings: bool,
}

/// Returns the default cache size.
fn default_cache_max_size() -> usize {
    200
}

fn default_symbolize_colon_strings() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache_max_size: default_cache_max_size(),
            output_format: OutputFormat::default(),
            symbolize_colon_strings: default_symbolize_colon_strings(),
        }
    }
}

impl Config {
    /// Returns the path to the config file.
    ///
    /// Uses `~/.config/schmuck/config.toml` on all platforms.
    pub fn config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|mut path| {
            path.push(".config");
            path.push("schmuck");
            path.push("config.toml");
            path
        })
    }

    /// Loads configuration from the default config file.
    ///
    /// Returns the default configuration if the file doesn't exist or can't be read.
    pub fn load() -> Self {
        let config_path = match Self::config_path() {
            Some(path) => path,
            None => return Self::default(),
        };

        if !config_path.exists() {
            return Self::default();
        }

        match Self::load_from(&config_path) {
            Ok(config) => config,
            Err(err) => {
                log::warn!("ignoring unreadable config {}: {:#}", config_path.display(), err);
                Self::default()
            }
        }
    }

    /// Loads configuration from `path`, reporting read and parse errors.
    pub fn load_from<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    /// Saves configuration to the default config file.
    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        self.save_to(config_path)
    }

    /// Saves configuration to `path`, creating parent directories as needed.
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let toml_string = toml::to_string_pretty(self)?;
        std::fs::write(path, toml_string)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: Config = toml::from_str("output_format = \"json\"").unwrap();
        assert_eq!(config.output_format, OutputFormat::Json);
        assert_eq!(config.cache_max_size, 200);
        assert!(config.symbolize_colon_strings);
    }

    #[test]
    fn test_caching_can_be_disabled() {
        let config: Config = toml::from_str("cache_max_size = 0").unwrap();
        assert_eq!(config.cache_max_size, 0);
    }
}
