//! Configuration for attack table construction.
//!
//! Tables are built from a [`TableConfig`], which can be written by hand or
//! loaded from TOML:
//!
//! ```toml
//! sliders = "magic"        # or "ray-scan"
//! magic-source = "search"  # or "builtin"
//! seed = 42
//! max-attempts = 1000000
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur when loading or parsing configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    /// Failed to parse the configuration file as valid TOML.
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// How sliding piece attacks are computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SliderBackend {
    /// Fancy magic bitboards: one multiply and one table read per lookup.
    #[default]
    Magic,
    /// Walk each ray at query time. No table memory, slower lookups.
    RayScan,
}

/// Where magic multipliers come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum MagicSource {
    /// Use the compiled-in constants, searching only for ones that fail
    /// validation.
    #[default]
    Builtin,
    /// Search for every multiplier from `seed`.
    Search,
}

/// Attack table construction settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct TableConfig {
    /// Slider attack backend. Defaults to magic bitboards.
    #[serde(default)]
    pub sliders: SliderBackend,
    /// Source of magic multipliers. Defaults to the builtin constants.
    #[serde(default)]
    pub magic_source: MagicSource,
    /// Seed for the magic search random number generator.
    #[serde(default = "default_seed")]
    pub seed: u64,
    /// Candidates tried per square before the search gives up.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
}

fn default_seed() -> u64 {
    0x2545_f491_4f6c_dd1d
}

fn default_max_attempts() -> u32 {
    10_000_000
}

impl Default for TableConfig {
    fn default() -> Self {
        TableConfig {
            sliders: SliderBackend::default(),
            magic_source: MagicSource::default(),
            seed: default_seed(),
            max_attempts: default_max_attempts(),
        }
    }
}

impl TableConfig {
    /// Configuration for the query-time ray scan backend.
    pub fn ray_scan() -> Self {
        TableConfig {
            sliders: SliderBackend::RayScan,
            ..Self::default()
        }
    }

    /// Configuration that searches every magic from `seed`.
    pub fn search(seed: u64) -> Self {
        TableConfig {
            magic_source: MagicSource::Search,
            seed,
            ..Self::default()
        }
    }

    /// Parses a configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ParseError`] if the text is not valid TOML or
    /// names an unknown backend.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Loads a configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ReadError`] if the file cannot be read, or
    /// [`ConfigError::ParseError`] if it contains invalid TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_gives_defaults() {
        let config = TableConfig::from_toml_str("").unwrap();
        assert_eq!(config, TableConfig::default());
        assert_eq!(config.sliders, SliderBackend::Magic);
        assert_eq!(config.magic_source, MagicSource::Builtin);
    }

    #[test]
    fn parse_full_config() {
        let config = TableConfig::from_toml_str(
            r#"
sliders = "ray-scan"
magic-source = "search"
seed = 42
max-attempts = 5000
"#,
        )
        .unwrap();

        assert_eq!(config.sliders, SliderBackend::RayScan);
        assert_eq!(config.magic_source, MagicSource::Search);
        assert_eq!(config.seed, 42);
        assert_eq!(config.max_attempts, 5000);
    }

    #[test]
    fn unknown_backend_is_rejected() {
        let err = TableConfig::from_toml_str(r#"sliders = "rotated""#).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
        assert!(err.to_string().starts_with("Failed to parse config"));
    }

    #[test]
    fn missing_file_is_read_error() {
        let err = TableConfig::load("/nonexistent/tables.toml").unwrap_err();
        assert!(matches!(err, ConfigError::ReadError(_)));
    }

    #[test]
    fn convenience_constructors() {
        assert_eq!(TableConfig::ray_scan().sliders, SliderBackend::RayScan);
        let search = TableConfig::search(7);
        assert_eq!(search.magic_source, MagicSource::Search);
        assert_eq!(search.seed, 7);
        assert_eq!(search.sliders, SliderBackend::Magic);
    }
}
