//! Journey tuning configuration loaded from `stratum.toml`.
//!
//! The layer durations and per-layer progress maxima are product tuning
//! constants, not algorithm inputs the engine derives. They live here as
//! named configuration so retuning them never touches the journey logic.
//! Every field has a default, and a missing config file is not an error.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// Nominal duration of each layer in days. Defaults sum to 120.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LayerDurations {
    /// Discipline layer length in days
    pub discipline: u32,
    /// Values layer length in days
    pub values: u32,
    /// Control layer length in days
    pub control: u32,
    /// Vision layer length in days
    pub vision: u32,
}

impl Default for LayerDurations {
    fn default() -> Self {
        Self {
            discipline: 15,
            values: 30,
            control: 30,
            vision: 45,
        }
    }
}

impl LayerDurations {
    /// Total journey length in days (120 with defaults).
    #[must_use]
    pub const fn total(&self) -> u32 {
        self.discipline + self.values + self.control + self.vision
    }
}

/// Expected item counts used as denominators for per-layer progress ratios.
///
/// Defaults: discipline 48 (3 habits + 3×15 days of completions), values 10
/// (5 values + 4 rituals + 1 personal code), control 8 (4 weekly + 4 daily
/// plans), vision 10 (3 aspects + 7 milestones).
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LayerMaxima {
    /// Denominator for the Discipline layer
    pub discipline: u64,
    /// Denominator for the Values layer
    pub values: u64,
    /// Denominator for the Control layer
    pub control: u64,
    /// Denominator for the Vision layer
    pub vision: u64,
}

impl Default for LayerMaxima {
    fn default() -> Self {
        Self {
            discipline: 48,
            values: 10,
            control: 8,
            vision: 10,
        }
    }
}

/// Complete journey tuning configuration.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct JourneyConfig {
    /// Layer durations in days
    pub durations: LayerDurations,
    /// Per-layer progress denominators
    pub maxima: LayerMaxima,
}

/// Loads journey configuration from a TOML file.
///
/// # Errors
/// Returns an error if the file cannot be read or the TOML does not parse.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<JourneyConfig> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read config file: {e}"),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse journey config: {e}"),
    })
}

/// Loads journey configuration from the default location (`./stratum.toml`),
/// falling back to the built-in defaults when the file does not exist.
pub fn load_or_default() -> Result<JourneyConfig> {
    if Path::new("stratum.toml").exists() {
        load_config("stratum.toml")
    } else {
        Ok(JourneyConfig::default())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_default_durations_sum_to_120() {
        let durations = LayerDurations::default();
        assert_eq!(durations.total(), 120);
        assert_eq!(durations.discipline, 15);
        assert_eq!(durations.values, 30);
        assert_eq!(durations.control, 30);
        assert_eq!(durations.vision, 45);
    }

    #[test]
    fn test_parse_partial_config_keeps_defaults() {
        let toml_str = r#"
            [durations]
            vision = 60

            [maxima]
            control = 12
        "#;

        let config: JourneyConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.durations.vision, 60);
        assert_eq!(config.durations.discipline, 15);
        assert_eq!(config.maxima.control, 12);
        assert_eq!(config.maxima.discipline, 48);
    }

    #[test]
    fn test_empty_config_is_default() {
        let config: JourneyConfig = toml::from_str("").unwrap();
        assert_eq!(config, JourneyConfig::default());
    }
}
