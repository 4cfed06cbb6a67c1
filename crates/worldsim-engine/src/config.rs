//! Simulation configuration (spec §6), loadable from a TOML file.
//!
//! Mirrors the teacher's `director::config::DirectorConfig` pattern: a
//! `Default` impl providing every documented default, `from_file`/`from_str`
//! for loading, and `to_toml` for round-tripping a starter file.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Configuration for a simulation run (spec §6).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// `None` means nondeterministic; deterministic runs must supply a seed.
    pub seed: Option<u64>,
    /// Chunk size in days (default ~100 turns).
    pub chunk_size_days: i64,
    /// Intrinsic per-day growth rate by species.
    pub growth_rates: HashMap<String, f64>,
    /// Default base carrying capacity per entity kind, overridable per entity.
    pub base_carrying_capacity: BaseCapacityConfig,
    /// Range for the randomly sampled environmental factor, `(low, high)`.
    pub environmental_factor_range: (f64, f64),
    /// Starting infrastructure factor (mutable during a run by events).
    pub infrastructure_factor_initial: f64,
    /// Range for the randomly sampled location factor, `(low, high)`.
    pub location_factor_range: (f64, f64),
    /// Validation threshold: per-step growth above this ratio triggers a
    /// warning (spec §7).
    pub max_growth_rate_per_step: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            seed: None,
            chunk_size_days: 36_525,
            growth_rates: HashMap::new(),
            base_carrying_capacity: BaseCapacityConfig::default(),
            environmental_factor_range: (0.8, 1.2),
            infrastructure_factor_initial: 1.0,
            location_factor_range: (0.9, 1.1),
            max_growth_rate_per_step: 0.10,
        }
    }
}

impl SimulationConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
        Self::from_str(&content)
    }

    /// Parses configuration from a TOML string. Missing fields fall back to
    /// [`SimulationConfig::default`].
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::Toml)
    }

    /// Serializes this configuration back to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(ConfigError::TomlSerialize)
    }

    /// The base carrying capacity for `kind` before any per-entity override.
    pub fn base_capacity_for(&self, kind: worldsim_types::EntityKind) -> i64 {
        match kind {
            worldsim_types::EntityKind::Region => self.base_carrying_capacity.region,
            worldsim_types::EntityKind::Province => self.base_carrying_capacity.province,
        }
    }
}

/// Per-kind base carrying capacity defaults (spec §6
/// `base_carrying_capacity.{region,province}`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BaseCapacityConfig {
    pub region: i64,
    pub province: i64,
}

impl Default for BaseCapacityConfig {
    fn default() -> Self {
        Self {
            region: 50_000,
            province: 50_000,
        }
    }
}

/// Errors that can occur while loading or serializing a [`SimulationConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("io error reading config: {0}")]
    Io(std::io::Error),
    #[error("toml parse error: {0}")]
    Toml(toml::de::Error),
    #[error("toml serialize error: {0}")]
    TomlSerialize(toml::ser::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_spec_six() {
        let config = SimulationConfig::default();
        assert_eq!(config.chunk_size_days, 36_525);
        assert_eq!(config.environmental_factor_range, (0.8, 1.2));
        assert_eq!(config.infrastructure_factor_initial, 1.0);
        assert_eq!(config.location_factor_range, (0.9, 1.1));
        assert_eq!(config.max_growth_rate_per_step, 0.10);
        assert_eq!(config.base_carrying_capacity.region, 50_000);
        assert_eq!(config.base_carrying_capacity.province, 50_000);
    }

    #[test]
    fn partial_toml_uses_defaults_for_missing_fields() {
        let toml = r#"
            seed = 42
            chunk_size_days = 365

            [growth_rates]
            huum = 0.004
        "#;
        let config = SimulationConfig::from_str(toml).unwrap();
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.chunk_size_days, 365);
        assert_eq!(config.growth_rates.get("huum"), Some(&0.004));
        // untouched fields keep their defaults
        assert_eq!(config.environmental_factor_range, (0.8, 1.2));
    }

    #[test]
    fn round_trips_through_toml() {
        let config = SimulationConfig::default();
        let toml = config.to_toml().unwrap();
        let parsed = SimulationConfig::from_str(&toml).unwrap();
        assert_eq!(config, parsed);
    }
}
