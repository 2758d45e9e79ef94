//! Configuration loading and typed config structures for the Sugarscape
//! simulation.
//!
//! The canonical configuration lives in `sugarscape-config.yaml` at the
//! project root. This module defines strongly-typed structs that mirror the
//! YAML structure, and provides a loader that reads and validates the file.
//! Every field has a default, so an empty document is a valid configuration.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use sugarscape_types::NeighborhoodKind;

/// Environment variable that overrides `world.landscape_path`.
pub const LANDSCAPE_ENV: &str = "SUGARSCAPE_LANDSCAPE";

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// A value is out of its allowed range.
    #[error("invalid config value for {field}: {reason}")]
    Invalid {
        /// Dotted path of the offending field.
        field: &'static str,
        /// What is wrong with it.
        reason: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level simulation configuration.
///
/// Mirrors the structure of `sugarscape-config.yaml`. Defaults reproduce
/// the classic 50x50 growback model with 200 traders.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SimulationConfig {
    /// Grid, landscape, and seed.
    #[serde(default)]
    pub world: WorldConfig,

    /// Initial trader population and attribute ranges.
    #[serde(default)]
    pub population: PopulationConfig,

    /// Run length and progress reporting.
    #[serde(default)]
    pub simulation: RunConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl SimulationConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// `SUGARSCAPE_LANDSCAPE` overrides `world.landscape_path`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let mut config: Self = serde_yml::from_str(&contents)?;
        config.world.apply_env_overrides();
        Ok(config)
    }

    /// Parse configuration from a YAML string.
    ///
    /// Environment overrides are not applied.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yml::from_str(yaml)?;
        Ok(config)
    }

    /// Check every value against its allowed range.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.world.width == 0 {
            return Err(invalid("world.width", "must be at least 1"));
        }
        if self.world.height == 0 {
            return Err(invalid("world.height", "must be at least 1"));
        }

        let population = &self.population;
        if population.endowment_min > population.endowment_max {
            return Err(invalid(
                "population.endowment_min",
                "must not exceed population.endowment_max",
            ));
        }
        if population.metabolism_min == 0 {
            return Err(invalid("population.metabolism_min", "must be at least 1"));
        }
        if population.metabolism_min > population.metabolism_max {
            return Err(invalid(
                "population.metabolism_min",
                "must not exceed population.metabolism_max",
            ));
        }
        if population.vision_min == 0 {
            return Err(invalid("population.vision_min", "must be at least 1"));
        }
        if population.vision_min > population.vision_max {
            return Err(invalid(
                "population.vision_min",
                "must not exceed population.vision_max",
            ));
        }

        if self.simulation.steps == 0 {
            return Err(invalid("simulation.steps", "must be at least 1"));
        }
        Ok(())
    }
}

fn invalid(field: &'static str, reason: &str) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.to_owned(),
    }
}

/// Grid and landscape configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WorldConfig {
    /// Random seed for reproducibility.
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Number of grid rows.
    #[serde(default = "default_width")]
    pub width: u32,

    /// Number of grid columns.
    #[serde(default = "default_height")]
    pub height: u32,

    /// Sugar capacity matrix. Relative paths resolve against the working
    /// directory.
    #[serde(default = "default_landscape_path")]
    pub landscape_path: PathBuf,

    /// Adjacency used by every trader.
    #[serde(default)]
    pub neighborhood: NeighborhoodKind,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            width: default_width(),
            height: default_height(),
            landscape_path: default_landscape_path(),
            neighborhood: NeighborhoodKind::default(),
        }
    }
}

impl WorldConfig {
    /// Apply environment variable overrides.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var(LANDSCAPE_ENV)
            && !val.is_empty()
        {
            self.landscape_path = PathBuf::from(val);
        }
    }
}

/// Initial population configuration.
///
/// Every range is inclusive at both ends.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PopulationConfig {
    /// Number of traders placed at bootstrap.
    #[serde(default = "default_initial_population")]
    pub initial_population: u32,

    /// Lowest starting sugar and spice endowment, in whole units.
    #[serde(default = "default_endowment_min")]
    pub endowment_min: u32,

    /// Highest starting sugar and spice endowment, in whole units.
    #[serde(default = "default_endowment_max")]
    pub endowment_max: u32,

    /// Lowest metabolism rate for either resource.
    #[serde(default = "default_metabolism_min")]
    pub metabolism_min: u32,

    /// Highest metabolism rate for either resource.
    #[serde(default = "default_metabolism_max")]
    pub metabolism_max: u32,

    /// Shortest vision radius.
    #[serde(default = "default_vision_min")]
    pub vision_min: u32,

    /// Longest vision radius.
    #[serde(default = "default_vision_max")]
    pub vision_max: u32,
}

impl Default for PopulationConfig {
    fn default() -> Self {
        Self {
            initial_population: default_initial_population(),
            endowment_min: default_endowment_min(),
            endowment_max: default_endowment_max(),
            metabolism_min: default_metabolism_min(),
            metabolism_max: default_metabolism_max(),
            vision_min: default_vision_min(),
            vision_max: default_vision_max(),
        }
    }
}

/// Run length configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RunConfig {
    /// Number of steps to execute.
    #[serde(default = "default_steps")]
    pub steps: u64,

    /// Emit a progress summary every this many steps. Zero disables it.
    #[serde(default = "default_summary_interval")]
    pub summary_interval: u64,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            steps: default_steps(),
            summary_interval: default_summary_interval(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

// ---------------------------------------------------------------------------
// Default value functions (required by serde)
// ---------------------------------------------------------------------------

const fn default_seed() -> u64 {
    42
}

const fn default_width() -> u32 {
    50
}

const fn default_height() -> u32 {
    50
}

fn default_landscape_path() -> PathBuf {
    PathBuf::from("data/sugar-map.txt")
}

const fn default_initial_population() -> u32 {
    200
}

const fn default_endowment_min() -> u32 {
    25
}

const fn default_endowment_max() -> u32 {
    50
}

const fn default_metabolism_min() -> u32 {
    1
}

const fn default_metabolism_max() -> u32 {
    5
}

const fn default_vision_min() -> u32 {
    1
}

const fn default_vision_max() -> u32 {
    5
}

const fn default_steps() -> u64 {
    1000
}

const fn default_summary_interval() -> u64 {
    10
}

fn default_log_level() -> String {
    String::from("info")
}
