//! Configuration System
//!
//! Loads run parameters from a TOML file so runs can be tuned without
//! recompiling. Every section and field is optional and falls back to the
//! defaults below; command-line flags override file values.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::driver::SimulationParams;
use crate::evolution::EvolutionParams;
use crate::population::KindMix;

/// Default configuration file path
pub const DEFAULT_CONFIG_PATH: &str = "ultimatum.toml";

/// Top-level configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub simulation: SimulationConfig,
    pub population: PopulationConfig,
    pub network: NetworkConfig,
    pub evolution: EvolutionParams,
    pub output: OutputConfig,
}

/// Generation loop parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub generations: u64,
    pub evolve_every: u64,
    pub sample_every: u64,
    pub seed: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            generations: 5000,
            evolve_every: 1,
            sample_every: 10,
            seed: 42,
        }
    }
}

/// Population size and initial kinds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PopulationConfig {
    pub size: usize,
    pub kind_mix: KindMix,
}

impl Default for PopulationConfig {
    fn default() -> Self {
        Self {
            size: 100,
            kind_mix: KindMix::Mixed,
        }
    }
}

/// Barabási–Albert network parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// Edges each new node attaches with
    pub attachment: usize,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self { attachment: 4 }
    }
}

/// Output files and progress logging
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub directory: PathBuf,
    /// Population snapshot interval in generations, 0 for start/end only
    pub snapshot_every: u64,
    /// Progress log interval in generations, 0 to disable
    pub log_every: u64,
    pub histogram_bins: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("output"),
            snapshot_every: 1000,
            log_every: 500,
            histogram_bins: 20,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load configuration from `path`, or use defaults if it is missing or
    /// invalid
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        Self::load(path).unwrap_or_else(|e| {
            tracing::warn!("Could not load {}: {}. Using defaults.", path.display(), e);
            Self::default()
        })
    }

    /// Serialize the configuration back to TOML
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Parameters for the generation driver
    pub fn simulation_params(&self) -> SimulationParams {
        SimulationParams {
            generations: self.simulation.generations,
            evolve_every: self.simulation.evolve_every,
            sample_every: self.simulation.sample_every,
            evolution: self.evolution,
        }
    }

    /// Check cross-field constraints
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.simulation_params()
            .validate()
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;

        let size = self.population.size;
        let attachment = self.network.attachment;
        if attachment < 1 || attachment >= size {
            return Err(ConfigError::Invalid(format!(
                "network.attachment must satisfy 1 <= attachment < population.size \
                 (got attachment = {}, size = {})",
                attachment, size
            )));
        }
        if self.output.histogram_bins == 0 {
            return Err(ConfigError::Invalid(
                "output.histogram_bins must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

/// Configuration error type
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("TOML serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Generates a default configuration file content.
pub fn default_config_toml() -> String {
    r#"# Ultimatum network simulation

[simulation]
generations = 5000
evolve_every = 1
sample_every = 10
seed = 42

[population]
size = 100
# "mixed", "empathetic", "pragmatic" or "independent"
kind_mix = "mixed"

[network]
attachment = 4

[evolution]
mutation_rate = 0.1
mutation_stddev = 0.05
mutate_imitators = true

[output]
directory = "output"
snapshot_every = 1000
log_every = 500
histogram_bins = 20
"#
    .to_string()
}
