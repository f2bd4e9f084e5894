//! Configuration loaded from `.movemap.toml`.
//!
//! Every section is optional; missing values take their defaults. Command-line
//! flags override whatever the file says.

pub mod loader;
pub mod parallel;

pub use loader::{
    default_config_toml, discover_config, load_config, load_config_from, parse_config,
    write_default_config, CONFIG_FILE_NAME,
};
pub use parallel::ParallelConfig;

use crate::algorithm::AlgorithmKind;
use crate::entity::NormalizationPolicy;
use crate::errors::{Error, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MovemapConfig {
    #[serde(default)]
    pub algorithms: AlgorithmsConfig,
    #[serde(default)]
    pub parallel: ParallelConfig,
    #[serde(default)]
    pub normalization: NormalizationConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

impl MovemapConfig {
    pub fn validate(&self) -> Result<()> {
        if self.algorithms.enabled.is_empty() {
            return Err(Error::configuration("no algorithm enabled"));
        }
        if !(0.0..=1.0).contains(&self.output.min_accuracy) {
            return Err(Error::configuration(format!(
                "min_accuracy must be within [0, 1], got {}",
                self.output.min_accuracy
            )));
        }
        Ok(())
    }
}

fn default_algorithms() -> Vec<AlgorithmKind> {
    AlgorithmKind::ALL.to_vec()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlgorithmsConfig {
    #[serde(default = "default_algorithms")]
    pub enabled: Vec<AlgorithmKind>,
    #[serde(default)]
    pub enable_field_refactorings: bool,
}

impl Default for AlgorithmsConfig {
    fn default() -> Self {
        Self {
            enabled: default_algorithms(),
            enable_field_refactorings: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NormalizationConfig {
    #[serde(default)]
    pub policy: NormalizationPolicy,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Proposals below this accuracy are not reported
    #[serde(default)]
    pub min_accuracy: f64,
}
