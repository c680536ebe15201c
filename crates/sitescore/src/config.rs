//! Session configuration stored as YAML
//!
//! ```yaml
//! weights: [30, 30, 20, 10, 10]
//! columns:
//!   x2: PIPE_MILES
//! filter:
//!   state: TX
//!   county: All
//! iterations: 5000
//! seed: 42
//! ```
//!
//! Every field is optional. Command-line flags override whatever the file sets.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use sitescore_core::ranking::DEFAULT_TOP_N;
use sitescore_core::simulation::DEFAULT_ITERATIONS;
use sitescore_core::{
    ColumnDefaults, ColumnOverrides, FACTOR_COUNT, FactorVector, MonteCarloConfig, PercentWeights,
    SiteFilter, SweepConfig,
};

#[derive(Debug)]
pub enum ConfigError {
    Io(String),
    Parse(String),
    Serialize(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(msg) => write!(f, "IO error: {msg}"),
            ConfigError::Parse(msg) => write!(f, "Parse error: {msg}"),
            ConfigError::Serialize(msg) => write!(f, "Serialization error: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Percent weight per factor, X1..X5
    pub weights: PercentWeights,
    /// Column chosen per factor slot, falling back to `defaults`
    pub columns: ColumnOverrides,
    pub defaults: ColumnDefaults,
    pub filter: SiteFilter,
    /// Hand-entered values for manual scoring
    pub factors: FactorVector,
    /// Replacement values for site scoring
    pub overrides: [Option<f64>; FACTOR_COUNT],
    pub iterations: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    pub top_n: usize,
    pub sweep: SweepConfig,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            weights: PercentWeights::default(),
            columns: ColumnOverrides::default(),
            defaults: ColumnDefaults::default(),
            filter: SiteFilter::default(),
            factors: FactorVector::new([3.0, 3.0, 3.0, 3.0, 1.0]),
            overrides: [None; FACTOR_COUNT],
            iterations: DEFAULT_ITERATIONS,
            seed: None,
            top_n: DEFAULT_TOP_N,
            sweep: SweepConfig::default(),
        }
    }
}

impl SessionConfig {
    /// Load from `path`, or defaults when the file does not exist
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no session config, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("Failed to read config: {e}")))?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        serde_saphyr::from_str(content)
            .map_err(|e| ConfigError::Parse(format!("Failed to parse config: {e}")))
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        serde_saphyr::to_string(self)
            .map_err(|e| ConfigError::Serialize(format!("Failed to serialize config: {e}")))
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| ConfigError::Io(format!("Failed to create directory: {e}")))?;
        }
        fs::write(path, self.to_yaml()?)
            .map_err(|e| ConfigError::Io(format!("Failed to write config: {e}")))
    }

    pub fn monte_carlo(&self) -> MonteCarloConfig {
        MonteCarloConfig {
            iterations: self.iterations,
            seed: self.seed,
        }
    }
}
