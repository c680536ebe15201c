use serde::{Deserialize, Serialize};

use crate::error::{DatasetError, EngineError, Result};
use crate::model::{Dataset, FACTOR_COUNT, Factor};

/// Default dataset column for each factor slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnDefaults {
    pub generation: String,
    pub pipeline: String,
    pub market: String,
    pub incentives: String,
    pub water: String,
}

impl Default for ColumnDefaults {
    fn default() -> Self {
        Self {
            generation: Factor::Generation.conventional_column().to_string(),
            pipeline: Factor::Pipeline.conventional_column().to_string(),
            market: Factor::Market.conventional_column().to_string(),
            incentives: Factor::Incentives.conventional_column().to_string(),
            water: Factor::Water.conventional_column().to_string(),
        }
    }
}

impl ColumnDefaults {
    #[must_use]
    pub fn for_factor(&self, factor: Factor) -> &str {
        match factor {
            Factor::Generation => &self.generation,
            Factor::Pipeline => &self.pipeline,
            Factor::Market => &self.market,
            Factor::Incentives => &self.incentives,
            Factor::Water => &self.water,
        }
    }
}

/// User-chosen columns keyed by slot. `None` falls back to the default.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnOverrides {
    pub x1: Option<String>,
    pub x2: Option<String>,
    pub x3: Option<String>,
    pub x4: Option<String>,
    pub x5: Option<String>,
}

impl ColumnOverrides {
    #[must_use]
    pub fn for_factor(&self, factor: Factor) -> Option<&str> {
        match factor {
            Factor::Generation => self.x1.as_deref(),
            Factor::Pipeline => self.x2.as_deref(),
            Factor::Market => self.x3.as_deref(),
            Factor::Incentives => self.x4.as_deref(),
            Factor::Water => self.x5.as_deref(),
        }
    }
}

/// Resolved assignment of each factor slot to one dataset column.
///
/// The same column may back several slots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMapping {
    columns: [String; FACTOR_COUNT],
}

impl ColumnMapping {
    /// Mapping to explicit column names, unchecked against any dataset
    #[must_use]
    pub fn new(columns: [String; FACTOR_COUNT]) -> Self {
        Self { columns }
    }

    /// Resolve every slot against `dataset`.
    ///
    /// An override naming a column the dataset lacks is an error. A default
    /// the dataset lacks is logged as a warning and, when no override covers
    /// it, the slot is reported unmapped; no other column is substituted.
    pub fn resolve(
        dataset: &Dataset,
        defaults: &ColumnDefaults,
        overrides: &ColumnOverrides,
    ) -> Result<Self> {
        let mut columns: [String; FACTOR_COUNT] = Default::default();
        let mut unmapped = Vec::new();

        for factor in Factor::ALL {
            if let Some(chosen) = overrides.for_factor(factor) {
                if !dataset.has_column(chosen) {
                    return Err(DatasetError::UnknownColumn(chosen.to_string()).into());
                }
                columns[factor.index()] = chosen.to_string();
                continue;
            }

            let default = defaults.for_factor(factor);
            if dataset.has_column(default) {
                columns[factor.index()] = default.to_string();
            } else {
                tracing::warn!(
                    factor = %factor,
                    column = default,
                    "default column not present in dataset"
                );
                unmapped.push(factor);
            }
        }

        if !unmapped.is_empty() {
            return Err(EngineError::UnmappedFactors(unmapped));
        }

        let mapping = Self { columns };
        let shared = FACTOR_COUNT - mapping.distinct_columns().len();
        if shared > 0 {
            tracing::info!(shared, "several factors read the same column");
        }
        tracing::debug!(columns = ?mapping.columns, "resolved factor columns");
        Ok(mapping)
    }

    #[must_use]
    pub fn column(&self, factor: Factor) -> &str {
        &self.columns[factor.index()]
    }

    #[must_use]
    pub fn columns(&self) -> &[String; FACTOR_COUNT] {
        &self.columns
    }

    /// Every distinct column name the mapping reads
    #[must_use]
    pub fn distinct_columns(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::with_capacity(FACTOR_COUNT);
        for name in &self.columns {
            if !names.contains(&name.as_str()) {
                names.push(name);
            }
        }
        names
    }
}
