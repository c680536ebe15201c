use serde::{Deserialize, Serialize};

use super::{FACTOR_COUNT, Factor, FactorVector};
use crate::error::WeightError;

/// Upper bound of a single percentile weight
pub const MAX_PERCENT: u32 = 100;

/// Default percentile for every weight
pub const DEFAULT_PERCENT: u32 = 20;

/// How raw percentile weights are turned into fractions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeightPolicy {
    /// The five percentiles must add up to exactly 100 (single-record scoring)
    #[default]
    Strict,
    /// Each percentile is converted on its own; the sum is not checked
    /// (multi-row exploration, where weights act as independent scale factors)
    Independent,
}

/// Five weights as entered by the user, each in 0..=100
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PercentWeights(pub [u32; FACTOR_COUNT]);

impl Default for PercentWeights {
    fn default() -> Self {
        Self([DEFAULT_PERCENT; FACTOR_COUNT])
    }
}

impl PercentWeights {
    #[must_use]
    pub fn total(&self) -> u32 {
        self.0.iter().sum()
    }

    /// Validate and convert to fractions under the given policy
    pub fn normalize(&self, policy: WeightPolicy) -> Result<WeightVector, WeightError> {
        for (i, &value) in self.0.iter().enumerate() {
            if value > MAX_PERCENT {
                return Err(WeightError::OutOfRange {
                    index: i + 1,
                    value,
                });
            }
        }

        if policy == WeightPolicy::Strict && self.total() != MAX_PERCENT {
            return Err(WeightError::SumMismatch {
                total: self.total(),
            });
        }

        Ok(WeightVector(
            self.0.map(|w| f64::from(w) / f64::from(MAX_PERCENT)),
        ))
    }
}

/// Weights as fractions w1..w5.
///
/// Built from [`PercentWeights::normalize`]; under the strict policy the
/// fractions sum to 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightVector([f64; FACTOR_COUNT]);

impl WeightVector {
    /// Wrap fractions directly, without any sum or range check
    #[must_use]
    pub fn from_fractions(fractions: [f64; FACTOR_COUNT]) -> Self {
        Self(fractions)
    }

    #[must_use]
    pub fn get(&self, factor: Factor) -> f64 {
        self.0[factor.index()]
    }

    #[must_use]
    pub fn as_array(&self) -> &[f64; FACTOR_COUNT] {
        &self.0
    }

    #[cfg(test)]
    pub fn sum(&self) -> f64 {
        self.0.iter().sum()
    }

    /// Dot product with a factor vector
    #[must_use]
    pub fn dot(&self, factors: &FactorVector) -> f64 {
        self.0.iter().zip(factors.0.iter()).map(|(w, x)| w * x).sum()
    }
}
