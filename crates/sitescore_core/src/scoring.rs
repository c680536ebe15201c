//! Weighted scoring, threshold derivation and viability classification.
//!
//! These are the stateless building blocks every scoring mode shares:
//!
//! ```text
//! Y         = w1*X1 + w2*X2 + w3*X3 + w4*X4 + w5*X5
//! MaxY      = sum(wi * max_i)
//! Threshold = MaxY * 0.75
//! Viable   <=> Y > Threshold
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::{FactorBounds, FactorTable, FactorVector, WeightVector};

/// Fraction of the best attainable score a site must exceed to be viable
pub const THRESHOLD_RATIO: f64 = 0.75;

/// Weighted score Y of one factor vector
#[must_use]
pub fn score(weights: &WeightVector, factors: &FactorVector) -> f64 {
    weights.dot(factors)
}

/// Score every row of a table, in table order
#[must_use]
pub fn score_table(weights: &WeightVector, table: &FactorTable) -> Vec<f64> {
    table.iter_rows().map(|x| score(weights, &x)).collect()
}

/// Mean score over a table, `None` when it has no rows
#[must_use]
pub fn mean_score(weights: &WeightVector, table: &FactorTable) -> Option<f64> {
    if table.is_empty() {
        return None;
    }
    Some(score_table(weights, table).iter().sum::<f64>() / table.len() as f64)
}

/// Where the factor maxima behind a threshold came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceScope {
    /// The fixed scoring scale
    FixedScale,
    /// Observed maxima of the whole dataset
    FullDataset,
    /// Observed maxima of the filtered selection only
    Selection,
}

impl fmt::Display for ReferenceScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ReferenceScope::FixedScale => "fixed scale",
            ReferenceScope::FullDataset => "full dataset",
            ReferenceScope::Selection => "selection",
        })
    }
}

/// Viability cutoff derived from the best attainable score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Threshold {
    /// Best attainable score under the current weights and maxima
    pub max_score: f64,
    /// `max_score * THRESHOLD_RATIO`
    pub cutoff: f64,
    pub scope: ReferenceScope,
}

impl Threshold {
    /// Derive from per-factor maxima
    #[must_use]
    pub fn derive(weights: &WeightVector, maxima: &FactorVector, scope: ReferenceScope) -> Self {
        let max_score = score(weights, maxima);
        Self {
            max_score,
            cutoff: max_score * THRESHOLD_RATIO,
            scope,
        }
    }

    /// Derive from the upper ends of `bounds`
    #[must_use]
    pub fn from_bounds(weights: &WeightVector, bounds: &FactorBounds, scope: ReferenceScope) -> Self {
        Self::derive(weights, &bounds.maxima(), scope)
    }

    /// Strictly above the cutoff is viable; ties are not
    #[must_use]
    pub fn classify(&self, score: f64) -> Viability {
        if score > self.cutoff {
            Viability::Viable
        } else {
            Viability::NotViable
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Viability {
    #[serde(rename = "Viable")]
    Viable,
    #[serde(rename = "Not Viable")]
    NotViable,
}

impl Viability {
    #[must_use]
    pub fn is_viable(self) -> bool {
        matches!(self, Viability::Viable)
    }
}

impl fmt::Display for Viability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Viability::Viable => "Viable",
            Viability::NotViable => "Not Viable",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tie_is_not_viable() {
        let threshold = Threshold {
            max_score: 4.0,
            cutoff: 3.0,
            scope: ReferenceScope::FixedScale,
        };
        assert_eq!(threshold.classify(3.0), Viability::NotViable);
        assert_eq!(threshold.classify(3.000_001), Viability::Viable);
    }

    #[test]
    fn labels() {
        assert_eq!(Viability::Viable.to_string(), "Viable");
        assert_eq!(Viability::NotViable.to_string(), "Not Viable");
    }
}
