//! Sensitivity sweep evaluator - recomputes mean scores with one factor pinned.

use serde::{Deserialize, Serialize};

#[cfg(feature = "parallel")]
use rayon::iter::{IntoParallelIterator, ParallelIterator};

use super::{FactorDomain, Narrative, SweepConfig};
use crate::error::{EngineError, Result};
use crate::model::{Factor, FactorTable, WeightVector};
use crate::scoring::{mean_score, score};

/// Mean score with the swept factor pinned to `value`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SweepPoint {
    pub value: i32,
    pub mean_score: f64,
}

/// Mean score as one factor walks its domain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensitivityCurve {
    pub factor: Factor,
    /// Dataset column that was overwritten
    pub column: String,
    pub domain: FactorDomain,
    /// One point per domain value, ascending
    pub points: Vec<SweepPoint>,
}

impl SensitivityCurve {
    #[must_use]
    pub fn first(&self) -> Option<&SweepPoint> {
        self.points.first()
    }

    #[must_use]
    pub fn last(&self) -> Option<&SweepPoint> {
        self.points.last()
    }

    /// Spread between the highest and lowest mean score on the curve
    #[must_use]
    pub fn swing(&self) -> f64 {
        let (lo, hi) = self
            .points
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
                (lo.min(p.mean_score), hi.max(p.mean_score))
            });
        if lo.is_finite() { hi - lo } else { 0.0 }
    }

    /// Change in mean score per unit step, end to end
    #[must_use]
    pub fn slope(&self) -> f64 {
        match (self.first(), self.last()) {
            (Some(a), Some(b)) if b.value != a.value => {
                (b.mean_score - a.mean_score) / f64::from(b.value - a.value)
            }
            _ => 0.0,
        }
    }
}

/// Curves for every factor plus a narrative generated from them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensitivityReport {
    /// Mean score of the selection before any factor is pinned
    pub baseline_mean: f64,
    /// In factor order X1..X5
    pub curves: Vec<SensitivityCurve>,
    pub narrative: Narrative,
}

impl SensitivityReport {
    #[must_use]
    pub fn curve(&self, factor: Factor) -> Option<&SensitivityCurve> {
        self.curves.iter().find(|c| c.factor == factor)
    }
}

/// Sweep every factor of `table` through its configured domain.
///
/// When several slots read the same dataset column, pinning that column moves
/// all of them, as overwriting the column in the source table would.
pub fn sensitivity_sweep(
    table: &FactorTable,
    weights: &WeightVector,
    config: &SweepConfig,
) -> Result<SensitivityReport> {
    config.validate()?;
    let baseline_mean = mean_score(weights, table).ok_or(EngineError::EmptySelection)?;

    tracing::debug!(
        rows = table.len(),
        points = config.total_points(),
        "running sensitivity sweep"
    );

    let sweep = |factor: Factor| sweep_factor(table, weights, factor, config.domain(factor));

    #[cfg(feature = "parallel")]
    let curves: Vec<SensitivityCurve> = Factor::ALL.into_par_iter().map(sweep).collect();

    #[cfg(not(feature = "parallel"))]
    let curves: Vec<SensitivityCurve> = Factor::ALL.into_iter().map(sweep).collect();

    let narrative = Narrative::from_curves(&curves);
    Ok(SensitivityReport {
        baseline_mean,
        curves,
        narrative,
    })
}

fn sweep_factor(
    table: &FactorTable,
    weights: &WeightVector,
    factor: Factor,
    domain: FactorDomain,
) -> SensitivityCurve {
    let slots = table.slots_sharing_column(factor);
    let rows = table.len() as f64;

    let points = domain
        .values()
        .map(|value| {
            let pinned = f64::from(value);
            let total: f64 = table
                .iter_rows()
                .map(|mut x| {
                    for &slot in &slots {
                        x.set(slot, pinned);
                    }
                    score(weights, &x)
                })
                .sum();
            SweepPoint {
                value,
                mean_score: total / rows,
            }
        })
        .collect();

    SensitivityCurve {
        factor,
        column: table.column_name(factor).to_string(),
        domain,
        points,
    }
}
