//! Configuration types for sensitivity sweeps.

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::model::{FACTOR_COUNT, Factor};

/// Closed integer range a factor is walked through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactorDomain {
    pub min: i32,
    pub max: i32,
}

impl FactorDomain {
    #[must_use]
    pub const fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }

    /// Sweep values in ascending order
    pub fn values(&self) -> impl Iterator<Item = i32> {
        self.min..=self.max
    }

    /// Number of sweep points (`max - min + 1`)
    #[must_use]
    pub fn len(&self) -> usize {
        if self.max < self.min {
            0
        } else {
            (i64::from(self.max) - i64::from(self.min) + 1) as usize
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Largest number of sweep points allowed for one factor
pub const MAX_DOMAIN_POINTS: usize = 1_000;

/// Per-factor sweep domains, policy-defined rather than read from data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SweepConfig {
    pub domains: [FactorDomain; FACTOR_COUNT],
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            domains: [
                FactorDomain::new(1, 5),
                FactorDomain::new(4, 5),
                FactorDomain::new(1, 5),
                FactorDomain::new(0, 1),
                FactorDomain::new(1, 5),
            ],
        }
    }
}

impl SweepConfig {
    #[must_use]
    pub fn domain(&self, factor: Factor) -> FactorDomain {
        self.domains[factor.index()]
    }

    /// Total number of (factor, value) sweep points
    #[must_use]
    pub fn total_points(&self) -> usize {
        self.domains.iter().map(FactorDomain::len).sum()
    }

    /// Every domain must be non-empty and of bounded size
    pub fn validate(&self) -> Result<()> {
        for factor in Factor::ALL {
            let domain = self.domain(factor);
            if domain.is_empty() || domain.len() > MAX_DOMAIN_POINTS {
                return Err(EngineError::InvalidDomain {
                    factor,
                    min: domain.min,
                    max: domain.max,
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_domains_point_counts() {
        let config = SweepConfig::default();
        let counts: Vec<usize> = config.domains.iter().map(FactorDomain::len).collect();
        assert_eq!(counts, vec![5, 2, 5, 2, 5]);
        assert_eq!(config.total_points(), 19);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn inverted_domain_rejected() {
        let mut config = SweepConfig::default();
        config.domains[3] = FactorDomain::new(2, 1);
        assert_eq!(
            config.validate().unwrap_err(),
            EngineError::InvalidDomain {
                factor: Factor::Incentives,
                min: 2,
                max: 1
            }
        );
    }

    #[test]
    fn values_are_ascending_and_inclusive() {
        let values: Vec<i32> = FactorDomain::new(-1, 2).values().collect();
        assert_eq!(values, vec![-1, 0, 1, 2]);
    }
}
