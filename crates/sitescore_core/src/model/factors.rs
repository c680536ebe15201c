use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

/// Number of scoring factors
pub const FACTOR_COUNT: usize = 5;

/// One of the five criteria a candidate site is scored on.
///
/// Slots are positional (X1..X5); the names describe the conventional column
/// each slot is assigned to, not a hard binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Factor {
    /// X1 - generation capacity score
    Generation,
    /// X2 - pipeline proximity score
    Pipeline,
    /// X3 - market score
    Market,
    /// X4 - incentive score
    Incentives,
    /// X5 - water availability score
    Water,
}

impl Factor {
    pub const ALL: [Factor; FACTOR_COUNT] = [
        Factor::Generation,
        Factor::Pipeline,
        Factor::Market,
        Factor::Incentives,
        Factor::Water,
    ];

    /// Position of this factor in a vector (0-based)
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Factor::Generation => 0,
            Factor::Pipeline => 1,
            Factor::Market => 2,
            Factor::Incentives => 3,
            Factor::Water => 4,
        }
    }

    /// Slot label as shown to users ("X1".."X5")
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Factor::Generation => "X1",
            Factor::Pipeline => "X2",
            Factor::Market => "X3",
            Factor::Incentives => "X4",
            Factor::Water => "X5",
        }
    }

    /// Conventional dataset column for this slot
    #[must_use]
    pub fn conventional_column(self) -> &'static str {
        match self {
            Factor::Generation => "GEN",
            Factor::Pipeline => "PIPE",
            Factor::Market => "MARKET",
            Factor::Incentives => "INCENTIVES",
            Factor::Water => "WATER",
        }
    }
}

impl fmt::Display for Factor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Ordered values X1..X5 for one site
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FactorVector(pub [f64; FACTOR_COUNT]);

impl FactorVector {
    #[must_use]
    pub fn new(values: [f64; FACTOR_COUNT]) -> Self {
        Self(values)
    }

    #[cfg(test)]
    pub fn zero() -> Self {
        Self([0.0; FACTOR_COUNT])
    }

    #[must_use]
    pub fn get(&self, factor: Factor) -> f64 {
        self.0[factor.index()]
    }

    pub fn set(&mut self, factor: Factor, value: f64) {
        self.0[factor.index()] = value;
    }

    /// Copy of this vector with one factor replaced
    #[must_use]
    pub fn with(mut self, factor: Factor, value: f64) -> Self {
        self.set(factor, value);
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (Factor, f64)> + '_ {
        Factor::ALL.iter().map(|&f| (f, self.get(f)))
    }
}

/// Closed interval a factor value may take
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FactorRange {
    pub min: f64,
    pub max: f64,
}

impl FactorRange {
    #[must_use]
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Per-factor ranges, either the fixed scoring scale or observed from data
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FactorBounds(pub [FactorRange; FACTOR_COUNT]);

impl FactorBounds {
    /// Fixed scale used when scoring a site by hand.
    /// X1..X3 are scored 1-5, X4 0-5 and X5 is a 0/1 flag.
    pub const FIXED_SCALE: FactorBounds = FactorBounds([
        FactorRange::new(1.0, 5.0),
        FactorRange::new(1.0, 5.0),
        FactorRange::new(1.0, 5.0),
        FactorRange::new(0.0, 5.0),
        FactorRange::new(0.0, 1.0),
    ]);

    #[must_use]
    pub fn range(&self, factor: Factor) -> FactorRange {
        self.0[factor.index()]
    }

    #[must_use]
    pub fn minima(&self) -> FactorVector {
        FactorVector(self.0.map(|r| r.min))
    }

    #[must_use]
    pub fn maxima(&self) -> FactorVector {
        FactorVector(self.0.map(|r| r.max))
    }

    /// Reject the first factor value lying outside its range
    pub fn check(&self, factors: &FactorVector) -> Result<()> {
        for (factor, value) in factors.iter() {
            let range = self.range(factor);
            if !range.contains(value) {
                return Err(EngineError::FactorOutOfBounds {
                    factor,
                    value,
                    min: range.min,
                    max: range.max,
                });
            }
        }
        Ok(())
    }
}

impl Default for FactorBounds {
    fn default() -> Self {
        Self::FIXED_SCALE
    }
}
