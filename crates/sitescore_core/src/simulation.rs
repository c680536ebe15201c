//! Monte Carlo resampling of factor values.
//!
//! Each factor is drawn independently, uniformly and with replacement from its
//! observed column. Rows are not kept together, so correlation between factors
//! in the source data is not carried into the samples.

use rand::rngs::SmallRng;
use rand::{RngCore, SeedableRng};
use rand_distr::{Distribution, Uniform};
use serde::{Deserialize, Serialize};

#[cfg(feature = "parallel")]
use rayon::iter::{IntoParallelIterator, ParallelIterator};

use crate::error::{EngineError, Result, check_control};
use crate::model::{FACTOR_COUNT, Factor, FactorTable, FactorVector, WeightVector};
use crate::scoring::{ReferenceScope, Threshold, Viability, score};

pub const MIN_ITERATIONS: usize = 100;
pub const MAX_ITERATIONS: usize = 10_000;
pub const DEFAULT_ITERATIONS: usize = 1_000;

/// Samples drawn per rng stream; each batch is seeded from the base seed and
/// its index so results do not depend on how batches are scheduled.
const MAX_BATCH_SIZE: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonteCarloConfig {
    /// Number of sampled factor vectors
    pub iterations: usize,
    /// Base seed; a random one is chosen when absent
    pub seed: Option<u64>,
}

impl Default for MonteCarloConfig {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
            seed: None,
        }
    }
}

impl MonteCarloConfig {
    #[must_use]
    pub fn seeded(iterations: usize, seed: u64) -> Self {
        Self {
            iterations,
            seed: Some(seed),
        }
    }

    pub fn validate(&self) -> Result<()> {
        check_control("iterations", self.iterations, MIN_ITERATIONS, MAX_ITERATIONS)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    /// Seed the run actually used
    pub seed: u64,
    /// Score of every sampled factor vector
    pub samples: Vec<f64>,
    pub mean: f64,
    /// Threshold from the reference table's own maxima
    pub threshold: Threshold,
    /// Classification of `mean`
    pub viability: Viability,
}

impl SimulationResult {
    #[must_use]
    pub fn iterations(&self) -> usize {
        self.samples.len()
    }
}

/// Uniform with-replacement draws from one observed column
struct EmpiricalColumn<'a> {
    values: &'a [f64],
    index: Uniform<usize>,
}

impl<'a> EmpiricalColumn<'a> {
    fn new(values: &'a [f64]) -> Result<Self> {
        let index = Uniform::new(0, values.len()).map_err(|_| EngineError::EmptySelection)?;
        Ok(Self { values, index })
    }

    fn draw<R: RngCore + ?Sized>(&self, rng: &mut R) -> f64 {
        self.values[self.index.sample(rng)]
    }
}

/// Run the sampler over `table` (the reference selection).
///
/// An empty table is reported as [`EngineError::EmptySelection`]. A column
/// holding a single distinct value just yields that value every draw.
pub fn monte_carlo_simulate(
    table: &FactorTable,
    weights: &WeightVector,
    config: &MonteCarloConfig,
) -> Result<SimulationResult> {
    config.validate()?;

    let Some(bounds) = table.bounds() else {
        return Err(EngineError::EmptySelection);
    };

    let columns = [
        EmpiricalColumn::new(table.column(Factor::Generation))?,
        EmpiricalColumn::new(table.column(Factor::Pipeline))?,
        EmpiricalColumn::new(table.column(Factor::Market))?,
        EmpiricalColumn::new(table.column(Factor::Incentives))?,
        EmpiricalColumn::new(table.column(Factor::Water))?,
    ];

    let seed = config.seed.unwrap_or_else(|| rand::rng().next_u64());
    let num_iterations = config.iterations;
    let num_batches = num_iterations.div_ceil(MAX_BATCH_SIZE);

    tracing::debug!(
        rows = table.len(),
        iterations = num_iterations,
        batches = num_batches,
        seed,
        "running monte carlo sampler"
    );

    let run_batch = |i: usize| -> Vec<f64> {
        let mut rng = SmallRng::seed_from_u64(seed.wrapping_add(i as u64));

        let batch_size = if i == num_batches - 1 {
            num_iterations - i * MAX_BATCH_SIZE
        } else {
            MAX_BATCH_SIZE
        };

        (0..batch_size)
            .map(|_| {
                let sample: [f64; FACTOR_COUNT] =
                    std::array::from_fn(|f| columns[f].draw(&mut rng));
                score(weights, &FactorVector(sample))
            })
            .collect()
    };

    #[cfg(feature = "parallel")]
    let samples: Vec<f64> = (0..num_batches)
        .into_par_iter()
        .flat_map(run_batch)
        .collect();

    #[cfg(not(feature = "parallel"))]
    let samples: Vec<f64> = (0..num_batches).flat_map(run_batch).collect();

    let mean = samples.iter().sum::<f64>() / samples.len() as f64;
    let threshold = Threshold::from_bounds(weights, &bounds, ReferenceScope::Selection);

    Ok(SimulationResult {
        seed,
        viability: threshold.classify(mean),
        samples,
        mean,
        threshold,
    })
}
