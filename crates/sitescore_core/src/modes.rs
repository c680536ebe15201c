//! Mode controllers.
//!
//! Each mode is configured independently and drives the shared scoring,
//! simulation, sweep and ranking functions:
//! - [`manual_score`] - hand-entered factor values on the fixed scale, strict weights
//! - [`site_score`] - one site (or the selection's minima) against the full dataset
//! - [`explore`] - Monte Carlo over a selection, top-N list, optional sensitivity sweep

use serde::{Deserialize, Serialize};

use crate::analysis::{SensitivityReport, SweepConfig, sensitivity_sweep};
use crate::config::ColumnMapping;
use crate::error::{EngineError, Result, check_control};
use crate::model::{
    Dataset, FACTOR_COUNT, Factor, FactorBounds, FactorTable, FactorVector, IDENTITY_COLUMNS,
    PercentWeights, SiteFilter, WeightPolicy, WeightVector,
};
use crate::ranking::{DEFAULT_TOP_N, MAX_TOP_N, MIN_TOP_N, RankedSite, rank_top_n};
use crate::scoring::{ReferenceScope, Threshold, Viability, score, score_table};
use crate::simulation::{MonteCarloConfig, SimulationResult, monte_carlo_simulate};

/// Score, threshold and label for one factor vector
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreReport {
    pub factors: FactorVector,
    pub score: f64,
    pub threshold: Threshold,
    pub viability: Viability,
}

impl ScoreReport {
    fn evaluate(weights: &WeightVector, factors: FactorVector, threshold: Threshold) -> Self {
        let y = score(weights, &factors);
        Self {
            factors,
            score: y,
            threshold,
            viability: threshold.classify(y),
        }
    }
}

// ============================================================================
// Manual scoring
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ManualScoringRequest {
    pub weights: PercentWeights,
    pub factors: FactorVector,
}

impl Default for ManualScoringRequest {
    fn default() -> Self {
        Self {
            weights: PercentWeights::default(),
            factors: FactorVector::new([3.0, 3.0, 3.0, 3.0, 1.0]),
        }
    }
}

/// Score hand-entered factors on the fixed scale.
///
/// Weights must sum to 100; nothing is computed otherwise.
pub fn manual_score(request: &ManualScoringRequest) -> Result<ScoreReport> {
    let weights = request.weights.normalize(WeightPolicy::Strict)?;
    let bounds = FactorBounds::FIXED_SCALE;
    bounds.check(&request.factors)?;

    let threshold = Threshold::from_bounds(&weights, &bounds, ReferenceScope::FixedScale);
    Ok(ScoreReport::evaluate(&weights, request.factors, threshold))
}

// ============================================================================
// Site scoring
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteScoringRequest {
    pub filter: SiteFilter,
    pub weights: PercentWeights,
    /// Replacement values for individual factors; must lie within the
    /// dataset's observed range for that factor
    pub overrides: [Option<f64>; FACTOR_COUNT],
    pub top_n: usize,
}

impl Default for SiteScoringRequest {
    fn default() -> Self {
        Self {
            filter: SiteFilter::default(),
            weights: PercentWeights::default(),
            overrides: [None; FACTOR_COUNT],
            top_n: DEFAULT_TOP_N,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteReport {
    /// Rows matched by the filter
    pub selection_size: usize,
    /// Observed ranges of the full dataset
    pub bounds: FactorBounds,
    pub score: ScoreReport,
    /// Best rows of the selection, labelled against `score.threshold`
    pub top: Vec<RankedSite>,
}

/// Score one site against the full dataset's ranges.
///
/// Starting factor values are the selected site's own when the filter names a
/// plant, otherwise the full dataset's column minima. Overrides replace them.
pub fn site_score(
    dataset: &Dataset,
    mapping: &ColumnMapping,
    request: &SiteScoringRequest,
) -> Result<SiteReport> {
    let weights = request.weights.normalize(WeightPolicy::Independent)?;
    check_control("top_n", request.top_n, MIN_TOP_N, MAX_TOP_N)?;
    dataset.require_columns(&IDENTITY_COLUMNS)?;

    let full = FactorTable::extract(dataset, mapping, &dataset.all_rows())?;
    let bounds = full.bounds().ok_or(EngineError::EmptySelection)?;

    let rows = request.filter.apply(dataset)?;
    if rows.is_empty() {
        return Err(EngineError::EmptySelection);
    }
    let selection = FactorTable::extract(dataset, mapping, &rows)?;

    let mut factors = if request.filter.is_single_site() {
        selection.row(0)
    } else {
        bounds.minima()
    };
    for factor in Factor::ALL {
        if let Some(value) = request.overrides[factor.index()] {
            factors.set(factor, value);
        }
    }
    bounds.check(&factors)?;

    let threshold = Threshold::from_bounds(&weights, &bounds, ReferenceScope::FullDataset);
    let report = ScoreReport::evaluate(&weights, factors, threshold);

    let scores = score_table(&weights, &selection);
    let top = rank_top_n(
        dataset,
        selection.source_rows(),
        &scores,
        &threshold,
        request.top_n,
    )?;

    tracing::debug!(
        rows = rows.len(),
        score = report.score,
        viability = %report.viability,
        "scored site"
    );

    Ok(SiteReport {
        selection_size: rows.len(),
        bounds,
        score: report,
        top,
    })
}

// ============================================================================
// Exploration (Monte Carlo + sensitivity)
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplorationRequest {
    pub filter: SiteFilter,
    pub weights: PercentWeights,
    pub monte_carlo: MonteCarloConfig,
    pub top_n: usize,
    /// Run a sensitivity sweep over the selection when present
    pub sweep: Option<SweepConfig>,
}

impl Default for ExplorationRequest {
    fn default() -> Self {
        Self {
            filter: SiteFilter::default(),
            weights: PercentWeights::default(),
            monte_carlo: MonteCarloConfig::default(),
            top_n: DEFAULT_TOP_N,
            sweep: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExplorationReport {
    pub selection_size: usize,
    /// Sampler output; its threshold uses the selection's maxima
    pub simulation: SimulationResult,
    /// Threshold for `top`, from the full dataset's maxima
    pub ranking_threshold: Threshold,
    pub top: Vec<RankedSite>,
    pub sensitivity: Option<SensitivityReport>,
}

/// Explore a selection: resample it, rank it and optionally sweep it.
pub fn explore(
    dataset: &Dataset,
    mapping: &ColumnMapping,
    request: &ExplorationRequest,
) -> Result<ExplorationReport> {
    let weights = request.weights.normalize(WeightPolicy::Independent)?;
    request.monte_carlo.validate()?;
    check_control("top_n", request.top_n, MIN_TOP_N, MAX_TOP_N)?;
    if let Some(sweep) = &request.sweep {
        sweep.validate()?;
    }
    dataset.require_columns(&IDENTITY_COLUMNS)?;

    let full = FactorTable::extract(dataset, mapping, &dataset.all_rows())?;
    let full_bounds = full.bounds().ok_or(EngineError::EmptySelection)?;

    let rows = request.filter.apply(dataset)?;
    if rows.is_empty() {
        return Err(EngineError::EmptySelection);
    }
    let selection = FactorTable::extract(dataset, mapping, &rows)?;

    let simulation = monte_carlo_simulate(&selection, &weights, &request.monte_carlo)?;

    let ranking_threshold =
        Threshold::from_bounds(&weights, &full_bounds, ReferenceScope::FullDataset);
    let scores = score_table(&weights, &selection);
    let top = rank_top_n(
        dataset,
        selection.source_rows(),
        &scores,
        &ranking_threshold,
        request.top_n,
    )?;

    let sensitivity = request
        .sweep
        .as_ref()
        .map(|config| sensitivity_sweep(&selection, &weights, config))
        .transpose()?;

    tracing::info!(
        rows = rows.len(),
        mean = simulation.mean,
        viability = %simulation.viability,
        swept = sensitivity.is_some(),
        "exploration complete"
    );

    Ok(ExplorationReport {
        selection_size: rows.len(),
        simulation,
        ranking_threshold,
        top,
        sensitivity,
    })
}
