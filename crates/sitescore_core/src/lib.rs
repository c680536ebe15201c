//! Site viability scoring library
//!
//! This crate provides the scoring-and-simulation engine used to judge candidate
//! facility sites. It supports:
//! - Weighted-sum scoring of five site factors (strict or independent weights)
//! - Viability thresholds derived from fixed scales or empirical dataset maxima
//! - Monte Carlo resampling of factor values from observed data
//! - One-factor-at-a-time sensitivity sweeps with a generated narrative
//! - Top-N ranking of dataset rows with their viability label
//!
//! # Example
//!
//! ```ignore
//! use sitescore_core::{ColumnDefaults, ColumnMapping, Dataset, ExplorationRequest, explore};
//!
//! let mapping = ColumnMapping::resolve(&dataset, &ColumnDefaults::default(), &Default::default())?;
//! let report = explore(&dataset, &mapping, &ExplorationRequest::default())?;
//! println!("simulated mean Y = {:.3}", report.simulation.mean);
//! ```

#![warn(clippy::all)]

// ============================================================================
// Core modules
// ============================================================================

pub mod analysis;
pub mod error;
pub mod modes;
pub mod ranking;
pub mod scoring;
pub mod simulation;

// ============================================================================
// Type definition modules
// ============================================================================

pub mod config;
pub mod model;

// ============================================================================
// Test modules
// ============================================================================

#[cfg(test)]
mod tests;

// ============================================================================
// Public re-exports for convenience
// ============================================================================

pub use analysis::{SensitivityCurve, SensitivityReport, SweepConfig, sensitivity_sweep};
pub use config::{ColumnDefaults, ColumnMapping, ColumnOverrides};
pub use error::{DatasetError, EngineError, Result, WeightError};
pub use model::{
    Cell, Dataset, FACTOR_COUNT, Factor, FactorBounds, FactorTable, FactorVector, FilterOptions,
    PercentWeights, Record, Selection, SiteFilter, SiteIdentity, WeightPolicy, WeightVector,
};
pub use modes::{
    ExplorationReport, ExplorationRequest, ManualScoringRequest, ScoreReport, SiteReport,
    SiteScoringRequest, explore, manual_score, site_score,
};
pub use ranking::{RankedSite, rank_top_n};
pub use scoring::{ReferenceScope, THRESHOLD_RATIO, Threshold, Viability, score, score_table};
pub use simulation::{MonteCarloConfig, SimulationResult, monte_carlo_simulate};
