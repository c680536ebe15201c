//! One-factor-at-a-time sensitivity analysis.
//!
//! For each factor, every row of the reference selection has that factor's
//! column overwritten with each integer of the factor's domain in turn, and the
//! mean score across rows is recorded. Other columns keep their per-row values.
//!
//! ```ignore
//! use sitescore_core::analysis::{SweepConfig, sensitivity_sweep};
//!
//! let report = sensitivity_sweep(&table, &weights, &SweepConfig::default())?;
//! for curve in &report.curves {
//!     println!("{}: swing {:.3}", curve.column, curve.swing());
//! }
//! println!("{}", report.narrative);
//! ```
//!
//! Interactions between factors are not measured.

mod config;
mod evaluator;
mod narrative;

pub use config::*;
pub use evaluator::*;
pub use narrative::*;
