//! Data model for site scoring
//!
//! - `factors` - The five scoring factors, factor vectors and their bounds
//! - `weights` - Percentile weights and their normalized fractions
//! - `dataset` - The tabular dataset of candidate sites
//! - `filter` - Cascading state/county/plant selection
//! - `table` - Column-oriented factor values extracted from a dataset

mod dataset;
mod factors;
mod filter;
mod table;
mod weights;

pub use dataset::*;
pub use factors::*;
pub use filter::*;
pub use table::*;
pub use weights::*;
