use crate::model::Factor;

/// Errors raised while converting percentile weights into fractions
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WeightError {
    #[error("weight w{index} = {value} is outside 0..=100")]
    OutOfRange { index: usize, value: u32 },

    /// Strict policy only: the five percentiles did not add up to 100
    #[error("the weights must add up to 100 percent (got {total})")]
    SumMismatch { total: u32 },
}

/// Errors related to the shape and content of a tabular dataset
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DatasetError {
    #[error("the dataset must contain the columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("column {0:?} not found in dataset")]
    UnknownColumn(String),

    #[error("row {row} has {found} cells but the dataset has {expected} columns")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("column {column:?} row {row} is not numeric")]
    NonNumeric { column: String, row: usize },

    #[error("row {0} does not exist")]
    RowOutOfRange(usize),

    #[error("factor columns differ in length ({expected} vs {found})")]
    UnevenColumns { expected: usize, found: usize },

    #[error("{rows} rows but {scores} scores")]
    ScoreCountMismatch { rows: usize, scores: usize },
}

/// Top-level engine error. Every variant is recoverable: the caller adjusts
/// its inputs and retries.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EngineError {
    #[error(transparent)]
    Weights(#[from] WeightError),

    #[error(transparent)]
    Dataset(#[from] DatasetError),

    #[error("no column assigned to {}", factor_labels(.0))]
    UnmappedFactors(Vec<Factor>),

    /// The filtered selection has no rows, so nothing can be scored or sampled
    #[error("no data: the current selection contains no rows")]
    EmptySelection,

    #[error("{control} = {value} is outside {min}..={max}")]
    ControlOutOfRange {
        control: &'static str,
        value: usize,
        min: usize,
        max: usize,
    },

    #[error("{factor} = {value} is outside its range [{min}, {max}]")]
    FactorOutOfBounds {
        factor: Factor,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("invalid sweep domain for {factor}: [{min}, {max}]")]
    InvalidDomain { factor: Factor, min: i32, max: i32 },
}

fn factor_labels(factors: &[Factor]) -> String {
    factors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

pub type Result<T> = std::result::Result<T, EngineError>;

/// Check a user-facing integer control against its policy range
pub(crate) fn check_control(
    control: &'static str,
    value: usize,
    min: usize,
    max: usize,
) -> Result<()> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(EngineError::ControlOutOfRange {
            control,
            value,
            min,
            max,
        })
    }
}
