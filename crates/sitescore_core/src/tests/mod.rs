//! Integration tests for the scoring engine
//!
//! Tests are organized by topic:
//! - `scoring` - Scorer, threshold and classifier laws and worked scenarios
//! - `simulation` - Monte Carlo sampler behaviour and convergence
//! - `sensitivity` - One-factor-at-a-time sweeps
//! - `ranking` - Top-N ordering
//! - `modes` - The mode controllers end to end

mod modes;
mod ranking;

use crate::model::{COUNTY_COLUMN, Cell, Dataset, PLANT_COLUMN, STATE_COLUMN};

/// Small plant dataset with the conventional factor columns.
///
/// | state | county | plant | GEN | PIPE | MARKET | INCENTIVES | WATER |
/// |-------|--------|-------|-----|------|--------|------------|-------|
/// | TX | Harris | Alpha | 5 | 5 | 4 | 1 | 5 |
/// | TX | Harris | Bravo | 2 | 4 | 3 | 0 | 2 |
/// | TX | Travis | Charlie | 4 | 5 | 5 | 1 | 3 |
/// | LA | Caddo | Delta | 1 | 4 | 1 | 0 | 1 |
/// | LA | Caddo | Echo | 3 | 4 | 2 | 1 | 4 |
pub(crate) fn plant_dataset() -> Dataset {
    let rows: [(&str, &str, &str, [f64; 5]); 5] = [
        ("TX", "Harris", "Alpha", [5.0, 5.0, 4.0, 1.0, 5.0]),
        ("TX", "Harris", "Bravo", [2.0, 4.0, 3.0, 0.0, 2.0]),
        ("TX", "Travis", "Charlie", [4.0, 5.0, 5.0, 1.0, 3.0]),
        ("LA", "Caddo", "Delta", [1.0, 4.0, 1.0, 0.0, 1.0]),
        ("LA", "Caddo", "Echo", [3.0, 4.0, 2.0, 1.0, 4.0]),
    ];

    let columns = [
        STATE_COLUMN,
        COUNTY_COLUMN,
        PLANT_COLUMN,
        "GEN",
        "PIPE",
        "MARKET",
        "INCENTIVES",
        "WATER",
    ]
    .iter()
    .map(|c| (*c).to_string())
    .collect();

    let cells = rows
        .iter()
        .map(|(state, county, plant, factors)| {
            let mut row = vec![
                Cell::Text((*state).into()),
                Cell::Text((*county).into()),
                Cell::Text((*plant).into()),
            ];
            row.extend(factors.iter().map(|&x| Cell::Number(x)));
            row
        })
        .collect();

    Dataset::new(columns, cells).unwrap()
}
