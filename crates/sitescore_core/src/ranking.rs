use serde::{Deserialize, Serialize};

use crate::error::{DatasetError, Result, check_control};
use crate::model::{Dataset, SiteIdentity};
use crate::scoring::{Threshold, Viability};

pub const MIN_TOP_N: usize = 1;
pub const MAX_TOP_N: usize = 100;
pub const DEFAULT_TOP_N: usize = 10;

/// A dataset row with its score and label
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedSite {
    /// Row index in the source dataset
    pub row: usize,
    #[serde(flatten)]
    pub site: SiteIdentity,
    pub score: f64,
    pub viability: Viability,
}

/// The `n` highest-scoring rows, best first.
///
/// `rows[i]` is the dataset row whose score is `scores[i]`. Equal scores keep
/// their original row order. Asking for more rows than exist returns all of them.
pub fn rank_top_n(
    dataset: &Dataset,
    rows: &[usize],
    scores: &[f64],
    threshold: &Threshold,
    n: usize,
) -> Result<Vec<RankedSite>> {
    check_control("top_n", n, MIN_TOP_N, MAX_TOP_N)?;
    if rows.len() != scores.len() {
        return Err(DatasetError::ScoreCountMismatch {
            rows: rows.len(),
            scores: scores.len(),
        }
        .into());
    }

    let mut order: Vec<usize> = (0..rows.len()).collect();
    // slice::sort_by is stable, so ties stay in row order
    order.sort_by(|&a, &b| scores[b].total_cmp(&scores[a]));

    order
        .into_iter()
        .take(n)
        .map(|i| {
            let row = rows[i];
            Ok(RankedSite {
                row,
                site: dataset.site(row)?,
                score: scores[i],
                viability: threshold.classify(scores[i]),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{COUNTY_COLUMN, Cell, PLANT_COLUMN, STATE_COLUMN};
    use crate::scoring::ReferenceScope;

    fn dataset(n: usize) -> Dataset {
        Dataset::new(
            vec![STATE_COLUMN.into(), COUNTY_COLUMN.into(), PLANT_COLUMN.into()],
            (0..n)
                .map(|i| {
                    vec![
                        Cell::Text("TX".into()),
                        Cell::Text("Harris".into()),
                        Cell::Text(format!("Plant {i}")),
                    ]
                })
                .collect(),
        )
        .unwrap()
    }

    fn threshold(cutoff: f64) -> Threshold {
        Threshold {
            max_score: cutoff / 0.75,
            cutoff,
            scope: ReferenceScope::FullDataset,
        }
    }

    #[test]
    fn mismatched_lengths_rejected() {
        let ds = dataset(2);
        assert!(rank_top_n(&ds, &[0, 1], &[1.0], &threshold(1.0), 5).is_err());
    }

    #[test]
    fn top_n_bounds_enforced() {
        let ds = dataset(1);
        assert!(rank_top_n(&ds, &[0], &[1.0], &threshold(1.0), 0).is_err());
        assert!(rank_top_n(&ds, &[0], &[1.0], &threshold(1.0), 101).is_err());
    }

    #[test]
    fn labels_follow_threshold() {
        let ds = dataset(2);
        let ranked = rank_top_n(&ds, &[0, 1], &[2.0, 4.0], &threshold(3.0), 10).unwrap();
        assert_eq!(ranked[0].site.plant, "Plant 1");
        assert_eq!(ranked[0].viability, Viability::Viable);
        assert_eq!(ranked[1].viability, Viability::NotViable);
    }
}
