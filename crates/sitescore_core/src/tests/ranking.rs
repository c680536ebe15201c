//! Tests for top-N ranking

use crate::config::ColumnMapping;
use crate::model::{Factor, FactorTable, WeightVector};
use crate::ranking::rank_top_n;
use crate::scoring::{ReferenceScope, Threshold, score_table};

use super::plant_dataset;

fn scored() -> (crate::model::Dataset, Vec<usize>, Vec<f64>, Threshold) {
    let ds = plant_dataset();
    let mapping = ColumnMapping::new(Factor::ALL.map(|f| f.conventional_column().to_string()));
    let rows = ds.all_rows();
    let table = FactorTable::extract(&ds, &mapping, &rows).unwrap();
    let weights = WeightVector::from_fractions([0.2; 5]);
    let scores = score_table(&weights, &table);
    let threshold =
        Threshold::from_bounds(&weights, &table.bounds().unwrap(), ReferenceScope::FullDataset);
    (ds, rows, scores, threshold)
}

#[test]
fn test_sorted_descending() {
    let (ds, rows, scores, threshold) = scored();
    let ranked = rank_top_n(&ds, &rows, &scores, &threshold, 3).unwrap();

    assert_eq!(ranked.len(), 3);
    assert!(ranked.windows(2).all(|w| w[0].score >= w[1].score));
    let plants: Vec<&str> = ranked.iter().map(|r| r.site.plant.as_str()).collect();
    assert_eq!(plants, vec!["Alpha", "Charlie", "Echo"]);
}

#[test]
fn test_n_above_row_count_returns_each_row_once() {
    let (ds, rows, scores, threshold) = scored();
    let ranked = rank_top_n(&ds, &rows, &scores, &threshold, 100).unwrap();

    assert_eq!(ranked.len(), rows.len());
    let mut seen: Vec<usize> = ranked.iter().map(|r| r.row).collect();
    seen.sort_unstable();
    assert_eq!(seen, rows);
}

#[test]
fn test_ties_keep_row_order() {
    let (ds, rows, _, threshold) = scored();
    let flat = vec![1.0; rows.len()];
    let ranked = rank_top_n(&ds, &rows, &flat, &threshold, 10).unwrap();
    let order: Vec<usize> = ranked.iter().map(|r| r.row).collect();
    assert_eq!(order, rows);
}

#[test]
fn test_labels_match_threshold() {
    let (ds, rows, scores, threshold) = scored();
    // max_score = 0.2 * (5 + 5 + 5 + 1 + 5) = 4.2, cutoff 3.15; Alpha (4.0) and Charlie (3.6) clear it
    let ranked = rank_top_n(&ds, &rows, &scores, &threshold, 10).unwrap();
    let viable: Vec<&str> = ranked
        .iter()
        .filter(|r| r.viability.is_viable())
        .map(|r| r.site.plant.as_str())
        .collect();
    assert_eq!(viable, vec!["Alpha", "Charlie"]);
}
