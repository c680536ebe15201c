//! End-to-end tests for the mode controllers

use crate::analysis::SweepConfig;
use crate::config::{ColumnDefaults, ColumnMapping, ColumnOverrides};
use crate::error::{DatasetError, EngineError, WeightError};
use crate::model::{
    Cell, Dataset, Factor, FactorVector, PercentWeights, Record, Selection, SiteFilter,
};
use crate::modes::{
    ExplorationRequest, ManualScoringRequest, SiteScoringRequest, explore, manual_score,
    site_score,
};
use crate::scoring::{ReferenceScope, Viability};
use crate::simulation::MonteCarloConfig;

use super::plant_dataset;

const EPS: f64 = 1e-9;

fn mapping(ds: &Dataset) -> ColumnMapping {
    ColumnMapping::resolve(ds, &ColumnDefaults::default(), &ColumnOverrides::default()).unwrap()
}

// ----------------------------------------------------------------------------
// Manual scoring
// ----------------------------------------------------------------------------

#[test]
fn test_manual_default_request() {
    let report = manual_score(&ManualScoringRequest::default()).unwrap();
    // 0.2 * (3 + 3 + 3 + 3 + 1)
    assert!((report.score - 2.6).abs() < EPS);
    assert_eq!(report.threshold.scope, ReferenceScope::FixedScale);
    assert_eq!(report.viability, Viability::NotViable);
}

#[test]
fn test_manual_rejects_weights_not_summing_to_100() {
    let request = ManualScoringRequest {
        weights: PercentWeights([30, 30, 30, 10, 10]),
        ..Default::default()
    };
    assert_eq!(
        manual_score(&request).unwrap_err(),
        EngineError::Weights(WeightError::SumMismatch { total: 110 })
    );
}

#[test]
fn test_manual_accepts_uneven_weights_summing_to_100() {
    let request = ManualScoringRequest {
        weights: PercentWeights([30, 30, 30, 5, 5]),
        factors: FactorVector::new([5.0, 5.0, 5.0, 5.0, 1.0]),
    };
    let report = manual_score(&request).unwrap();
    assert!((report.score - report.threshold.max_score).abs() < EPS);
    assert_eq!(report.viability, Viability::Viable);
}

#[test]
fn test_manual_rejects_values_off_the_scale() {
    let request = ManualScoringRequest {
        factors: FactorVector::new([0.0, 3.0, 3.0, 3.0, 1.0]),
        ..Default::default()
    };
    assert!(matches!(
        manual_score(&request).unwrap_err(),
        EngineError::FactorOutOfBounds {
            factor: Factor::Generation,
            ..
        }
    ));
}

// ----------------------------------------------------------------------------
// Site scoring
// ----------------------------------------------------------------------------

#[test]
fn test_site_uses_selected_plant_values() {
    let ds = plant_dataset();
    let request = SiteScoringRequest {
        filter: SiteFilter::plant("TX", "Harris", "Bravo"),
        ..Default::default()
    };
    let report = site_score(&ds, &mapping(&ds), &request).unwrap();

    assert_eq!(report.selection_size, 1);
    assert_eq!(report.score.factors, FactorVector::new([2.0, 4.0, 3.0, 0.0, 2.0]));
    assert!((report.score.score - 2.2).abs() < EPS);
    assert!((report.score.threshold.cutoff - 3.15).abs() < EPS);
    assert_eq!(report.score.threshold.scope, ReferenceScope::FullDataset);
    assert_eq!(report.score.viability, Viability::NotViable);
    assert_eq!(report.top.len(), 1);
    assert_eq!(report.top[0].site.plant, "Bravo");
}

#[test]
fn test_site_without_plant_starts_from_minima() {
    let ds = plant_dataset();
    let request = SiteScoringRequest {
        filter: SiteFilter {
            state: "LA".into(),
            ..Default::default()
        },
        ..Default::default()
    };
    let report = site_score(&ds, &mapping(&ds), &request).unwrap();

    assert_eq!(report.score.factors, report.bounds.minima());
    assert_eq!(report.selection_size, 2);
    assert_eq!(report.top[0].site.plant, "Echo");
}

#[test]
fn test_site_overrides_checked_against_observed_range() {
    let ds = plant_dataset();
    let mut request = SiteScoringRequest::default();
    request.overrides[Factor::Generation.index()] = Some(5.0);
    let report = site_score(&ds, &mapping(&ds), &request).unwrap();
    assert_eq!(report.score.factors.get(Factor::Generation), 5.0);

    request.overrides[Factor::Pipeline.index()] = Some(3.0);
    assert!(matches!(
        site_score(&ds, &mapping(&ds), &request).unwrap_err(),
        EngineError::FactorOutOfBounds {
            factor: Factor::Pipeline,
            ..
        }
    ));
}

#[test]
fn test_site_unknown_plant_is_no_data() {
    let ds = plant_dataset();
    let request = SiteScoringRequest {
        filter: SiteFilter::plant("TX", "Harris", "Zulu"),
        ..Default::default()
    };
    assert_eq!(
        site_score(&ds, &mapping(&ds), &request).unwrap_err(),
        EngineError::EmptySelection
    );
}

#[test]
fn test_site_requires_identity_columns() {
    let ds = Dataset::new(
        ["PNAME", "GEN", "PIPE", "MARKET", "INCENTIVES", "WATER"]
            .map(String::from)
            .to_vec(),
        vec![vec![
            Cell::Text("Alpha".into()),
            Cell::Number(1.0),
            Cell::Number(1.0),
            Cell::Number(1.0),
            Cell::Number(1.0),
            Cell::Number(1.0),
        ]],
    )
    .unwrap();
    let err = site_score(&ds, &mapping(&ds), &SiteScoringRequest::default()).unwrap_err();
    assert_eq!(
        err,
        EngineError::Dataset(DatasetError::MissingColumns(vec![
            "PSTATABB".into(),
            "Plant county name".into()
        ]))
    );
}

// ----------------------------------------------------------------------------
// Exploration
// ----------------------------------------------------------------------------

#[test]
fn test_explore_reports_both_threshold_scopes() {
    let ds = plant_dataset();
    let request = ExplorationRequest {
        filter: SiteFilter {
            state: "LA".into(),
            ..Default::default()
        },
        monte_carlo: MonteCarloConfig::seeded(1_000, 17),
        ..Default::default()
    };
    let report = explore(&ds, &mapping(&ds), &request).unwrap();

    assert_eq!(report.selection_size, 2);
    // LA maxima: GEN 3, PIPE 4, MARKET 2, INCENTIVES 1, WATER 4
    assert!((report.simulation.threshold.max_score - 2.8).abs() < EPS);
    assert_eq!(report.simulation.threshold.scope, ReferenceScope::Selection);
    // Full dataset maxima: 5, 5, 5, 1, 5
    assert!((report.ranking_threshold.max_score - 4.2).abs() < EPS);
    assert_eq!(report.ranking_threshold.scope, ReferenceScope::FullDataset);
    assert!(report.sensitivity.is_none());

    let plants: Vec<&str> = report.top.iter().map(|r| r.site.plant.as_str()).collect();
    assert_eq!(plants, vec!["Echo", "Delta"]);
    assert!(report.top.iter().all(|r| r.viability == Viability::NotViable));
}

#[test]
fn test_explore_weights_are_independent() {
    let ds = plant_dataset();
    let request = ExplorationRequest {
        weights: PercentWeights([100, 100, 100, 100, 100]),
        monte_carlo: MonteCarloConfig::seeded(100, 3),
        ..Default::default()
    };
    assert!(explore(&ds, &mapping(&ds), &request).is_ok());
}

#[test]
fn test_explore_with_sweep() {
    let ds = plant_dataset();
    let request = ExplorationRequest {
        monte_carlo: MonteCarloConfig::seeded(500, 8),
        sweep: Some(SweepConfig::default()),
        ..Default::default()
    };
    let report = explore(&ds, &mapping(&ds), &request).unwrap();
    let sensitivity = report.sensitivity.unwrap();
    assert_eq!(sensitivity.curves.len(), 5);
    assert!(!sensitivity.narrative.lines.is_empty());
}

#[test]
fn test_explore_empty_selection_is_no_data() {
    let ds = plant_dataset();
    let request = ExplorationRequest {
        filter: SiteFilter {
            state: Selection::Only("CA".into()),
            ..Default::default()
        },
        ..Default::default()
    };
    assert_eq!(
        explore(&ds, &mapping(&ds), &request).unwrap_err(),
        EngineError::EmptySelection
    );
}

#[test]
fn test_explore_validates_controls_first() {
    let ds = plant_dataset();
    let request = ExplorationRequest {
        top_n: 0,
        ..Default::default()
    };
    assert!(matches!(
        explore(&ds, &mapping(&ds), &request).unwrap_err(),
        EngineError::ControlOutOfRange {
            control: "top_n",
            ..
        }
    ));
}

/// Two-plant dataset whose second GEN cell is `second_gen`
fn dataset_with_gen(second_gen: Cell) -> Dataset {
    let mut records = Vec::new();
    for (plant, gen_cell) in [("Alpha", Cell::Number(3.0)), ("Bravo", second_gen)] {
        let mut record = Record::new();
        record.insert("PSTATABB".into(), Cell::Text("TX".into()));
        record.insert("Plant county name".into(), Cell::Text("Harris".into()));
        record.insert("PNAME".into(), Cell::Text(plant.into()));
        record.insert("GEN".into(), gen_cell);
        for column in ["PIPE", "MARKET", "INCENTIVES", "WATER"] {
            record.insert(column.into(), Cell::Number(1.0));
        }
        records.push(record);
    }
    Dataset::from_records(records)
}

fn gen_error(row: usize) -> EngineError {
    EngineError::Dataset(DatasetError::NonNumeric {
        column: "GEN".into(),
        row,
    })
}

#[test]
fn test_non_numeric_factor_cell_is_reported() {
    let ds = dataset_with_gen(Cell::Text("high".into()));
    let err = explore(&ds, &mapping(&ds), &ExplorationRequest::default()).unwrap_err();
    assert_eq!(err, gen_error(1));
}

#[test]
fn test_non_finite_factor_cells_are_reported() {
    for cell in [
        Cell::Text("NaN".into()),
        Cell::Text("inf".into()),
        Cell::Number(f64::NAN),
        Cell::Number(f64::INFINITY),
    ] {
        let ds = dataset_with_gen(cell.clone());
        let request = ExplorationRequest {
            monte_carlo: MonteCarloConfig::seeded(100, 2),
            ..Default::default()
        };
        assert_eq!(
            explore(&ds, &mapping(&ds), &request).unwrap_err(),
            gen_error(1),
            "{cell:?}"
        );
        assert_eq!(
            site_score(&ds, &mapping(&ds), &SiteScoringRequest::default()).unwrap_err(),
            gen_error(1),
            "{cell:?}"
        );
    }
}
