//! Plain-text and JSON rendering of engine reports

use serde::Serialize;
use sitescore_core::{
    ExplorationReport, Factor, FilterOptions, RankedSite, ScoreReport, SensitivityReport,
    SiteFilter, SiteReport, Threshold,
};

/// Pretty-printed JSON for any report
pub fn to_json<T: Serialize>(report: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}

fn threshold_line(threshold: &Threshold) -> String {
    format!(
        "Threshold: {:.3} (75% of max {:.3}, {})",
        threshold.cutoff, threshold.max_score, threshold.scope
    )
}

fn factor_lines(report: &ScoreReport) -> Vec<String> {
    Factor::ALL
        .iter()
        .map(|&f| format!("  {f}: {}", report.factors.get(f)))
        .collect()
}

pub fn render_score(report: &ScoreReport) -> String {
    let mut lines = vec!["Factors:".to_string()];
    lines.extend(factor_lines(report));
    lines.push(format!("Score (Y): {:.3}", report.score));
    lines.push(threshold_line(&report.threshold));
    lines.push(format!("Result: {}", report.viability));
    lines.join("\n")
}

/// Fixed-width table of ranked sites
pub fn render_ranking(sites: &[RankedSite]) -> String {
    if sites.is_empty() {
        return "(no sites)".to_string();
    }

    let plant_width = sites
        .iter()
        .map(|s| s.site.plant.len())
        .max()
        .unwrap_or(0)
        .max("Plant".len());
    let county_width = sites
        .iter()
        .map(|s| s.site.county.len())
        .max()
        .unwrap_or(0)
        .max("County".len());

    let mut lines = vec![format!(
        "{:>4}  {:<5}  {:<county_width$}  {:<plant_width$}  {:>8}  Result",
        "#", "State", "County", "Plant", "Score"
    )];
    for (rank, site) in sites.iter().enumerate() {
        lines.push(format!(
            "{:>4}  {:<5}  {:<county_width$}  {:<plant_width$}  {:>8.3}  {}",
            rank + 1,
            site.site.state,
            site.site.county,
            site.site.plant,
            site.score,
            site.viability
        ));
    }
    lines.join("\n")
}

pub fn render_site(report: &SiteReport) -> String {
    let mut lines = vec![format!("Selected rows: {}", report.selection_size)];
    lines.push("Observed ranges:".to_string());
    for factor in Factor::ALL {
        let range = report.bounds.range(factor);
        lines.push(format!("  {factor} [{}, {}]", range.min, range.max));
    }
    lines.push(render_score(&report.score));
    lines.push(String::new());
    lines.push(format!("Top {} sites:", report.top.len()));
    lines.push(render_ranking(&report.top));
    lines.join("\n")
}

pub fn render_sensitivity(report: &SensitivityReport) -> String {
    let mut lines = vec![format!(
        "  baseline average Y: {:.3}",
        report.baseline_mean
    )];
    for curve in &report.curves {
        let points: Vec<String> = curve
            .points
            .iter()
            .map(|p| format!("{}={:.3}", p.value, p.mean_score))
            .collect();
        lines.push(format!(
            "  {} ({}): {}",
            curve.column,
            curve.factor,
            points.join("  ")
        ));
    }
    lines.push(String::new());
    lines.push(report.narrative.to_string());
    lines.join("\n")
}

pub fn render_exploration(report: &ExplorationReport) -> String {
    let sim = &report.simulation;
    let mut lines = vec![
        format!("Selected rows: {}", report.selection_size),
        format!(
            "Simulated mean Y: {:.3} over {} samples (seed {})",
            sim.mean,
            sim.iterations(),
            sim.seed
        ),
        threshold_line(&sim.threshold),
        format!("Result: {}", sim.viability),
        String::new(),
        format!(
            "Top {} sites ({}):",
            report.top.len(),
            threshold_line(&report.ranking_threshold)
        ),
        render_ranking(&report.top),
    ];

    if let Some(sensitivity) = &report.sensitivity {
        lines.push(String::new());
        lines.push("Sensitivity (average Y per pinned value):".to_string());
        lines.push(render_sensitivity(sensitivity));
    }
    lines.join("\n")
}

/// One option per line, the active one marked
fn render_options(level: &str, options: &[String], active: &str) -> String {
    let mut lines = vec![format!("{level}:")];
    for option in options {
        let marker = if option == active { '*' } else { ' ' };
        lines.push(format!(" {marker} {option}"));
    }
    lines.join("\n")
}

/// Every level of the cascade, the filter's current choice marked
pub fn render_filter_options(options: &FilterOptions, filter: &SiteFilter) -> String {
    [
        render_options("State", &options.state, &filter.state.to_string()),
        render_options("County", &options.county, &filter.county.to_string()),
        render_options("Plant", &options.plant, &filter.plant.to_string()),
    ]
    .join("\n\n")
}
