//! Plain-language reading of sensitivity curves.
//!
//! The text is built from the computed curves: each factor's end-to-end
//! movement, swing and per-step slope, ranked by swing.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::SensitivityCurve;
use crate::model::Factor;

/// Swings below this are treated as no movement
const FLAT_EPSILON: f64 = 1e-9;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Narrative {
    /// Factor with the largest swing, if any factor moves the score at all
    pub most_influential: Option<Factor>,
    /// Factors whose swing is zero under the current weights
    pub no_effect: Vec<Factor>,
    pub lines: Vec<String>,
}

impl Narrative {
    #[must_use]
    pub fn from_curves(curves: &[SensitivityCurve]) -> Self {
        let mut ranked: Vec<&SensitivityCurve> = curves.iter().collect();
        ranked.sort_by(|a, b| b.swing().total_cmp(&a.swing()));

        let most_influential = ranked
            .first()
            .filter(|c| c.swing() > FLAT_EPSILON)
            .map(|c| c.factor);

        let no_effect: Vec<Factor> = curves
            .iter()
            .filter(|c| c.swing() <= FLAT_EPSILON)
            .map(|c| c.factor)
            .collect();

        let mut lines = Vec::with_capacity(curves.len() + 2);
        for curve in curves {
            lines.push(describe(curve));
        }

        match most_influential {
            Some(top) => {
                let order: Vec<String> = ranked
                    .iter()
                    .filter(|c| c.swing() > FLAT_EPSILON)
                    .map(|c| format!("{} ({})", c.column, c.factor))
                    .collect();
                lines.push(format!(
                    "Most influential: {top}. Ranked by swing: {}.",
                    order.join(" > ")
                ));
            }
            None => lines.push(
                "No factor moves the average Y under the current weights.".to_string(),
            ),
        }

        if most_influential.is_some() && !no_effect.is_empty() {
            let names: Vec<String> = no_effect.iter().map(ToString::to_string).collect();
            lines.push(format!(
                "No effect under the current weights: {}.",
                names.join(", ")
            ));
        }

        Self {
            most_influential,
            no_effect,
            lines,
        }
    }
}

fn describe(curve: &SensitivityCurve) -> String {
    let (Some(first), Some(last)) = (curve.first(), curve.last()) else {
        return format!("{} ({}): no points.", curve.column, curve.factor);
    };

    if curve.swing() <= FLAT_EPSILON {
        return format!(
            "{} ({}): average Y stays at {:.3} across [{}, {}].",
            curve.column, curve.factor, first.mean_score, curve.domain.min, curve.domain.max
        );
    }

    format!(
        "{} ({}): average Y moves from {:.3} to {:.3} across [{}, {}] (swing {:.3}, {:+.3} per step).",
        curve.column,
        curve.factor,
        first.mean_score,
        last.mean_score,
        curve.domain.min,
        curve.domain.max,
        curve.swing(),
        curve.slope()
    )
}

impl fmt::Display for Narrative {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, line) in self.lines.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            f.write_str(line)?;
        }
        Ok(())
    }
}
