use serde::Serialize;

use super::{Dataset, FACTOR_COUNT, Factor, FactorBounds, FactorRange, FactorVector};
use crate::config::ColumnMapping;
use crate::error::DatasetError;

/// Factor values for a set of rows, stored column by column.
///
/// Each slot remembers the dataset column it was read from, so callers can
/// tell when two slots share one underlying column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FactorTable {
    columns: [String; FACTOR_COUNT],
    values: [Vec<f64>; FACTOR_COUNT],
    rows: Vec<usize>,
}

impl FactorTable {
    /// Read the mapped factor columns of `rows` from `dataset`
    pub fn extract(
        dataset: &Dataset,
        mapping: &ColumnMapping,
        rows: &[usize],
    ) -> Result<Self, DatasetError> {
        let mut values: [Vec<f64>; FACTOR_COUNT] = Default::default();
        for factor in Factor::ALL {
            let column = mapping.column(factor);
            let slot = &mut values[factor.index()];
            slot.reserve(rows.len());
            for &row in rows {
                slot.push(dataset.number(row, column)?);
            }
        }

        Ok(Self {
            columns: mapping.columns().clone(),
            values,
            rows: rows.to_vec(),
        })
    }

    /// Build directly from column values. All columns must have the same length.
    pub fn from_columns(
        columns: [String; FACTOR_COUNT],
        values: [Vec<f64>; FACTOR_COUNT],
    ) -> Result<Self, DatasetError> {
        let len = values[0].len();
        if let Some(bad) = values.iter().position(|v| v.len() != len) {
            return Err(DatasetError::UnevenColumns {
                expected: len,
                found: values[bad].len(),
            });
        }
        Ok(Self {
            columns,
            values,
            rows: (0..len).collect(),
        })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Dataset row index of each table row
    #[must_use]
    pub fn source_rows(&self) -> &[usize] {
        &self.rows
    }

    #[must_use]
    pub fn column_name(&self, factor: Factor) -> &str {
        &self.columns[factor.index()]
    }

    #[must_use]
    pub fn column(&self, factor: Factor) -> &[f64] {
        &self.values[factor.index()]
    }

    /// Factors read from the same dataset column as `factor` (including itself)
    #[must_use]
    pub fn slots_sharing_column(&self, factor: Factor) -> Vec<Factor> {
        let name = self.column_name(factor);
        Factor::ALL
            .into_iter()
            .filter(|f| self.column_name(*f) == name)
            .collect()
    }

    /// Factor vector of table row `i`
    #[must_use]
    pub fn row(&self, i: usize) -> FactorVector {
        FactorVector(std::array::from_fn(|f| self.values[f][i]))
    }

    pub fn iter_rows(&self) -> impl Iterator<Item = FactorVector> + '_ {
        (0..self.len()).map(|i| self.row(i))
    }

    /// Observed per-factor min/max, `None` for an empty table
    #[must_use]
    pub fn bounds(&self) -> Option<FactorBounds> {
        if self.is_empty() {
            return None;
        }
        Some(FactorBounds(std::array::from_fn(|f| {
            let column = &self.values[f];
            FactorRange::new(
                column.iter().copied().fold(f64::INFINITY, f64::min),
                column.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            )
        })))
    }

    /// Per-factor column means, `None` for an empty table
    #[must_use]
    pub fn means(&self) -> Option<FactorVector> {
        if self.is_empty() {
            return None;
        }
        let n = self.len() as f64;
        Some(FactorVector(std::array::from_fn(|f| {
            self.values[f].iter().sum::<f64>() / n
        })))
    }
}
