//! Cascading state -> county -> plant selection.
//!
//! Each level is either the `All` wildcard or one specific value. The options
//! offered for a level only include values present in rows matching the
//! levels above it.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{COUNTY_COLUMN, Dataset, IDENTITY_COLUMNS, PLANT_COLUMN, STATE_COLUMN};
use crate::error::DatasetError;

/// Label of the wildcard option
pub const ALL_OPTION: &str = "All";

/// One level of the cascade
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Selection {
    #[default]
    All,
    Only(String),
}

impl Selection {
    #[must_use]
    pub fn matches(&self, value: &str) -> bool {
        match self {
            Selection::All => true,
            Selection::Only(wanted) => wanted == value,
        }
    }

    #[must_use]
    pub fn is_all(&self) -> bool {
        matches!(self, Selection::All)
    }
}

impl From<String> for Selection {
    fn from(value: String) -> Self {
        if value == ALL_OPTION {
            Selection::All
        } else {
            Selection::Only(value)
        }
    }
}

impl From<&str> for Selection {
    fn from(value: &str) -> Self {
        Selection::from(value.to_string())
    }
}

impl From<Selection> for String {
    fn from(selection: Selection) -> Self {
        match selection {
            Selection::All => ALL_OPTION.to_string(),
            Selection::Only(value) => value,
        }
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selection::All => f.write_str(ALL_OPTION),
            Selection::Only(value) => f.write_str(value),
        }
    }
}

/// Choices offered at each level of the cascade, each list starting with "All"
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOptions {
    pub state: Vec<String>,
    pub county: Vec<String>,
    pub plant: Vec<String>,
}

/// State, county and plant selection applied to a dataset
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteFilter {
    pub state: Selection,
    pub county: Selection,
    pub plant: Selection,
}

impl SiteFilter {
    /// Filter selecting a single plant
    #[must_use]
    pub fn plant(state: &str, county: &str, plant: &str) -> Self {
        Self {
            state: state.into(),
            county: county.into(),
            plant: plant.into(),
        }
    }

    /// True when the plant level names a specific site
    #[must_use]
    pub fn is_single_site(&self) -> bool {
        !self.plant.is_all()
    }

    /// Indices of matching rows, in dataset order
    pub fn apply(&self, dataset: &Dataset) -> Result<Vec<usize>, DatasetError> {
        let mut rows = Vec::new();
        for row in 0..dataset.len() {
            if self.state.matches(&dataset.text(row, STATE_COLUMN)?)
                && self.county.matches(&dataset.text(row, COUNTY_COLUMN)?)
                && self.plant.matches(&dataset.text(row, PLANT_COLUMN)?)
            {
                rows.push(row);
            }
        }
        Ok(rows)
    }

    /// Options for every level under this filter. Fails with every missing
    /// identity column before looking at any row.
    pub fn options(&self, dataset: &Dataset) -> Result<FilterOptions, DatasetError> {
        dataset.require_columns(&IDENTITY_COLUMNS)?;
        Ok(FilterOptions {
            state: Self::state_options(dataset)?,
            county: self.county_options(dataset)?,
            plant: self.plant_options(dataset)?,
        })
    }

    /// "All" followed by every state code
    pub fn state_options(dataset: &Dataset) -> Result<Vec<String>, DatasetError> {
        options(dataset, STATE_COLUMN, |_| Ok(true))
    }

    /// "All" followed by the counties within the selected state
    pub fn county_options(&self, dataset: &Dataset) -> Result<Vec<String>, DatasetError> {
        options(dataset, COUNTY_COLUMN, |row| {
            Ok(self.state.matches(&dataset.text(row, STATE_COLUMN)?))
        })
    }

    /// "All" followed by the plants within the selected state and county
    pub fn plant_options(&self, dataset: &Dataset) -> Result<Vec<String>, DatasetError> {
        options(dataset, PLANT_COLUMN, |row| {
            Ok(self.state.matches(&dataset.text(row, STATE_COLUMN)?)
                && self.county.matches(&dataset.text(row, COUNTY_COLUMN)?))
        })
    }
}

/// Unique values of `column` among rows accepted by `keep`, first-seen order
fn options<F>(dataset: &Dataset, column: &str, keep: F) -> Result<Vec<String>, DatasetError>
where
    F: Fn(usize) -> Result<bool, DatasetError>,
{
    let mut values = vec![ALL_OPTION.to_string()];
    for row in 0..dataset.len() {
        if !keep(row)? {
            continue;
        }
        let value = dataset.text(row, column)?;
        if !values[1..].contains(&value) {
            values.push(value);
        }
    }
    Ok(values)
}
