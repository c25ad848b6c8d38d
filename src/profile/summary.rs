//! Column and Dataset Summaries
//!
//! [`profile_column`] summarizes one column; [`summarize_dataset`] runs it
//! over every column in schema order.

use std::collections::HashSet;

use serde::Serialize;

use super::column::{read_columns, CellKey, ColumnValues, DtypeKind};
use crate::{
    dataset::{ArrowDataset, Dataset},
    error::{Error, Result},
};

/// Number of distinct example values kept per column.
pub const EXAMPLE_VALUES: usize = 3;

/// Descriptive statistics for a numeric column with at least one value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NumericStats {
    /// Minimum value
    pub min: f64,
    /// Maximum value
    pub max: f64,
    /// Arithmetic mean
    pub mean: f64,
    /// Sample standard deviation (`n - 1`); `None` with fewer than two values
    pub std: Option<f64>,
}

impl NumericStats {
    /// Compute statistics over the present values, or `None` if there are
    /// none.
    pub fn from_values(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }

        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        let std = (values.len() > 1).then(|| {
            let ss = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>();
            (ss / (n - 1.0)).sqrt()
        });

        Some(Self {
            min,
            max,
            mean,
            std,
        })
    }
}

/// Summary of a single column
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnSummary {
    /// Column name
    pub name: String,
    /// Coarse kind used by the quality heuristics
    pub dtype_kind: DtypeKind,
    /// Arrow storage type, e.g. `Int64`
    pub dtype: String,
    /// Non-missing value count
    pub count: usize,
    /// Missing value count
    pub missing: usize,
    /// Distinct non-missing values
    pub unique: usize,
    /// Up to three distinct values in first-seen order
    pub example_values: Vec<String>,
    /// Statistics for numeric columns with at least one value
    pub stats: Option<NumericStats>,
}

impl ColumnSummary {
    /// Total rows (`count + missing`).
    pub fn rows(&self) -> usize {
        self.count + self.missing
    }

    /// Share of missing rows, 0 for an empty column.
    pub fn missing_share(&self) -> f64 {
        let rows = self.rows();
        if rows > 0 {
            self.missing as f64 / rows as f64
        } else {
            0.0
        }
    }

    /// `unique / count`, or `None` when nothing is present.
    pub fn unique_ratio(&self) -> Option<f64> {
        (self.count > 0).then(|| self.unique as f64 / self.count as f64)
    }

    /// Check if column is constant (single distinct non-missing value)
    pub fn is_constant(&self) -> bool {
        self.count > 0 && self.unique == 1
    }

    /// Check if the non-missing values hold a repeat
    pub fn has_duplicates(&self) -> bool {
        self.count > 0 && self.unique < self.count
    }
}

/// Summary of a whole dataset
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetSummary {
    /// Row count
    pub n_rows: usize,
    /// Column count, always `columns.len()`
    pub n_cols: usize,
    /// Per-column summaries in dataset column order
    pub columns: Vec<ColumnSummary>,
}

impl DatasetSummary {
    /// Look up a column summary by name.
    pub fn column(&self, name: &str) -> Option<&ColumnSummary> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Summaries of numeric columns in order.
    pub fn numeric_columns(&self) -> impl Iterator<Item = &ColumnSummary> + '_ {
        self.columns.iter().filter(|c| c.dtype_kind.is_numeric())
    }

    /// Total missing cells across all columns.
    pub fn total_missing(&self) -> usize {
        self.columns.iter().map(|c| c.missing).sum()
    }
}

/// Summarize one already-read column.
pub fn profile_column(values: &ColumnValues) -> ColumnSummary {
    let mut seen: HashSet<CellKey<'_>> = HashSet::new();
    let mut example_values = Vec::with_capacity(EXAMPLE_VALUES);
    let mut count = 0;

    for (key, value) in values.present_keyed() {
        count += 1;
        if seen.insert(key) && example_values.len() < EXAMPLE_VALUES {
            example_values.push(value.to_string());
        }
    }

    let stats = values.numbers().and_then(|numbers| {
        let present: Vec<f64> = numbers.iter().flatten().copied().collect();
        NumericStats::from_values(&present)
    });

    ColumnSummary {
        name: values.name().to_string(),
        dtype_kind: values.kind(),
        dtype: values.data_type().to_string(),
        count,
        missing: values.len() - count,
        unique: seen.len(),
        example_values,
        stats,
    }
}

/// Summarize every column of a dataset.
///
/// # Errors
///
/// Returns [`Error::InvalidInput`] if the dataset is not rectangular or has
/// duplicate column names.
pub fn summarize_dataset(dataset: &ArrowDataset) -> Result<DatasetSummary> {
    let n_rows = dataset.len();
    let columns = read_columns(dataset)?
        .iter()
        .map(|values| {
            if values.len() == n_rows {
                Ok(profile_column(values))
            } else {
                Err(Error::invalid_input(format!(
                    "column '{}' has {} rows, expected {}",
                    values.name(),
                    values.len(),
                    n_rows
                )))
            }
        })
        .collect::<Result<Vec<_>>>()?;

    tracing::debug!(n_rows, n_cols = columns.len(), "summarized dataset");

    Ok(DatasetSummary {
        n_rows,
        n_cols: columns.len(),
        columns,
    })
}
