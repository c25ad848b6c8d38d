//! Missing-value table.

use serde::Serialize;

use super::column::count_missing;
use crate::{
    dataset::{ArrowDataset, Dataset},
    error::Result,
};

/// Missing-value accounting for one column
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MissingEntry {
    /// Column name
    pub column: String,
    /// Number of missing cells
    pub missing_count: usize,
    /// `missing_count / n_rows`, 0 for an empty dataset
    pub missing_share: f64,
}

/// Per-column missing counts and shares, in dataset column order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MissingTable {
    /// Row count of the dataset the table was built from
    pub n_rows: usize,
    entries: Vec<MissingEntry>,
}

impl MissingTable {
    /// Build a table from precomputed counts.
    ///
    /// Shares are derived from `n_rows`.
    pub fn from_counts<N: Into<String>>(
        n_rows: usize,
        counts: impl IntoIterator<Item = (N, usize)>,
    ) -> Self {
        let entries = counts
            .into_iter()
            .map(|(column, missing_count)| MissingEntry {
                column: column.into(),
                missing_count,
                missing_share: share(missing_count, n_rows),
            })
            .collect();
        Self { n_rows, entries }
    }

    /// Entry for a column.
    pub fn get(&self, column: &str) -> Option<&MissingEntry> {
        self.entries.iter().find(|e| e.column == column)
    }

    /// Whether the table has an entry for `column`.
    pub fn contains(&self, column: &str) -> bool {
        self.get(column).is_some()
    }

    /// Entries in dataset column order.
    pub fn entries(&self) -> &[MissingEntry] {
        &self.entries
    }

    /// Number of columns.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no columns.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries ordered by descending share; ties keep column order.
    pub fn sorted_by_missing(&self) -> Vec<&MissingEntry> {
        let mut sorted: Vec<&MissingEntry> = self.entries.iter().collect();
        sorted.sort_by(|a, b| b.missing_count.cmp(&a.missing_count));
        sorted
    }

    /// Mean of the per-column shares, 0 with no columns.
    pub fn mean_missing_share(&self) -> f64 {
        if self.entries.is_empty() {
            return 0.0;
        }
        self.entries.iter().map(|e| e.missing_share).sum::<f64>() / self.entries.len() as f64
    }

    /// Largest per-column share, 0 with no columns.
    pub fn max_missing_share(&self) -> f64 {
        self.entries
            .iter()
            .map(|e| e.missing_share)
            .fold(0.0, f64::max)
    }
}

fn share(count: usize, n_rows: usize) -> f64 {
    if n_rows > 0 {
        count as f64 / n_rows as f64
    } else {
        0.0
    }
}

/// Count missing values in every column.
///
/// # Errors
///
/// Returns [`crate::Error::InvalidInput`] if the dataset is not rectangular
/// or has duplicate column names.
pub fn missing_table(dataset: &ArrowDataset) -> Result<MissingTable> {
    dataset.validate_shape()?;

    let schema = dataset.schema();
    let counts = schema
        .fields()
        .iter()
        .enumerate()
        .map(|(index, field)| Ok((field.name().clone(), count_missing(dataset, index)?)))
        .collect::<Result<Vec<_>>>()?;

    let table = MissingTable::from_counts(dataset.len(), counts);
    tracing::debug!(
        n_rows = table.n_rows,
        columns = table.len(),
        max_share = table.max_missing_share(),
        "built missing table"
    );
    Ok(table)
}
