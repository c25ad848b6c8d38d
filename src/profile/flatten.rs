//! Flat, row-per-column view of a [`DatasetSummary`] for display.

use std::sync::Arc;

use arrow::{
    array::{Array, ArrayRef, Float64Array, RecordBatch, StringArray, UInt64Array},
    datatypes::{Field, Schema},
};
use serde::Serialize;

use super::summary::DatasetSummary;
use crate::error::Result;

/// One column of the summary, flattened
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryRow {
    /// Column name
    pub name: String,
    /// Coarse kind
    pub dtype_kind: String,
    /// Arrow storage type
    pub dtype: String,
    /// Non-missing values
    pub count: usize,
    /// Missing values
    pub missing: usize,
    /// `missing / n_rows`
    pub missing_share: f64,
    /// Distinct non-missing values
    pub unique: usize,
    /// Example values joined with `, `
    pub example_values: String,
    /// Minimum (numeric only)
    pub min: Option<f64>,
    /// Maximum (numeric only)
    pub max: Option<f64>,
    /// Mean (numeric only)
    pub mean: Option<f64>,
    /// Sample standard deviation (numeric only)
    pub std: Option<f64>,
}

/// Flattened summary, one row per dataset column
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryTable {
    /// Rows in dataset column order
    pub rows: Vec<SummaryRow>,
}

impl SummaryTable {
    /// Column headers of the flat view.
    pub const COLUMNS: [&'static str; 12] = [
        "name",
        "dtype_kind",
        "dtype",
        "count",
        "missing",
        "missing_share",
        "unique",
        "example_values",
        "min",
        "max",
        "mean",
        "std",
    ];

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the summary had no columns.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Render as an Arrow batch with [`SummaryTable::COLUMNS`] as fields.
    ///
    /// # Errors
    ///
    /// Returns an error if Arrow rejects the batch.
    pub fn to_record_batch(&self) -> Result<RecordBatch> {
        let rows = &self.rows;
        let columns: Vec<ArrayRef> = vec![
            Arc::new(StringArray::from_iter_values(rows.iter().map(|r| &r.name))),
            Arc::new(StringArray::from_iter_values(rows.iter().map(|r| &r.dtype_kind))),
            Arc::new(StringArray::from_iter_values(rows.iter().map(|r| &r.dtype))),
            Arc::new(UInt64Array::from_iter_values(rows.iter().map(|r| r.count as u64))),
            Arc::new(UInt64Array::from_iter_values(rows.iter().map(|r| r.missing as u64))),
            Arc::new(Float64Array::from_iter_values(rows.iter().map(|r| r.missing_share))),
            Arc::new(UInt64Array::from_iter_values(rows.iter().map(|r| r.unique as u64))),
            Arc::new(StringArray::from_iter_values(rows.iter().map(|r| &r.example_values))),
            Arc::new(rows.iter().map(|r| r.min).collect::<Float64Array>()),
            Arc::new(rows.iter().map(|r| r.max).collect::<Float64Array>()),
            Arc::new(rows.iter().map(|r| r.mean).collect::<Float64Array>()),
            Arc::new(rows.iter().map(|r| r.std).collect::<Float64Array>()),
        ];

        let fields: Vec<Field> = Self::COLUMNS
            .iter()
            .zip(&columns)
            .map(|(name, array)| {
                let nullable = array.null_count() > 0;
                Field::new(*name, array.data_type().clone(), nullable)
            })
            .collect();

        Ok(RecordBatch::try_new(Arc::new(Schema::new(fields)), columns)?)
    }
}

/// Project a summary into a flat table; no new statistics are computed.
pub fn flatten_summary_for_print(summary: &DatasetSummary) -> SummaryTable {
    let rows = summary
        .columns
        .iter()
        .map(|c| {
            let missing_share = if summary.n_rows > 0 {
                c.missing as f64 / summary.n_rows as f64
            } else {
                0.0
            };
            SummaryRow {
                name: c.name.clone(),
                dtype_kind: c.dtype_kind.to_string(),
                dtype: c.dtype.clone(),
                count: c.count,
                missing: c.missing,
                missing_share,
                unique: c.unique,
                example_values: c.example_values.join(", "),
                min: c.stats.as_ref().map(|s| s.min),
                max: c.stats.as_ref().map(|s| s.max),
                mean: c.stats.as_ref().map(|s| s.mean),
                std: c.stats.as_ref().and_then(|s| s.std),
            }
        })
        .collect();

    SummaryTable { rows }
}
