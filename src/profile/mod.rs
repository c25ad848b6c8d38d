//! Dataset profiling and data-quality heuristics
//!
//! Every function here is a pure, single-pass computation over an
//! [`ArrowDataset`](crate::ArrowDataset) snapshot. Nothing is cached between
//! calls and the dataset is never modified.
//!
//! ```text
//! dataset ─┬─ summarize_dataset ──┬─ compute_quality_flags
//!          ├─ missing_table ──────┘
//!          ├─ correlation_matrix
//!          └─ top_categories
//! summarize_dataset ── flatten_summary_for_print
//! ```
//!
//! # Missing values
//!
//! A cell is missing when Arrow marks it null, or when it is NaN in a
//! numeric column. [`summarize_dataset`] and [`missing_table`] count with the
//! same rule, so their per-column counts always agree.
//!
//! # Example
//!
//! ```
//! use eda_cli::{
//!     profile::{compute_quality_flags, missing_table, summarize_dataset},
//!     ArrowDataset,
//! };
//!
//! let dataset = ArrowDataset::from_csv_str("user_id,score\nu1,1\nu2,2\nu2,3\n").unwrap();
//! let summary = summarize_dataset(&dataset).unwrap();
//! let missing = missing_table(&dataset).unwrap();
//! let flags = compute_quality_flags(&summary, &missing).unwrap();
//!
//! assert!(flags.has_suspicious_id_duplicates);
//! assert!(flags.quality_score < 1.0);
//! ```

// Statistical computation
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::suboptimal_flops)]

mod categories;
mod column;
mod config;
mod correlation;
mod flags;
mod flatten;
mod missing;
mod summary;


pub use categories::{top_categories, top_values, CategoryCount, CategoryTable, TopCategoriesResult};
pub use column::{read_column, read_columns, ColumnValues, DtypeKind};
pub use config::{IdNameRule, QualityConfig};
pub use correlation::{correlation_matrix, pearson, CorrelationMatrix, CorrelationPair};
pub use flags::{
    compute_quality_flags, compute_quality_flags_with, is_identifier_name, quality_score,
    QualityFlags,
};
pub use flatten::{flatten_summary_for_print, SummaryRow, SummaryTable};
pub use missing::{missing_table, MissingEntry, MissingTable};
pub use summary::{profile_column, summarize_dataset, ColumnSummary, DatasetSummary, NumericStats};
