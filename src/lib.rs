//! eda-cli - Exploratory Profiling of Tabular Data in Pure Rust
//!
//! Computes the first-look statistics of a tabular dataset: per-column
//! summaries, missing-value tables, correlations between numeric columns,
//! most frequent categories and a handful of data-quality flags with an
//! overall score.
//!
//! # Design Principles
//!
//! 1. **Pure functions** - every profile is computed from a dataset snapshot;
//!    nothing is cached or mutated
//! 2. **Arrow native** - datasets are Arrow `RecordBatch`es
//! 3. **Explicit typing** - each column carries a [`DtypeKind`] decided once
//!    when it is read
//!
//! # Quick Start
//!
//! ```no_run
//! use eda_cli::{
//!     compute_quality_flags, missing_table, summarize_dataset, ArrowDataset,
//! };
//!
//! let dataset = ArrowDataset::from_csv("data/users.csv").unwrap();
//! let summary = summarize_dataset(&dataset).unwrap();
//! let missing = missing_table(&dataset).unwrap();
//! let flags = compute_quality_flags(&summary, &missing).unwrap();
//!
//! println!("quality score: {:.2}", flags.quality_score);
//! ```

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
// Allow common test patterns
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::cast_lossless,
        clippy::cast_possible_truncation,
        clippy::cast_possible_wrap,
        clippy::cast_precision_loss,
        clippy::redundant_clone,
        clippy::needless_collect,
        clippy::too_many_lines,
        clippy::float_cmp,
        clippy::similar_names,
        clippy::unreadable_literal
    )
)]
// Allow some pedantic lints for cleaner code
#![allow(clippy::doc_markdown)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]
#![allow(clippy::map_unwrap_or)]

/// CLI module for command-line interface
#[cfg(feature = "cli")]
pub mod cli;
pub mod dataset;
pub mod error;
pub mod profile;

// Re-exports for convenience
// Re-export arrow types commonly needed
pub use arrow::{
    array::RecordBatch,
    datatypes::{Schema, SchemaRef},
};
pub use dataset::{ArrowDataset, CsvOptions, Dataset, JsonOptions};
pub use error::{Error, Result};
pub use profile::{
    compute_quality_flags, compute_quality_flags_with, correlation_matrix,
    flatten_summary_for_print, missing_table, summarize_dataset, top_categories, ColumnSummary,
    CorrelationMatrix, DatasetSummary, DtypeKind, IdNameRule, MissingTable, QualityConfig,
    QualityFlags, SummaryTable, TopCategoriesResult,
};
