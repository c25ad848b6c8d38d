//! Dataset loading and output helpers shared by the CLI commands.

use std::path::Path;

use clap::ValueEnum;
use serde::Serialize;

use crate::{ArrowDataset, CsvOptions};

/// How a command renders its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable tables
    Text,
    /// Pretty-printed JSON
    Json,
}

/// Load a dataset from a file path based on extension.
///
/// CSV column types are inferred from every row, not a leading sample.
pub(crate) fn load_dataset(path: &Path) -> crate::Result<ArrowDataset> {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");

    let dataset = match ext {
        "parquet" => ArrowDataset::from_parquet(path),
        "csv" => {
            ArrowDataset::from_csv_with_options(path, CsvOptions::new().with_infer_rows(None))
        }
        "json" | "jsonl" => ArrowDataset::from_json(path),
        ext => Err(crate::Error::unsupported_format(ext)),
    }?;

    tracing::info!(path = %path.display(), format = get_format(path), "loaded dataset");

    Ok(dataset)
}

/// Get format name from file extension.
pub(crate) fn get_format(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some("parquet") => "Parquet",
        Some("csv") => "CSV",
        Some("json" | "jsonl") => "JSON",
        _ => "Unknown",
    }
}

/// Serialize a value as pretty JSON.
pub(crate) fn to_json<T: Serialize>(value: &T) -> crate::Result<String> {
    serde_json::to_string_pretty(value).map_err(|e| crate::Error::Format(e.to_string()))
}

/// Header lines printed above every text report.
pub(crate) fn print_header(title: &str, path: &Path) {
    println!("{}", title);
    println!("{}", "=".repeat(title.len()));
    println!("File: {} ({})", path.display(), get_format(path));
}
