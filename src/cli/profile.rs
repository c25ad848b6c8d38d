//! Profiling CLI commands.

use std::path::Path;

use arrow::util::pretty::print_batches;

use super::basic::{load_dataset, print_header, to_json, OutputFormat};
use crate::{
    profile::{
        compute_quality_flags_with, correlation_matrix, flatten_summary_for_print, missing_table,
        summarize_dataset, top_categories, QualityConfig,
    },
    Dataset,
};

/// Summarize every column of a dataset.
pub(crate) fn cmd_overview(path: &Path, format: OutputFormat) -> crate::Result<()> {
    let dataset = load_dataset(path)?;
    let summary = summarize_dataset(&dataset)?;
    let table = flatten_summary_for_print(&summary);

    if format == OutputFormat::Json {
        println!("{}", to_json(&summary)?);
        return Ok(());
    }

    print_header("Dataset Overview", path);
    println!("Rows: {}", summary.n_rows);
    println!("Columns: {}", summary.n_cols);
    println!();

    if table.is_empty() {
        println!("Dataset has no columns");
        return Ok(());
    }

    let batch = table.to_record_batch()?;
    print_batches(&[batch]).map_err(crate::Error::Arrow)?;

    Ok(())
}

/// Print missing counts per column, most missing first.
pub(crate) fn cmd_missing(path: &Path, format: OutputFormat) -> crate::Result<()> {
    let dataset = load_dataset(path)?;
    let missing = missing_table(&dataset)?;

    if format == OutputFormat::Json {
        println!("{}", to_json(&missing)?);
        return Ok(());
    }

    print_header("Missing Values", path);
    println!("Rows: {}", missing.n_rows);
    println!();

    println!("{:<24} {:>10} {:>10}", "COLUMN", "MISSING", "SHARE %");
    println!("{}", "-".repeat(46));
    for entry in missing.sorted_by_missing() {
        println!(
            "{:<24} {:>10} {:>10.2}",
            entry.column,
            entry.missing_count,
            entry.missing_share * 100.0
        );
    }

    Ok(())
}

/// Print the correlation matrix and the strongest pairs.
pub(crate) fn cmd_correlation(path: &Path, threshold: f64, format: OutputFormat) -> crate::Result<()> {
    if !(0.0..=1.0).contains(&threshold) {
        return Err(crate::Error::invalid_config(format!(
            "threshold must be within [0, 1], got {}",
            threshold
        )));
    }

    let dataset = load_dataset(path)?;
    let matrix = correlation_matrix(&dataset)?;
    let pairs = matrix.strong_pairs(threshold);

    if format == OutputFormat::Json {
        let json = serde_json::json!({
            "path": path.display().to_string(),
            "columns": matrix.columns(),
            "matrix": matrix.rows(),
            "threshold": threshold,
            "strong_pairs": pairs,
        });
        println!("{}", to_json(&json)?);
        return Ok(());
    }

    print_header("Correlation (Pearson)", path);
    println!();

    if matrix.is_empty() {
        println!("Fewer than two numeric columns; nothing to correlate");
        return Ok(());
    }

    print!("{:<16}", "");
    for column in matrix.columns() {
        print!(" {:>12}", truncate(column, 12));
    }
    println!();
    for (column, row) in matrix.columns().iter().zip(matrix.rows()) {
        print!("{:<16}", truncate(column, 16));
        for r in row {
            print!(" {:>12.3}", r);
        }
        println!();
    }
    println!();

    if pairs.is_empty() {
        println!("No pairs with |r| >= {:.2}", threshold);
    } else {
        println!("Pairs with |r| >= {:.2}:", threshold);
        for pair in &pairs {
            println!("  {} ~ {}: {:+.3}", pair.left, pair.right, pair.r);
        }
    }

    Ok(())
}

/// Print the most frequent values of text and boolean columns.
pub(crate) fn cmd_top(
    path: &Path,
    max_columns: usize,
    top_k: usize,
    format: OutputFormat,
) -> crate::Result<()> {
    let dataset = load_dataset(path)?;
    let top = top_categories(&dataset, max_columns, top_k)?;

    if format == OutputFormat::Json {
        println!("{}", to_json(&top)?);
        return Ok(());
    }

    print_header("Top Categories", path);
    println!();

    if top.is_empty() {
        println!("No categorical columns");
        return Ok(());
    }

    for table in top.tables() {
        println!("{}:", table.column);
        if table.rows.is_empty() {
            println!("  (all values missing)");
        }
        for row in &table.rows {
            println!("  {:<24} {:>8}", truncate(&row.value, 24), row.count);
        }
        println!();
    }

    Ok(())
}

/// Resolve the quality config from a JSON file or a preset name.
pub(crate) fn resolve_config(
    preset: &str,
    config: Option<&Path>,
    id_tokens: &[String],
) -> crate::Result<QualityConfig> {
    let mut resolved = if let Some(config_path) = config {
        let json = std::fs::read_to_string(config_path)
            .map_err(|e| crate::Error::io(e, config_path))?;
        QualityConfig::from_json_str(&json)?
    } else {
        QualityConfig::by_name(preset).ok_or_else(|| {
            crate::Error::invalid_config(format!(
                "unknown preset '{}', available: {}",
                preset,
                QualityConfig::available_presets().join(", ")
            ))
        })?
    };

    for token in id_tokens {
        resolved.id_names = resolved.id_names.with_token(token.as_str());
    }
    Ok(resolved)
}

/// Print quality flags and the overall score.
pub(crate) fn cmd_quality(
    path: &Path,
    preset: &str,
    config: Option<&Path>,
    id_tokens: &[String],
    format: OutputFormat,
) -> crate::Result<()> {
    let config = resolve_config(preset, config, id_tokens)?;
    let dataset = load_dataset(path)?;
    let summary = summarize_dataset(&dataset)?;
    let missing = missing_table(&dataset)?;
    let flags = compute_quality_flags_with(&summary, &missing, &config)?;

    if format == OutputFormat::Json {
        let json = serde_json::json!({
            "path": path.display().to_string(),
            "config": config.name,
            "rows": dataset.len(),
            "columns": summary.n_cols,
            "flags": flags,
        });
        println!("{}", to_json(&json)?);
        return Ok(());
    }

    print_header("Data Quality", path);
    println!("Config: {}", config.name);
    println!("Rows: {}", summary.n_rows);
    println!("Columns: {}", summary.n_cols);
    println!();

    println!("Quality Score: {:.2}", flags.quality_score);
    println!();

    let mark = |on: bool| if on { "\u{2717}" } else { "\u{2713}" };
    println!(
        "{} Constant columns: {}",
        mark(flags.has_constant_columns),
        list_or_none(&flags.constant_columns)
    );
    println!(
        "{} Identifier columns with duplicates: {}",
        mark(flags.has_suspicious_id_duplicates),
        list_or_none(&flags.suspicious_id_columns)
    );
    println!(
        "{} High-cardinality text columns: {}",
        mark(flags.has_high_cardinality_categoricals),
        list_or_none(&flags.high_cardinality_columns)
    );
    println!();

    if flags.too_few_rows {
        println!("Note: only {} rows (fewer than {})", summary.n_rows, config.min_rows);
    }
    if flags.too_many_columns {
        println!(
            "Note: {} columns (more than {})",
            summary.n_cols, config.max_columns
        );
    }
    if flags.too_many_missing {
        println!(
            "Note: a column is {:.1}% missing (above {:.1}%)",
            flags.max_missing_share * 100.0,
            config.max_missing_share * 100.0
        );
    }

    Ok(())
}

fn list_or_none(columns: &[String]) -> String {
    if columns.is_empty() {
        "none".to_string()
    } else {
        columns.join(", ")
    }
}

fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        s.to_string()
    } else {
        let mut out: String = s.chars().take(width.saturating_sub(1)).collect();
        out.push('\u{2026}');
        out
    }
}
