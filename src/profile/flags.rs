//! Quality Flags
//!
//! Boolean data smells and the bounded quality score derived from a
//! [`DatasetSummary`] and a [`MissingTable`] of the same dataset.

use serde::Serialize;

use super::{
    column::DtypeKind,
    config::{IdNameRule, QualityConfig},
    missing::MissingTable,
    summary::{ColumnSummary, DatasetSummary},
};
use crate::error::{Error, Result};

/// Quality flags and score for one dataset
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QualityFlags {
    /// Some column holds a single distinct non-missing value
    pub has_constant_columns: bool,
    /// Some identifier candidate repeats a value
    pub has_suspicious_id_duplicates: bool,
    /// Some text column is nearly all distinct
    pub has_high_cardinality_categoricals: bool,
    /// Score in `[0, 1]`; 1 means no missing values and no flags
    pub quality_score: f64,
    /// Constant columns, in order
    pub constant_columns: Vec<String>,
    /// Identifier candidates with duplicates, in order
    pub suspicious_id_columns: Vec<String>,
    /// High-cardinality text columns, in order
    pub high_cardinality_columns: Vec<String>,
    /// Fewer rows than the configured minimum
    pub too_few_rows: bool,
    /// More columns than the configured maximum
    pub too_many_columns: bool,
    /// Largest per-column missing share
    pub max_missing_share: f64,
    /// `max_missing_share` above the configured limit
    pub too_many_missing: bool,
}

impl QualityFlags {
    /// Number of the three scored flags that are set.
    pub fn flag_count(&self) -> usize {
        [
            self.has_constant_columns,
            self.has_suspicious_id_duplicates,
            self.has_high_cardinality_categoricals,
        ]
        .iter()
        .filter(|f| **f)
        .count()
    }
}

/// Whether a column name looks like a row identifier under `rule`.
///
/// ```
/// use eda_cli::profile::{is_identifier_name, IdNameRule};
///
/// let rule = IdNameRule::default();
/// assert!(is_identifier_name("user_id", &rule));
/// assert!(is_identifier_name("CustomerID", &rule));
/// assert!(!is_identifier_name("paid", &rule));
/// ```
pub fn is_identifier_name(name: &str, rule: &IdNameRule) -> bool {
    name_tokens(name).iter().any(|t| rule.matches_token(t))
}

/// Split a column name into lowercase tokens.
fn name_tokens(name: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut prev_lower = false;

    for ch in name.chars() {
        if !ch.is_alphanumeric() {
            if !current.is_empty() {
                tokens.push(std::mem::take(&mut current));
            }
            prev_lower = false;
            continue;
        }
        if ch.is_uppercase() && prev_lower && !current.is_empty() {
            tokens.push(std::mem::take(&mut current));
        }
        prev_lower = ch.is_lowercase() || ch.is_ascii_digit();
        current.extend(ch.to_lowercase());
    }
    if !current.is_empty() {
        tokens.push(current);
    }
    tokens
}

/// Columns treated as identifiers: those with an identifier-like name, plus
/// the only non-numeric column whose distinct count is close to the row count.
fn identifier_candidates<'a>(
    summary: &'a DatasetSummary,
    config: &QualityConfig,
) -> Vec<&'a ColumnSummary> {
    let mut candidates: Vec<&ColumnSummary> = summary
        .columns
        .iter()
        .filter(|c| is_identifier_name(&c.name, &config.id_names))
        .collect();

    if summary.n_rows > 0 {
        let near_unique: Vec<&ColumnSummary> = summary
            .columns
            .iter()
            .filter(|c| !c.dtype_kind.is_numeric() && c.count > 0)
            .filter(|c| c.unique as f64 / summary.n_rows as f64 >= config.near_unique_ratio)
            .collect();
        if let [only] = near_unique.as_slice() {
            if !candidates.iter().any(|c| c.name == only.name) {
                candidates.push(*only);
            }
        }
    }

    candidates
}

fn is_high_cardinality(column: &ColumnSummary, config: &QualityConfig) -> bool {
    column.dtype_kind == DtypeKind::Categorical
        && column
            .unique_ratio()
            .is_some_and(|ratio| ratio > config.high_cardinality_ratio)
}

/// Check that `missing` describes the same dataset as `summary`.
fn check_consistent(summary: &DatasetSummary, missing: &MissingTable) -> Result<()> {
    if summary.n_rows != missing.n_rows {
        return Err(Error::inconsistent_input(format!(
            "summary has {} rows but missing table has {}",
            summary.n_rows, missing.n_rows
        )));
    }

    for column in &summary.columns {
        let entry = missing.get(&column.name).ok_or_else(|| {
            Error::inconsistent_input(format!(
                "missing table has no entry for column '{}'",
                column.name
            ))
        })?;
        if entry.missing_count != column.missing {
            return Err(Error::inconsistent_input(format!(
                "column '{}' has {} missing in the summary but {} in the missing table",
                column.name, column.missing, entry.missing_count
            )));
        }
    }

    Ok(())
}

/// Score from the three flags and the mean missing share.
pub fn quality_score(
    config: &QualityConfig,
    mean_missing_share: f64,
    has_constant_columns: bool,
    has_suspicious_id_duplicates: bool,
    has_high_cardinality_categoricals: bool,
) -> f64 {
    let penalty = |on: bool, weight: f64| if on { weight } else { 0.0 };

    let score = 1.0
        - config.missing_weight * mean_missing_share
        - penalty(has_constant_columns, config.constant_penalty)
        - penalty(has_suspicious_id_duplicates, config.id_duplicate_penalty)
        - penalty(
            has_high_cardinality_categoricals,
            config.high_cardinality_penalty,
        );

    score.clamp(0.0, 1.0)
}

/// Derive quality flags with the default [`QualityConfig`].
///
/// # Errors
///
/// Returns [`Error::InconsistentInput`] if `missing` lacks a column of
/// `summary` or disagrees with it.
pub fn compute_quality_flags(
    summary: &DatasetSummary,
    missing: &MissingTable,
) -> Result<QualityFlags> {
    compute_quality_flags_with(summary, missing, &QualityConfig::default())
}

/// Derive quality flags with an explicit config.
///
/// # Errors
///
/// Returns [`Error::InvalidConfig`] for a bad config and
/// [`Error::InconsistentInput`] if `missing` lacks a column of `summary` or
/// disagrees with it.
pub fn compute_quality_flags_with(
    summary: &DatasetSummary,
    missing: &MissingTable,
    config: &QualityConfig,
) -> Result<QualityFlags> {
    config.validate()?;
    check_consistent(summary, missing)?;

    let constant_columns: Vec<String> = summary
        .columns
        .iter()
        .filter(|c| c.is_constant())
        .map(|c| c.name.clone())
        .collect();

    let suspicious_id_columns: Vec<String> = identifier_candidates(summary, config)
        .into_iter()
        .filter(|c| c.has_duplicates())
        .map(|c| c.name.clone())
        .collect();

    let high_cardinality_columns: Vec<String> = summary
        .columns
        .iter()
        .filter(|c| is_high_cardinality(c, config))
        .map(|c| c.name.clone())
        .collect();

    let has_constant_columns = !constant_columns.is_empty();
    let has_suspicious_id_duplicates = !suspicious_id_columns.is_empty();
    let has_high_cardinality_categoricals = !high_cardinality_columns.is_empty();

    let quality_score = quality_score(
        config,
        missing.mean_missing_share(),
        has_constant_columns,
        has_suspicious_id_duplicates,
        has_high_cardinality_categoricals,
    );
    let max_missing_share = missing.max_missing_share();

    tracing::debug!(
        config = %config.name,
        has_constant_columns,
        has_suspicious_id_duplicates,
        has_high_cardinality_categoricals,
        quality_score,
        "computed quality flags"
    );

    Ok(QualityFlags {
        has_constant_columns,
        has_suspicious_id_duplicates,
        has_high_cardinality_categoricals,
        quality_score,
        constant_columns,
        suspicious_id_columns,
        high_cardinality_columns,
        too_few_rows: summary.n_rows < config.min_rows,
        too_many_columns: summary.n_cols > config.max_columns,
        max_missing_share,
        too_many_missing: max_missing_share > config.max_missing_share,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_tokens() {
        assert_eq!(name_tokens("user_id"), vec!["user", "id"]);
        assert_eq!(name_tokens("userId"), vec!["user", "id"]);
        assert_eq!(name_tokens("CustomerID"), vec!["customer", "id"]);
        assert_eq!(name_tokens("ID"), vec!["id"]);
        assert_eq!(name_tokens("row-uuid.v2"), vec!["row", "uuid", "v2"]);
        assert_eq!(name_tokens("  "), Vec::<String>::new());
    }

    #[test]
    fn test_identifier_names() {
        let rule = IdNameRule::default();
        for name in ["id", "ID", "user_id", "userId", "CustomerID", "row-uuid", "uid", "Identifier"] {
            assert!(is_identifier_name(name, &rule), "{} should match", name);
        }
        for name in ["paid", "valid", "width", "idea", "video", "amount"] {
            assert!(!is_identifier_name(name, &rule), "{} should not match", name);
        }
    }

    #[test]
    fn test_identifier_rule_custom_token() {
        let rule = IdNameRule::with_tokens(["KEY"]);
        assert!(is_identifier_name("order_key", &rule));
        assert!(!is_identifier_name("order_id", &rule));
    }

    #[test]
    fn test_quality_score_bounds_and_monotonicity() {
        let config = QualityConfig::default();
        assert!((quality_score(&config, 0.0, false, false, false) - 1.0).abs() < f64::EPSILON);

        let base = quality_score(&config, 0.2, false, false, false);
        assert!(quality_score(&config, 0.2, true, false, false) <= base);
        assert!(quality_score(&config, 0.2, false, true, false) <= base);
        assert!(quality_score(&config, 0.2, false, false, true) <= base);
        assert!(quality_score(&config, 0.4, false, false, false) <= base);

        let worst = quality_score(&config.with_missing_weight(10.0), 1.0, true, true, true);
        assert!((0.0..=1.0).contains(&worst));
        assert!(worst.abs() < f64::EPSILON);
    }
}
