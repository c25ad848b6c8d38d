//! Most frequent values of text and boolean columns.

use std::collections::HashMap;

use serde::Serialize;

use super::column::{read_column, DtypeKind};
use crate::{
    dataset::{ArrowDataset, Dataset},
    error::Result,
};

/// A value and how often it occurs
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    /// Display form of the value
    pub value: String,
    /// Occurrences among non-missing cells
    pub count: usize,
}

/// Top values of one column, most frequent first
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryTable {
    /// Column name
    pub column: String,
    /// At most `top_k` rows
    pub rows: Vec<CategoryCount>,
}

/// Top-value tables keyed by column, in dataset column order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TopCategoriesResult {
    tables: Vec<CategoryTable>,
}

impl TopCategoriesResult {
    /// Table for a column.
    pub fn get(&self, column: &str) -> Option<&CategoryTable> {
        self.tables.iter().find(|t| t.column == column)
    }

    /// Whether a table exists for `column`.
    pub fn contains(&self, column: &str) -> bool {
        self.get(column).is_some()
    }

    /// Tables in dataset column order.
    pub fn tables(&self) -> &[CategoryTable] {
        &self.tables
    }

    /// Number of tables.
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// Whether no column was processed.
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

/// Count values and keep the `top_k` most frequent; ties keep first-seen
/// order.
pub fn top_values<'a>(values: impl IntoIterator<Item = &'a str>, top_k: usize) -> Vec<CategoryCount> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<(&str, usize)> = Vec::new();

    for value in values {
        match index.get(value) {
            Some(&slot) => counts[slot].1 += 1,
            None => {
                index.insert(value, counts.len());
                counts.push((value, 1));
            }
        }
    }

    // stable: equal counts stay in first-seen order
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.truncate(top_k);

    counts
        .into_iter()
        .map(|(value, count)| CategoryCount {
            value: value.to_string(),
            count,
        })
        .collect()
}

/// Top `top_k` values for the first `max_columns` text or boolean columns.
///
/// A zero limit yields an empty result.
///
/// # Errors
///
/// Returns [`crate::Error::InvalidInput`] if the dataset is not rectangular
/// or has duplicate column names.
pub fn top_categories(
    dataset: &ArrowDataset,
    max_columns: usize,
    top_k: usize,
) -> Result<TopCategoriesResult> {
    dataset.validate_shape()?;

    if max_columns == 0 || top_k == 0 {
        return Ok(TopCategoriesResult::default());
    }

    let schema = dataset.schema();
    let eligible: Vec<usize> = schema
        .fields()
        .iter()
        .enumerate()
        .filter(|(_, f)| {
            matches!(
                DtypeKind::from_data_type(f.data_type()),
                DtypeKind::Categorical | DtypeKind::Boolean
            )
        })
        .map(|(i, _)| i)
        .take(max_columns)
        .collect();

    let tables = eligible
        .into_iter()
        .map(|index| {
            let column = read_column(dataset, index)?;
            Ok(CategoryTable {
                column: column.name().to_string(),
                rows: top_values(column.present(), top_k),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    tracing::debug!(columns = tables.len(), top_k, "extracted top categories");

    Ok(TopCategoriesResult { tables })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_top_values_order_and_ties() {
        let rows = top_values(["b", "a", "c", "a", "c", "d"], 3);
        let got: Vec<(&str, usize)> = rows.iter().map(|r| (r.value.as_str(), r.count)).collect();
        assert_eq!(got, vec![("a", 2), ("c", 2), ("b", 1)]);
    }

    #[test]
    fn test_top_values_zero_k() {
        assert!(top_values(["a", "b"], 0).is_empty());
    }

    #[test]
    fn test_top_values_fewer_than_k() {
        let rows = top_values(["x", "x"], 5);
        assert_eq!(rows, vec![CategoryCount { value: "x".into(), count: 2 }]);
    }
}
