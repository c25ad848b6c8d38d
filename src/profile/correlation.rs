//! Pearson correlation between numeric columns.

use serde::Serialize;

use super::column::{read_numbers, DtypeKind};
use crate::{
    dataset::{ArrowDataset, Dataset},
    error::Result,
};

/// Square matrix of Pearson coefficients over the numeric columns.
///
/// Entries are NaN where a coefficient is undefined: a column with zero
/// variance, or fewer than two rows where both values are present.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationMatrix {
    columns: Vec<String>,
    values: Vec<Vec<f64>>,
}

/// One off-diagonal entry of a [`CorrelationMatrix`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationPair {
    /// First column
    pub left: String,
    /// Second column
    pub right: String,
    /// Pearson coefficient
    pub r: f64,
}

impl CorrelationMatrix {
    /// Matrix with no columns.
    pub fn empty() -> Self {
        Self {
            columns: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Row/column labels in dataset order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Matrix rows.
    pub fn rows(&self) -> &[Vec<f64>] {
        &self.values
    }

    /// Number of rows (and columns).
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Whether the matrix is zero by zero.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Coefficient by column names.
    pub fn get(&self, row: &str, col: &str) -> Option<f64> {
        let i = self.position(row)?;
        let j = self.position(col)?;
        Some(self.values[i][j])
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Off-diagonal pairs with `|r| >= threshold`, strongest first.
    pub fn strong_pairs(&self, threshold: f64) -> Vec<CorrelationPair> {
        let mut pairs = Vec::new();
        for i in 0..self.len() {
            for j in (i + 1)..self.len() {
                let r = self.values[i][j];
                if !r.is_nan() && r.abs() >= threshold {
                    pairs.push(CorrelationPair {
                        left: self.columns[i].clone(),
                        right: self.columns[j].clone(),
                        r,
                    });
                }
            }
        }
        pairs.sort_by(|a, b| b.r.abs().total_cmp(&a.r.abs()));
        pairs
    }
}

/// Pearson coefficient over the rows where both values are present.
pub fn pearson(x: &[Option<f64>], y: &[Option<f64>]) -> f64 {
    let (xs, ys): (Vec<f64>, Vec<f64>) = x
        .iter()
        .zip(y)
        .filter_map(|(a, b)| Some(((*a)?, (*b)?)))
        .unzip();

    if xs.len() < 2 || is_constant(&xs) || is_constant(&ys) {
        return f64::NAN;
    }

    let n = xs.len() as f64;
    let mean_x = xs.iter().sum::<f64>() / n;
    let mean_y = ys.iter().sum::<f64>() / n;

    let mut sxy = 0.0;
    let mut sxx = 0.0;
    let mut syy = 0.0;
    for (a, b) in xs.iter().zip(&ys) {
        let dx = a - mean_x;
        let dy = b - mean_y;
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }

    let denom = (sxx * syy).sqrt();
    if denom == 0.0 || !denom.is_finite() {
        return f64::NAN;
    }
    (sxy / denom).clamp(-1.0, 1.0)
}

fn is_constant(values: &[f64]) -> bool {
    values.windows(2).all(|w| w[0] == w[1])
}

/// Pairwise Pearson correlations of the numeric columns.
///
/// Fewer than two numeric columns yields an empty matrix.
///
/// # Errors
///
/// Returns [`crate::Error::InvalidInput`] if the dataset is not rectangular
/// or has duplicate column names.
pub fn correlation_matrix(dataset: &ArrowDataset) -> Result<CorrelationMatrix> {
    dataset.validate_shape()?;

    let schema = dataset.schema();
    let numeric: Vec<(usize, String)> = schema
        .fields()
        .iter()
        .enumerate()
        .filter(|(_, f)| DtypeKind::from_data_type(f.data_type()).is_numeric())
        .map(|(i, f)| (i, f.name().clone()))
        .collect();

    if numeric.len() < 2 {
        tracing::debug!(numeric_columns = numeric.len(), "too few numeric columns to correlate");
        return Ok(CorrelationMatrix::empty());
    }

    let series = numeric
        .iter()
        .map(|(index, _)| read_numbers(dataset, *index))
        .collect::<Result<Vec<_>>>()?;

    let k = series.len();
    let mut values = vec![vec![f64::NAN; k]; k];
    for i in 0..k {
        values[i][i] = if pearson(&series[i], &series[i]).is_nan() {
            f64::NAN
        } else {
            1.0
        };
        for j in (i + 1)..k {
            let r = pearson(&series[i], &series[j]);
            values[i][j] = r;
            values[j][i] = r;
        }
    }

    tracing::debug!(numeric_columns = k, "computed correlation matrix");

    Ok(CorrelationMatrix {
        columns: numeric.into_iter().map(|(_, name)| name).collect(),
        values,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pearson_perfect() {
        let x = [Some(1.0), Some(2.0), Some(3.0), Some(4.0)];
        let y = [Some(2.0), Some(4.0), Some(6.0), Some(8.0)];
        let z = [Some(4.0), Some(3.0), Some(2.0), Some(1.0)];
        assert!((pearson(&x, &y) - 1.0).abs() < 1e-12);
        assert!((pearson(&x, &z) + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_pearson_skips_incomplete_rows() {
        let x = [Some(1.0), None, Some(3.0), Some(4.0)];
        let y = [Some(1.0), Some(100.0), Some(3.0), Some(4.0)];
        assert!((pearson(&x, &y) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_pearson_undefined() {
        let constant = [Some(0.1), Some(0.1), Some(0.1)];
        let varying = [Some(1.0), Some(2.0), Some(3.0)];
        assert!(pearson(&constant, &varying).is_nan());
        assert!(pearson(&[Some(1.0)], &[Some(2.0)]).is_nan());
        assert!(pearson(&[None, Some(1.0)], &[Some(1.0), None]).is_nan());
    }

    #[test]
    fn test_strong_pairs_ordering() {
        let matrix = CorrelationMatrix {
            columns: vec!["a".into(), "b".into(), "c".into()],
            values: vec![
                vec![1.0, 0.5, -0.9],
                vec![0.5, 1.0, f64::NAN],
                vec![-0.9, f64::NAN, 1.0],
            ],
        };
        let pairs = matrix.strong_pairs(0.4);
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[0].right, "c");
        assert!((pairs[0].r + 0.9).abs() < 1e-12);
        assert_eq!(matrix.get("b", "a"), Some(0.5));
        assert_eq!(matrix.get("a", "zzz"), None);
    }
}
