//! Column Reader
//!
//! Reads one column across every record batch, classifies its kind once and
//! applies the missing-value rule shared by all profilers: a cell is missing
//! when Arrow marks it null, or when it is NaN in a numeric column.

use std::fmt;

use arrow::{
    array::{Array, AsArray},
    compute::cast,
    datatypes::{DataType, Float64Type},
    util::display::{ArrayFormatter, FormatOptions},
};
use serde::{Deserialize, Serialize};

use crate::{
    dataset::{ArrowDataset, Dataset},
    error::{Error, Result},
};

/// Coarse column type used by every profiling heuristic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DtypeKind {
    /// Integer, unsigned, floating-point or decimal values
    Numeric,
    /// Text values
    Categorical,
    /// True/false values
    Boolean,
    /// Temporal, binary, nested or null-typed values
    Other,
}

impl DtypeKind {
    /// Classify an Arrow data type.
    #[must_use]
    pub fn from_data_type(data_type: &DataType) -> Self {
        match data_type {
            DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Float16
            | DataType::Float32
            | DataType::Float64
            | DataType::Decimal128(_, _)
            | DataType::Decimal256(_, _) => Self::Numeric,
            DataType::Utf8 | DataType::LargeUtf8 | DataType::Utf8View => Self::Categorical,
            DataType::Boolean => Self::Boolean,
            DataType::Dictionary(_, value_type) => Self::from_data_type(value_type),
            _ => Self::Other,
        }
    }

    /// Whether descriptive statistics and correlations apply.
    #[must_use]
    pub fn is_numeric(self) -> bool {
        self == Self::Numeric
    }

    /// Lowercase name used in tables and JSON.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Numeric => "numeric",
            Self::Categorical => "categorical",
            Self::Boolean => "boolean",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for DtypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Equality key of a present cell.
///
/// Floats compare by value, so `0.0` and `-0.0` are one key. Every other
/// type compares by its display form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum CellKey<'a> {
    Float(u64),
    Text(&'a str),
}

/// All cells of one column, materialized once.
///
/// `cells[i]` is `None` exactly when row `i` is missing; otherwise it holds
/// the display form of the value.
#[derive(Debug, Clone)]
pub struct ColumnValues {
    name: String,
    data_type: DataType,
    kind: DtypeKind,
    cells: Vec<Option<String>>,
    numbers: Option<Vec<Option<f64>>>,
}

impl ColumnValues {
    /// Column name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Arrow storage type.
    pub fn data_type(&self) -> &DataType {
        &self.data_type
    }

    /// Classified kind.
    pub fn kind(&self) -> DtypeKind {
        self.kind
    }

    /// Number of rows, missing included.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the column has no rows.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Row cells; `None` marks a missing value.
    pub fn cells(&self) -> &[Option<String>] {
        &self.cells
    }

    /// Iterator over the non-missing cells in row order.
    pub fn present(&self) -> impl Iterator<Item = &str> + '_ {
        self.cells.iter().filter_map(|c| c.as_deref())
    }

    /// Non-missing cells in row order, each with its equality key.
    pub(crate) fn present_keyed(&self) -> impl Iterator<Item = (CellKey<'_>, &str)> + '_ {
        let floats = self.numbers.as_deref().filter(|_| is_float(&self.data_type));
        self.cells.iter().enumerate().filter_map(move |(row, cell)| {
            let text = cell.as_deref()?;
            let key = match floats.and_then(|numbers| numbers.get(row).copied().flatten()) {
                // adding 0.0 folds -0.0 into 0.0
                Some(x) => CellKey::Float((x + 0.0).to_bits()),
                None => CellKey::Text(text),
            };
            Some((key, text))
        })
    }

    /// Numeric view of the column, present only for numeric kinds.
    pub fn numbers(&self) -> Option<&[Option<f64>]> {
        self.numbers.as_deref()
    }
}

fn is_float(data_type: &DataType) -> bool {
    match data_type {
        DataType::Float16 | DataType::Float32 | DataType::Float64 => true,
        DataType::Dictionary(_, value_type) => is_float(value_type),
        _ => false,
    }
}

/// Read every column of the dataset in schema order.
///
/// # Errors
///
/// Returns [`Error::InvalidInput`] if the dataset is not rectangular or has
/// duplicate column names.
pub fn read_columns(dataset: &ArrowDataset) -> Result<Vec<ColumnValues>> {
    dataset.validate_shape()?;
    (0..dataset.schema().fields().len())
        .map(|index| read_column(dataset, index))
        .collect()
}

/// Read a single column by position.
///
/// # Errors
///
/// Returns an error if `index` is out of range or the column cannot be
/// rendered.
pub fn read_column(dataset: &ArrowDataset, index: usize) -> Result<ColumnValues> {
    let schema = dataset.schema();
    let field = schema
        .fields()
        .get(index)
        .ok_or_else(|| Error::column_not_found(format!("#{}", index)))?;
    let kind = DtypeKind::from_data_type(field.data_type());

    let numbers = if kind.is_numeric() {
        Some(read_numbers(dataset, index)?)
    } else {
        None
    };

    let options = FormatOptions::default();
    let mut cells: Vec<Option<String>> = Vec::with_capacity(dataset.len());

    for batch in dataset.iter() {
        let array = batch.column(index);
        let nulls = array.logical_nulls();
        let formatter = ArrayFormatter::try_new(array.as_ref(), &options)?;

        for row in 0..array.len() {
            let global = cells.len();
            let missing = nulls.as_ref().is_some_and(|n| n.is_null(row))
                || numbers
                    .as_ref()
                    .is_some_and(|values| values.get(global).is_some_and(Option::is_none));
            cells.push((!missing).then(|| formatter.value(row).to_string()));
        }
    }

    tracing::trace!(column = %field.name(), kind = %kind, rows = cells.len(), "read column");

    Ok(ColumnValues {
        name: field.name().clone(),
        data_type: field.data_type().clone(),
        kind,
        cells,
        numbers,
    })
}

/// Read a numeric column as `f64`, mapping nulls and NaN to `None`.
pub(crate) fn read_numbers(dataset: &ArrowDataset, index: usize) -> Result<Vec<Option<f64>>> {
    let mut out = Vec::with_capacity(dataset.len());
    for batch in dataset.iter() {
        let floats = cast(batch.column(index), &DataType::Float64)?;
        let floats = floats.as_primitive::<Float64Type>();
        out.extend(floats.iter().map(|v| v.filter(|x| !x.is_nan())));
    }
    Ok(out)
}

/// Count missing cells in one column without rendering values.
pub(crate) fn count_missing(dataset: &ArrowDataset, index: usize) -> Result<usize> {
    let schema = dataset.schema();
    let field = schema
        .fields()
        .get(index)
        .ok_or_else(|| Error::column_not_found(format!("#{}", index)))?;

    if DtypeKind::from_data_type(field.data_type()).is_numeric() {
        return Ok(read_numbers(dataset, index)?
            .iter()
            .filter(|v| v.is_none())
            .count());
    }

    Ok(dataset
        .iter()
        .map(|batch| {
            batch
                .column(index)
                .logical_nulls()
                .map_or(0, |nulls| nulls.null_count())
        })
        .sum())
}
