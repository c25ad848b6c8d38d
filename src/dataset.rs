//! Dataset types for eda-cli.
//!
//! Provides the [`Dataset`] trait and [`ArrowDataset`] implementation
//! for working with Arrow-based tabular data. The profiling functions only
//! read from a dataset; loading is the caller's job.

use std::{collections::HashSet, path::Path, sync::Arc};

use arrow::{
    array::{ArrayRef, RecordBatch},
    datatypes::{Field, Schema, SchemaRef},
};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use crate::error::{Error, Result};

/// A read-only table that can be iterated batch by batch.
///
/// All implementations must be thread-safe (Send + Sync) so that independent
/// profiling calls can share one snapshot.
pub trait Dataset: Send + Sync {
    /// Returns the total number of rows in the dataset.
    fn len(&self) -> usize;

    /// Returns true if the dataset contains no rows.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the schema of the dataset.
    fn schema(&self) -> SchemaRef;

    /// Returns an iterator over all RecordBatches in the dataset.
    fn iter(&self) -> Box<dyn Iterator<Item = &RecordBatch> + Send + '_>;

    /// Returns the number of batches in the dataset.
    fn num_batches(&self) -> usize;

    /// Returns a specific batch by index.
    fn get_batch(&self, index: usize) -> Option<&RecordBatch>;
}

/// An in-memory dataset backed by Arrow RecordBatches.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
///
/// use arrow::array::{ArrayRef, Int64Array, StringArray};
/// use eda_cli::{ArrowDataset, Dataset};
///
/// let dataset = ArrowDataset::from_columns(vec![
///     ("age", Arc::new(Int64Array::from(vec![Some(10), None])) as ArrayRef),
///     ("city", Arc::new(StringArray::from(vec!["A", "B"])) as ArrayRef),
/// ])
/// .unwrap();
/// assert_eq!(dataset.len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct ArrowDataset {
    batches: Vec<RecordBatch>,
    schema: SchemaRef,
    row_count: usize,
}

impl ArrowDataset {
    /// Creates a new ArrowDataset from a vector of RecordBatches.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The batches vector is empty (use [`ArrowDataset::with_schema`] to
    ///   build a dataset without batches)
    /// - The batches have inconsistent schemas
    pub fn new(batches: Vec<RecordBatch>) -> Result<Self> {
        let Some(first) = batches.first() else {
            return Err(Error::invalid_input(
                "no record batches given; the schema cannot be determined",
            ));
        };
        let schema = first.schema();
        Self::with_schema(schema, batches)
    }

    /// Creates an ArrowDataset with an explicit schema and zero or more
    /// batches.
    ///
    /// # Errors
    ///
    /// Returns an error if any batch does not match `schema`.
    pub fn with_schema(schema: SchemaRef, batches: Vec<RecordBatch>) -> Result<Self> {
        for (i, batch) in batches.iter().enumerate() {
            if batch.schema() != schema {
                return Err(Error::invalid_input(format!(
                    "batch {} has a different schema than the dataset",
                    i
                )));
            }
        }

        let row_count = batches.iter().map(|b| b.num_rows()).sum();

        Ok(Self {
            batches,
            schema,
            row_count,
        })
    }

    /// Creates a dataset with the given schema and no rows.
    pub fn empty(schema: SchemaRef) -> Self {
        Self {
            batches: Vec::new(),
            schema,
            row_count: 0,
        }
    }

    /// Creates an ArrowDataset from a single RecordBatch.
    ///
    /// # Errors
    ///
    /// Infallible for a well-formed batch; kept fallible for symmetry with
    /// [`ArrowDataset::new`].
    pub fn from_batch(batch: RecordBatch) -> Result<Self> {
        Self::new(vec![batch])
    }

    /// Builds a single-batch dataset from named columns.
    ///
    /// Every column is declared nullable.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if the columns differ in length.
    pub fn from_columns<N: Into<String>>(columns: Vec<(N, ArrayRef)>) -> Result<Self> {
        let mut fields = Vec::with_capacity(columns.len());
        let mut arrays = Vec::with_capacity(columns.len());
        let mut expected_len: Option<usize> = None;

        for (name, array) in columns {
            let name = name.into();
            match expected_len {
                Some(len) if len != array.len() => {
                    return Err(Error::invalid_input(format!(
                        "column '{}' has {} rows, expected {}",
                        name,
                        array.len(),
                        len
                    )));
                }
                Some(_) => {}
                None => expected_len = Some(array.len()),
            }
            fields.push(Field::new(name, array.data_type().clone(), true));
            arrays.push(array);
        }

        let schema = Arc::new(Schema::new(fields));
        if arrays.is_empty() {
            return Ok(Self::empty(schema));
        }
        let batch = RecordBatch::try_new(Arc::clone(&schema), arrays)?;
        Self::with_schema(schema, vec![batch])
    }

    /// Loads a dataset from a Parquet file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or is not valid
    /// Parquet.
    pub fn from_parquet(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|e| Error::io(e, path))?;

        let builder = ParquetRecordBatchReaderBuilder::try_new(file).map_err(Error::Parquet)?;
        let schema = Arc::clone(builder.schema());
        let reader = builder.build().map_err(Error::Parquet)?;

        let batches: Vec<RecordBatch> = reader
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Error::Arrow)?;

        Self::with_schema(schema, batches)
    }

    /// Loads a dataset from a CSV file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or is not valid CSV.
    pub fn from_csv(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_csv_with_options(path, CsvOptions::default())
    }

    /// Loads a dataset from a CSV file with options.
    ///
    /// A file that holds only a header row loads as a zero-row dataset.
    ///
    /// # Errors
    ///
    /// Returns an error if parsing fails.
    pub fn from_csv_with_options(path: impl AsRef<Path>, options: CsvOptions) -> Result<Self> {
        use std::io::{BufReader, Seek, SeekFrom};

        use arrow_csv::{reader::Format, ReaderBuilder};

        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|e| Error::io(e, path))?;
        let mut buf_reader = BufReader::new(file);

        let schema = if let Some(schema) = options.schema {
            Arc::new(schema)
        } else {
            let mut format = Format::default().with_header(options.has_header);
            if let Some(delim) = options.delimiter {
                format = format.with_delimiter(delim);
            }
            let (inferred, _) = format
                .infer_schema(&mut buf_reader, options.infer_rows)
                .map_err(Error::Arrow)?;

            buf_reader
                .seek(SeekFrom::Start(0))
                .map_err(|e| Error::io(e, path))?;

            Arc::new(inferred)
        };

        let mut builder = ReaderBuilder::new(Arc::clone(&schema))
            .with_batch_size(options.batch_size)
            .with_header(options.has_header);

        if let Some(delim) = options.delimiter {
            builder = builder.with_delimiter(delim);
        }

        let reader = builder.build(buf_reader).map_err(Error::Arrow)?;

        let batches: Vec<RecordBatch> = reader
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Error::Arrow)?;

        Self::with_schema(schema, batches)
    }

    /// Loads a dataset from a CSV string with a header row.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not valid CSV.
    pub fn from_csv_str(data: &str) -> Result<Self> {
        use std::io::Cursor;

        use arrow_csv::{reader::Format, ReaderBuilder};

        let mut cursor_for_infer = Cursor::new(data.as_bytes());
        let format = Format::default().with_header(true);
        let (inferred, _) = format
            .infer_schema(&mut cursor_for_infer, Some(1000))
            .map_err(Error::Arrow)?;

        let schema = Arc::new(inferred);
        let cursor = Cursor::new(data.as_bytes());

        let reader = ReaderBuilder::new(Arc::clone(&schema))
            .with_batch_size(8192)
            .with_header(true)
            .build(cursor)
            .map_err(Error::Arrow)?;

        let batches: Vec<RecordBatch> = reader
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Error::Arrow)?;

        Self::with_schema(schema, batches)
    }

    /// Loads a dataset from a JSON Lines (JSONL) file.
    ///
    /// Each line in the file should be a valid JSON object representing a row.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or parsed.
    pub fn from_json(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_json_with_options(path, JsonOptions::default())
    }

    /// Loads a dataset from a JSON Lines file with options.
    ///
    /// # Errors
    ///
    /// Returns an error if parsing fails.
    pub fn from_json_with_options(path: impl AsRef<Path>, options: JsonOptions) -> Result<Self> {
        use std::io::BufReader;

        use arrow_json::ReaderBuilder;

        let path = path.as_ref();

        let schema = if let Some(schema) = options.schema {
            Arc::new(schema)
        } else {
            let infer_file = std::fs::File::open(path).map_err(|e| Error::io(e, path))?;
            let infer_reader = BufReader::new(infer_file);
            let (inferred, _) =
                arrow_json::reader::infer_json_schema(infer_reader, options.infer_rows)
                    .map_err(Error::Arrow)?;
            Arc::new(inferred)
        };

        let file = std::fs::File::open(path).map_err(|e| Error::io(e, path))?;
        let buf_reader = BufReader::new(file);

        let reader = ReaderBuilder::new(Arc::clone(&schema))
            .with_batch_size(options.batch_size)
            .build(buf_reader)
            .map_err(Error::Arrow)?;

        let batches: Vec<RecordBatch> = reader
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Error::Arrow)?;

        Self::with_schema(schema, batches)
    }

    /// Loads a dataset from a JSON Lines string.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not valid JSON Lines.
    pub fn from_json_str(data: &str) -> Result<Self> {
        use std::io::Cursor;

        use arrow_json::ReaderBuilder;

        let cursor_for_infer = Cursor::new(data.as_bytes());
        let (inferred, _) = arrow_json::reader::infer_json_schema(cursor_for_infer, Some(1000))
            .map_err(Error::Arrow)?;

        let schema = Arc::new(inferred);
        let cursor = Cursor::new(data.as_bytes());

        let reader = ReaderBuilder::new(Arc::clone(&schema))
            .with_batch_size(8192)
            .build(cursor)
            .map_err(Error::Arrow)?;

        let batches: Vec<RecordBatch> = reader
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Error::Arrow)?;

        Self::with_schema(schema, batches)
    }

    /// Returns the underlying batches.
    pub fn batches(&self) -> &[RecordBatch] {
        &self.batches
    }

    /// Returns the column names in schema order.
    pub fn column_names(&self) -> Vec<&str> {
        self.schema
            .fields()
            .iter()
            .map(|f| f.name().as_str())
            .collect()
    }

    /// Checks that the dataset is a proper rectangular table with unique
    /// column names.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] on a duplicate column name or a batch
    /// whose columns disagree in length with the batch row count.
    pub fn validate_shape(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for field in self.schema.fields() {
            if !seen.insert(field.name().as_str()) {
                return Err(Error::invalid_input(format!(
                    "duplicate column name '{}'",
                    field.name()
                )));
            }
        }

        for (batch_idx, batch) in self.batches.iter().enumerate() {
            if batch.num_columns() != self.schema.fields().len() {
                return Err(Error::invalid_input(format!(
                    "batch {} has {} columns, expected {}",
                    batch_idx,
                    batch.num_columns(),
                    self.schema.fields().len()
                )));
            }
            for (col_idx, column) in batch.columns().iter().enumerate() {
                if column.len() != batch.num_rows() {
                    return Err(Error::invalid_input(format!(
                        "column '{}' in batch {} has {} rows, expected {}",
                        self.schema.field(col_idx).name(),
                        batch_idx,
                        column.len(),
                        batch.num_rows()
                    )));
                }
            }
        }

        Ok(())
    }
}

impl Dataset for ArrowDataset {
    fn len(&self) -> usize {
        self.row_count
    }

    fn schema(&self) -> SchemaRef {
        Arc::clone(&self.schema)
    }

    fn iter(&self) -> Box<dyn Iterator<Item = &RecordBatch> + Send + '_> {
        Box::new(self.batches.iter())
    }

    fn num_batches(&self) -> usize {
        self.batches.len()
    }

    fn get_batch(&self, index: usize) -> Option<&RecordBatch> {
        self.batches.get(index)
    }
}

/// Options for CSV parsing.
#[derive(Debug, Clone)]
pub struct CsvOptions {
    /// Whether the CSV file has a header row.
    pub has_header: bool,
    /// Delimiter character (default is comma).
    pub delimiter: Option<u8>,
    /// Batch size for reading.
    pub batch_size: usize,
    /// Number of records sampled for schema inference (`None` reads all).
    pub infer_rows: Option<usize>,
    /// Optional schema (inferred if not provided).
    pub schema: Option<Schema>,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            has_header: true,
            delimiter: None,
            batch_size: 8192,
            infer_rows: Some(1000),
            schema: None,
        }
    }
}

impl CsvOptions {
    /// Creates new CSV options with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether the file has a header row.
    #[must_use]
    pub fn with_header(mut self, has_header: bool) -> Self {
        self.has_header = has_header;
        self
    }

    /// Sets the delimiter character.
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = Some(delimiter);
        self
    }

    /// Sets the batch size for reading.
    #[must_use]
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Sets how many records are sampled for schema inference.
    #[must_use]
    pub fn with_infer_rows(mut self, rows: Option<usize>) -> Self {
        self.infer_rows = rows;
        self
    }

    /// Sets the schema for parsing.
    #[must_use]
    pub fn with_schema(mut self, schema: Schema) -> Self {
        self.schema = Some(schema);
        self
    }
}

/// Options for JSON/JSONL parsing.
#[derive(Debug, Clone)]
pub struct JsonOptions {
    /// Batch size for reading.
    pub batch_size: usize,
    /// Number of records sampled for schema inference (`None` reads all).
    pub infer_rows: Option<usize>,
    /// Optional schema (inferred if not provided).
    pub schema: Option<Schema>,
}

impl Default for JsonOptions {
    fn default() -> Self {
        Self {
            batch_size: 8192,
            infer_rows: Some(1000),
            schema: None,
        }
    }
}

impl JsonOptions {
    /// Creates new JSON options with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the batch size for reading.
    #[must_use]
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Sets the schema for parsing.
    #[must_use]
    pub fn with_schema(mut self, schema: Schema) -> Self {
        self.schema = Some(schema);
        self
    }
}
