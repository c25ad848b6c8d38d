//! Error types for eda-cli.

use std::path::PathBuf;

/// Result type alias for eda-cli operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading or profiling a dataset.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The dataset does not have the expected rectangular shape.
    #[error("Invalid input: {message}")]
    InvalidInput {
        /// Description of the shape violation.
        message: String,
    },

    /// A dataset summary and a missing-value table do not describe the
    /// same dataset.
    #[error("Inconsistent input: {message}")]
    InconsistentInput {
        /// Description of the mismatch.
        message: String,
    },

    /// I/O error during file operations.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        /// The path where the error occurred, if known.
        path: Option<PathBuf>,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Arrow error during data processing.
    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    /// Parquet error during file loading.
    #[error("Parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    /// Column not found in schema.
    #[error("Column '{name}' not found in schema")]
    ColumnNotFound {
        /// The name of the missing column.
        name: String,
    },

    /// Invalid configuration.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// Description of the configuration error.
        message: String,
    },

    /// Unsupported file format.
    #[error("Unsupported format: {format}")]
    UnsupportedFormat {
        /// The unsupported format name or extension.
        format: String,
    },

    /// Output formatting error.
    #[error("Format error: {0}")]
    Format(String),
}

impl Error {
    /// Create an invalid input error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Create an inconsistent input error.
    pub fn inconsistent_input(message: impl Into<String>) -> Self {
        Self::InconsistentInput {
            message: message.into(),
        }
    }

    /// Create an I/O error with a path context.
    pub fn io(source: std::io::Error, path: impl Into<PathBuf>) -> Self {
        Self::Io {
            path: Some(path.into()),
            source,
        }
    }

    /// Create a column not found error.
    pub fn column_not_found(name: impl Into<String>) -> Self {
        Self::ColumnNotFound { name: name.into() }
    }

    /// Create an invalid configuration error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create an unsupported format error.
    pub fn unsupported_format(format: impl Into<String>) -> Self {
        Self::UnsupportedFormat {
            format: format.into(),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self::Format(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input() {
        let err = Error::invalid_input("column 'b' has 3 rows, expected 4");
        assert!(matches!(err, Error::InvalidInput { .. }));
        assert!(err.to_string().contains("column 'b' has 3 rows"));
    }

    #[test]
    fn test_inconsistent_input() {
        let err = Error::inconsistent_input("no missing entry for 'age'");
        assert!(matches!(err, Error::InconsistentInput { .. }));
        assert!(err.to_string().contains("'age'"));
    }

    #[test]
    fn test_io_error_with_path() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = Error::io(io_err, "/path/to/file.csv");
        assert!(err.to_string().contains("/path/to/file.csv"));
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_column_not_found() {
        let err = Error::column_not_found("my_column");
        assert!(err.to_string().contains("my_column"));
    }

    #[test]
    fn test_invalid_config() {
        let err = Error::invalid_config("missing_weight must be finite");
        assert!(err.to_string().contains("missing_weight must be finite"));
    }

    #[test]
    fn test_unsupported_format() {
        let err = Error::unsupported_format("xlsx");
        assert!(err.to_string().contains("xlsx"));
    }

    #[test]
    fn test_from_serde_json() {
        let parse: std::result::Result<serde_json::Value, _> = serde_json::from_str("{not json");
        let err: Error = parse.err().map(Error::from).unwrap_or_else(|| panic!("expected error"));
        assert!(matches!(err, Error::Format(_)));
    }
}
