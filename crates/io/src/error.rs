//! Error types for hytrend-io.

use std::path::PathBuf;

/// Error type for all fallible operations in the hytrend-io crate.
///
/// Covers file-system failures, CSV and Parquet decoding, malformed dates
/// and values, and schema problems in series or parameter files. A basin
/// that no source knows about is not an error: the loader reports it as
/// `Ok(None)`.
#[derive(Debug, thiserror::Error)]
pub enum IoError {
    /// Returned when a required file does not exist on disk.
    #[error("file not found: {}", path.display())]
    FileNotFound {
        /// Path that could not be found.
        path: PathBuf,
    },

    /// Wraps an operating-system I/O failure.
    #[error("i/o error on {}: {reason}", path.display())]
    Io {
        /// File or directory being accessed.
        path: PathBuf,
        /// Description of the failure.
        reason: String,
    },

    /// Wraps an error originating from the csv crate.
    #[error("csv error: {reason}")]
    Csv {
        /// Description of the underlying CSV failure.
        reason: String,
    },

    /// Wraps an error originating from the Parquet or Arrow libraries.
    #[error("parquet error: {reason}")]
    Parquet {
        /// Description of the underlying Parquet failure.
        reason: String,
    },

    /// Wraps an error originating from hytrend-calendar.
    #[error("calendar error: {reason}")]
    Calendar {
        /// Description of the underlying calendar failure.
        reason: String,
    },

    /// Wraps an error originating from hytrend-params.
    #[error("parameter table error: {reason}")]
    Params {
        /// Description of the underlying table failure.
        reason: String,
    },

    /// Returned when one or more validation checks fail.
    #[error("{count} validation error(s): {details}")]
    Validation {
        /// Number of accumulated validation failures.
        count: usize,
        /// Human-readable summary of the failures.
        details: String,
    },

    /// Returned when a required column is not present in a file.
    #[error("column '{name}' not found in {}", path.display())]
    MissingColumn {
        /// Name of the missing column.
        name: String,
        /// Path to the file that was inspected.
        path: PathBuf,
    },

    /// Returned when a date field cannot be parsed.
    #[error("invalid date '{value}' at row {row} of {}", path.display())]
    InvalidDate {
        /// The rejected text.
        value: String,
        /// 1-based data row.
        row: usize,
        /// File being read.
        path: PathBuf,
    },

    /// Returned when a numeric field cannot be parsed.
    #[error("invalid value '{value}' in column '{column}' at row {row} of {}", path.display())]
    InvalidValue {
        /// The rejected text.
        value: String,
        /// Column of the field.
        column: String,
        /// 1-based data row.
        row: usize,
        /// File being read.
        path: PathBuf,
    },
}

impl From<csv::Error> for IoError {
    fn from(e: csv::Error) -> Self {
        IoError::Csv {
            reason: e.to_string(),
        }
    }
}

impl From<parquet::errors::ParquetError> for IoError {
    fn from(e: parquet::errors::ParquetError) -> Self {
        IoError::Parquet {
            reason: e.to_string(),
        }
    }
}

impl From<arrow::error::ArrowError> for IoError {
    fn from(e: arrow::error::ArrowError) -> Self {
        IoError::Parquet {
            reason: e.to_string(),
        }
    }
}

impl From<hytrend_calendar::CalendarError> for IoError {
    fn from(e: hytrend_calendar::CalendarError) -> Self {
        IoError::Calendar {
            reason: e.to_string(),
        }
    }
}

impl From<hytrend_params::ParamsError> for IoError {
    fn from(e: hytrend_params::ParamsError) -> Self {
        IoError::Params {
            reason: e.to_string(),
        }
    }
}

impl IoError {
    pub(crate) fn io(path: impl Into<PathBuf>, e: &std::io::Error) -> Self {
        IoError::Io {
            path: path.into(),
            reason: e.to_string(),
        }
    }
}
