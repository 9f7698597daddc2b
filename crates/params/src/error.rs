//! Error types for hytrend-params.

/// Errors raised while grouping series or extracting parameters.
///
/// Data gaps are never errors here: an empty window or a threshold that is
/// never reached produces a null field, not a variant of this enum.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParamsError {
    /// One or more validation checks failed.
    #[error("{count} validation error(s): {details}")]
    Validation {
        /// Number of accumulated failures.
        count: usize,
        /// Failures joined with `"; "`.
        details: String,
    },

    /// Wraps an error from hytrend-calendar.
    #[error("calendar error: {reason}")]
    Calendar {
        /// Description of the calendar failure.
        reason: String,
    },

    /// A variable family name was not recognised.
    #[error("unknown variable family '{name}' (expected swe, precipitation or discharge)")]
    UnknownFamily {
        /// The rejected name.
        name: String,
    },

    /// A row's width does not match the table header.
    #[error("row for basin '{basin_id}' has {got} cells, table has {expected} columns")]
    RowWidth {
        /// Basin of the offending row.
        basin_id: String,
        /// Number of value columns in the table.
        expected: usize,
        /// Number of cells in the row.
        got: usize,
    },

    /// Two tables with different headers were combined.
    #[error("column mismatch when combining tables: {details}")]
    ColumnMismatch {
        /// Description of the difference.
        details: String,
    },
}

impl From<hytrend_calendar::CalendarError> for ParamsError {
    fn from(e: hytrend_calendar::CalendarError) -> Self {
        ParamsError::Calendar {
            reason: e.to_string(),
        }
    }
}

/// Accumulates validation errors into a single [`ParamsError::Validation`].
pub(crate) struct ValidationCollector {
    errors: Vec<String>,
}

impl ValidationCollector {
    pub(crate) fn new() -> Self {
        Self { errors: Vec::new() }
    }

    pub(crate) fn push(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }

    /// `Ok(())` if nothing was recorded, otherwise every message joined
    /// with `"; "`.
    pub(crate) fn finish(self) -> Result<(), ParamsError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ParamsError::Validation {
                count: self.errors.len(),
                details: self.errors.join("; "),
            })
        }
    }
}
