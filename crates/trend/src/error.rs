//! Error types for hytrend-trend.

use hytrend_stats::StatsError;

/// Errors raised by [`estimate_trends`](crate::estimate_trends).
///
/// Too few valid years is not an error: such a basin gets a row of nulls.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TrendError {
    /// One or more configuration checks failed.
    #[error("{count} validation error(s): {details}")]
    Validation {
        /// Number of accumulated failures.
        count: usize,
        /// Failures joined with `"; "`.
        details: String,
    },

    /// A requested column is not in the table.
    #[error("column '{column}' not found in parameter table ({available} columns available)")]
    SchemaMismatch {
        /// The missing column.
        column: String,
        /// Number of value columns the table has.
        available: usize,
    },

    /// A requested column holds dates or text.
    #[error("column '{column}' is not numeric")]
    NonNumericColumn {
        /// The offending column.
        column: String,
    },

    /// Wraps an error from hytrend-stats.
    #[error("statistics error: {reason}")]
    Stats {
        /// Description of the statistics failure.
        reason: String,
    },
}

impl From<StatsError> for TrendError {
    fn from(e: StatsError) -> Self {
        TrendError::Stats {
            reason: e.to_string(),
        }
    }
}
