//! Error types for hytrend-stats.

/// Errors from the trend statistics.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StatsError {
    /// The x and y slices differ in length.
    #[error("length mismatch: x has {x} values, y has {y}")]
    LengthMismatch {
        /// Number of x values.
        x: usize,
        /// Number of y values.
        y: usize,
    },

    /// Too few usable observations for the statistic.
    #[error("insufficient data: need at least {needed}, got {got}")]
    InsufficientData {
        /// Minimum required.
        needed: usize,
        /// Number available.
        got: usize,
    },

    /// A probability parameter is outside (0, 1).
    #[error("invalid probability {value}: must be in (0, 1)")]
    InvalidProbability {
        /// The rejected value.
        value: f64,
    },

    /// Constructing a reference distribution failed.
    #[error("distribution error: {reason}")]
    Distribution {
        /// Message from the distribution library.
        reason: String,
    },
}
