//! Error types for the hytrend-calendar crate.

use chrono::NaiveDate;

/// Error type for all fallible operations in the hytrend-calendar crate.
///
/// This enum covers validation failures for month numbers, calendar dates
/// that cannot be constructed, and inverted date windows.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[allow(clippy::enum_variant_names)]
pub enum CalendarError {
    /// Returned when a month number is outside the valid range 1..=12.
    #[error("invalid month: {month} (must be 1..=12)")]
    InvalidMonth {
        /// The invalid month number that was provided.
        month: u8,
    },

    /// Returned when a year/month/day triple does not name a real date.
    #[error("invalid date: {year}-{month:02}-{day:02}")]
    InvalidDate {
        /// Calendar year.
        year: i32,
        /// Calendar month.
        month: u8,
        /// Day of month.
        day: u8,
    },

    /// Returned when a window's start falls after its end.
    #[error("invalid window: start {start} is after end {end}")]
    InvalidWindow {
        /// First day of the window.
        start: NaiveDate,
        /// Last day of the window.
        end: NaiveDate,
    },
}
