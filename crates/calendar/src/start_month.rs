//! Validated first month of the hydrological year.

use crate::error::CalendarError;

/// First calendar month of the hydrological year (1..=12).
///
/// Defaults to September, the Alpine convention where the snow season
/// starts after the late-summer minimum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StartMonth(u8);

impl StartMonth {
    /// September start.
    pub const SEPTEMBER: StartMonth = StartMonth(9);

    /// Creates a new `StartMonth`.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidMonth`] if `month` is outside 1..=12.
    pub fn new(month: u8) -> Result<Self, CalendarError> {
        if !(1..=12).contains(&month) {
            return Err(CalendarError::InvalidMonth { month });
        }
        Ok(Self(month))
    }

    /// Returns the month number.
    pub fn get(self) -> u8 {
        self.0
    }
}

impl Default for StartMonth {
    fn default() -> Self {
        Self::SEPTEMBER
    }
}

impl TryFrom<u8> for StartMonth {
    type Error = CalendarError;

    fn try_from(month: u8) -> Result<Self, Self::Error> {
        Self::new(month)
    }
}
