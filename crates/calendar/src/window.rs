//! Inclusive date windows.

use chrono::NaiveDate;

use crate::error::CalendarError;
use crate::hydro_year::HydroYear;
use crate::start_month::StartMonth;

/// Inclusive `[start, end]` calendar window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateWindow {
    /// Creates a window from explicit bounds.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidWindow`] if `start > end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, CalendarError> {
        if start > end {
            return Err(CalendarError::InvalidWindow { start, end });
        }
        Ok(Self { start, end })
    }

    /// Window covering whole hydrological years from the one *starting* in
    /// `start_year` to the one *ending* in `end_year`.
    ///
    /// With a September start, `from_years(1980, 2024, ..)` spans
    /// 1980-09-01 through 2024-08-31.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidWindow`] if the range is empty, or
    /// [`CalendarError::InvalidDate`] for unrepresentable years.
    pub fn from_years(start_year: i32, end_year: i32, start: StartMonth) -> Result<Self, CalendarError> {
        let first = HydroYear::new(start_year + 1).first_day(start)?;
        let last = HydroYear::new(end_year).last_day(start)?;
        Self::new(first, last)
    }

    /// First day.
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// Last day.
    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Returns `true` if `date` lies inside the window.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}
