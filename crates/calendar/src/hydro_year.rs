//! Hydrological-year labels.

use std::fmt;

use chrono::{Datelike, NaiveDate};

use crate::error::CalendarError;
use crate::start_month::StartMonth;

/// Computes the hydrological year for a given calendar year and month.
///
/// Every month from `start_month` onward belongs to the *next* calendar
/// year's hydrological year. The rule is applied literally for every start
/// month, so a January start labels each calendar year `y` as `y + 1`.
///
/// # Errors
///
/// Returns [`CalendarError::InvalidMonth`] if `month` or `start_month` is
/// outside 1..=12.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(hydro_year(2021, 9, 9).unwrap(), 2022); // Sep 2021 -> HY 2022
/// assert_eq!(hydro_year(2021, 8, 9).unwrap(), 2021); // Aug 2021 -> HY 2021
/// ```
pub fn hydro_year(year: i32, month: u8, start_month: u8) -> Result<i32, CalendarError> {
    if !(1..=12).contains(&month) {
        return Err(CalendarError::InvalidMonth { month });
    }
    let start = StartMonth::new(start_month)?;
    Ok(shift(year, month, start))
}

fn shift(year: i32, month: u8, start: StartMonth) -> i32 {
    if month >= start.get() { year + 1 } else { year }
}

/// A hydrological year, identified by the calendar year in which it ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HydroYear(i32);

impl HydroYear {
    /// Wraps an ending calendar year.
    pub fn new(year: i32) -> Self {
        Self(year)
    }

    /// Assigns `date` to its hydrological year.
    pub fn from_date(date: NaiveDate, start: StartMonth) -> Self {
        Self(shift(date.year(), date.month() as u8, start))
    }

    /// Like [`from_date`](Self::from_date), but a missing date stays missing.
    pub fn from_date_opt(date: Option<NaiveDate>, start: StartMonth) -> Option<Self> {
        date.map(|d| Self::from_date(d, start))
    }

    /// The ending calendar year.
    pub fn year(self) -> i32 {
        self.0
    }

    /// Display string `"<start>/<end-2-digits>"`, e.g. `"1981/82"`.
    pub fn label(self) -> String {
        self.to_string()
    }

    /// First day of this hydrological year.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidDate`] if the year is outside the
    /// range `chrono` can represent.
    pub fn first_day(self, start: StartMonth) -> Result<NaiveDate, CalendarError> {
        let year = self.0 - 1;
        NaiveDate::from_ymd_opt(year, start.get() as u32, 1).ok_or(CalendarError::InvalidDate {
            year,
            month: start.get(),
            day: 1,
        })
    }

    /// Last day of this hydrological year (the day before the next one starts).
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidDate`] if the year is outside the
    /// range `chrono` can represent.
    pub fn last_day(self, start: StartMonth) -> Result<NaiveDate, CalendarError> {
        let next = HydroYear(self.0 + 1).first_day(start)?;
        next.pred_opt().ok_or(CalendarError::InvalidDate {
            year: next.year(),
            month: next.month() as u8,
            day: 1,
        })
    }

    /// Returns `true` if `date` falls inside this hydrological year.
    pub fn contains(self, date: NaiveDate, start: StartMonth) -> bool {
        Self::from_date(date, start) == self
    }
}

impl fmt::Display for HydroYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{:02}", self.0 - 1, self.0.rem_euclid(100))
    }
}
