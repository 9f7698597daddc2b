//! Meteorological seasons.

use std::fmt;

use chrono::{Datelike, NaiveDate};

/// Three-month meteorological season, assigned by calendar month only.
///
/// DJF spans the calendar-year boundary; within one hydrological year the
/// December and January-February parts are treated as a single window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Season {
    /// December, January, February.
    Djf,
    /// March, April, May.
    Mam,
    /// June, July, August.
    Jja,
    /// September, October, November.
    Son,
}

impl Season {
    /// All seasons in column order.
    pub const ALL: [Season; 4] = [Season::Djf, Season::Mam, Season::Jja, Season::Son];

    /// Calendar months belonging to this season.
    pub fn months(self) -> [u8; 3] {
        match self {
            Season::Djf => [12, 1, 2],
            Season::Mam => [3, 4, 5],
            Season::Jja => [6, 7, 8],
            Season::Son => [9, 10, 11],
        }
    }

    /// Returns `true` if calendar `month` lies in this season.
    pub fn contains(self, month: u8) -> bool {
        self.months().contains(&month)
    }

    /// Returns `true` if `date` lies in this season.
    pub fn contains_date(self, date: NaiveDate) -> bool {
        self.contains(date.month() as u8)
    }

    /// Season of a calendar month, or `None` outside 1..=12.
    pub fn of_month(month: u8) -> Option<Season> {
        Self::ALL.into_iter().find(|s| s.contains(month))
    }

    /// Upper-case abbreviation used as a column prefix.
    pub fn abbrev(self) -> &'static str {
        match self {
            Season::Djf => "DJF",
            Season::Mam => "MAM",
            Season::Jja => "JJA",
            Season::Son => "SON",
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.abbrev())
    }
}
