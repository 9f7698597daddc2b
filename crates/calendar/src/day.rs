//! Day ordinal within a hydrological year.

use chrono::{Datelike, NaiveDate};

use crate::start_month::StartMonth;

/// 1-based position of `date` within its hydrological year.
///
/// The boundary is the most recent first-of-`start` on or before `date`;
/// the result is the day difference plus one. Leap days need no special
/// handling because the difference is taken on real dates.
pub fn day_of_hydro_year(date: NaiveDate, start: StartMonth) -> u32 {
    let year = if date.month() as u8 >= start.get() {
        date.year()
    } else {
        date.year() - 1
    };
    // The first of a month always exists for any year holding `date`
    // except the earliest representable one.
    match NaiveDate::from_ymd_opt(year, start.get() as u32, 1) {
        Some(boundary) => (date - boundary).num_days() as u32 + 1,
        None => date.ordinal(),
    }
}

/// Like [`day_of_hydro_year`], but a missing date yields a missing ordinal.
pub fn day_of_hydro_year_opt(date: Option<NaiveDate>, start: StartMonth) -> Option<u32> {
    date.map(|d| day_of_hydro_year(d, start))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn boundary_is_day_one() {
        assert_eq!(day_of_hydro_year(date(2021, 9, 1), StartMonth::SEPTEMBER), 1);
        assert_eq!(day_of_hydro_year(date(2022, 9, 1), StartMonth::SEPTEMBER), 1);
    }

    #[test]
    fn last_day_non_leap() {
        assert_eq!(day_of_hydro_year(date(2022, 8, 31), StartMonth::SEPTEMBER), 365);
    }

    #[test]
    fn last_day_leap() {
        // Hydro year 2019/20 contains 2020-02-29.
        assert_eq!(day_of_hydro_year(date(2020, 8, 31), StartMonth::SEPTEMBER), 366);
    }

    #[test]
    fn january_first() {
        // Sep 30 + Oct 31 + Nov 30 + Dec 31 = 122 days before Jan 1.
        assert_eq!(day_of_hydro_year(date(2022, 1, 1), StartMonth::SEPTEMBER), 123);
    }

    #[test]
    fn increments_by_one_per_day() {
        let start = StartMonth::SEPTEMBER;
        let mut d = date(2021, 9, 1);
        for expected in 1..=365 {
            assert_eq!(day_of_hydro_year(d, start), expected);
            d = d.succ_opt().unwrap();
        }
        assert_eq!(day_of_hydro_year(d, start), 1);
    }

    #[test]
    fn january_start_matches_ordinal() {
        let start = StartMonth::new(1).unwrap();
        assert_eq!(day_of_hydro_year(date(2021, 3, 1), start), 60);
    }

    #[test]
    fn missing_date_propagates() {
        assert_eq!(day_of_hydro_year_opt(None, StartMonth::SEPTEMBER), None);
        assert_eq!(
            day_of_hydro_year_opt(Some(date(2021, 9, 2)), StartMonth::SEPTEMBER),
            Some(2)
        );
    }
}
