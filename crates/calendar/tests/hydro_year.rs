use chrono::{Datelike, NaiveDate};
use hytrend_calendar::{
    DateWindow, HydroYear, Season, StartMonth, day_of_hydro_year, hydro_year, month_distance,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn all_months_september_start() {
    // Months 1-8 stay in the current year, months 9-12 roll into the next.
    for month in 1..=8_u8 {
        assert_eq!(
            hydro_year(2000, month, 9).unwrap(),
            2000,
            "month {month} with September start should return 2000"
        );
    }
    for month in 9..=12_u8 {
        assert_eq!(
            hydro_year(2000, month, 9).unwrap(),
            2001,
            "month {month} with September start should return 2001"
        );
    }
}

#[test]
fn rule_holds_for_every_start_month() {
    for sm in 1..=12_u8 {
        let start = StartMonth::new(sm).unwrap();
        for month in 1..=12_u32 {
            let d = date(2010, month, 15);
            let expected = if month as u8 >= sm { 2011 } else { 2010 };
            assert_eq!(
                HydroYear::from_date(d, start).year(),
                expected,
                "start {sm}, month {month}"
            );
        }
    }
}

#[test]
fn day_one_on_every_boundary_for_every_start() {
    for sm in 1..=12_u8 {
        let start = StartMonth::new(sm).unwrap();
        let boundary = date(2015, sm as u32, 1);
        assert_eq!(day_of_hydro_year(boundary, start), 1, "start {sm}");
        let eve = boundary.pred_opt().unwrap();
        assert!(day_of_hydro_year(eve, start) >= 365, "start {sm}");
    }
}

#[test]
fn day_ordinal_consistent_with_label() {
    // Every day of a year shares one label; ordinals run 1..=len.
    let start = StartMonth::SEPTEMBER;
    let hy = HydroYear::new(2020);
    let first = hy.first_day(start).unwrap();
    let last = hy.last_day(start).unwrap();
    let mut d = first;
    let mut n = 0;
    while d <= last {
        n += 1;
        assert_eq!(HydroYear::from_date(d, start), hy);
        assert_eq!(day_of_hydro_year(d, start), n);
        d = d.succ_opt().unwrap();
    }
    assert_eq!(n, 366);
}

#[test]
fn window_matches_year_bounds() {
    let start = StartMonth::SEPTEMBER;
    let w = DateWindow::from_years(1980, 1985, start).unwrap();
    assert_eq!(HydroYear::from_date(w.start(), start).year(), 1981);
    assert_eq!(HydroYear::from_date(w.end(), start).year(), 1985);
    assert_eq!(w.end().month(), 8);
}

#[test]
fn month_distance_symmetric_with_zero_diagonal() {
    for sm in 1..=12_u8 {
        let start = StartMonth::new(sm).unwrap();
        for a in 1..=12_u8 {
            assert_eq!(month_distance(a, a, start).unwrap(), 0);
            for b in 1..=12_u8 {
                assert_eq!(
                    month_distance(a, b, start).unwrap(),
                    month_distance(b, a, start).unwrap()
                );
            }
        }
    }
}

#[test]
fn seasons_partition_the_year() {
    let mut seen = [0u8; 13];
    for s in Season::ALL {
        for m in s.months() {
            seen[m as usize] += 1;
        }
    }
    assert!(seen[1..].iter().all(|&c| c == 1));
}
