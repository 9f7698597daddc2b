//! Windowed extremum and aggregate utilities shared by every family.
//!
//! A window is any subset of a [`BasinYearGroup`] selected by a membership
//! predicate: the whole year, a season, or one calendar month. Each family
//! picks the fields it needs from the resulting [`WindowSummary`].

use chrono::{Datelike, NaiveDate};
use hytrend_calendar::{Season, StartMonth, day_of_hydro_year, month_distance};

use crate::error::ParamsError;
use crate::group::BasinYearGroup;
use crate::series::TimePoint;

/// Value, date and hydro-day ordinal of a window's max or min.
///
/// Used as `Option<Extremum>` so that an empty window is null in all three
/// fields at once.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extremum {
    /// Extreme value.
    pub value: f64,
    /// Date of the first occurrence.
    pub date: NaiveDate,
    /// 1-based day within the hydrological year.
    pub day: u32,
}

impl Extremum {
    pub(crate) fn at(point: &TimePoint, value: f64, start: StartMonth) -> Self {
        Self {
            value,
            date: point.date,
            day: day_of_hydro_year(point.date, start),
        }
    }
}

/// Count, sum, max and min over the present values in one window.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WindowSummary {
    /// Number of non-missing values.
    pub count: usize,
    total: f64,
    /// First occurrence of the largest value.
    pub max: Option<Extremum>,
    /// First occurrence of the smallest value.
    pub min: Option<Extremum>,
}

impl WindowSummary {
    /// Summarises `points` in order; missing values are skipped.
    pub fn compute<'a>(points: impl IntoIterator<Item = &'a TimePoint>, start: StartMonth) -> Self {
        let mut s = WindowSummary::default();
        for p in points {
            let Some(v) = p.value else { continue };
            s.count += 1;
            s.total += v;
            if s.max.is_none_or(|m| v > m.value) {
                s.max = Some(Extremum::at(p, v, start));
            }
            if s.min.is_none_or(|m| v < m.value) {
                s.min = Some(Extremum::at(p, v, start));
            }
        }
        s
    }

    /// Summarises the points of `group` accepted by `member`.
    pub fn of_group(group: &BasinYearGroup, member: impl Fn(&TimePoint) -> bool) -> Self {
        Self::compute(
            group.points().iter().filter(|p| member(p)),
            group.start_month(),
        )
    }

    /// Sum of present values, `None` for an empty window.
    pub fn sum(&self) -> Option<f64> {
        (self.count > 0).then_some(self.total)
    }

    /// Mean of present values, `None` for an empty window.
    pub fn mean(&self) -> Option<f64> {
        (self.count > 0).then(|| self.total / self.count as f64)
    }

    /// Max value alone.
    pub fn max_value(&self) -> Option<f64> {
        self.max.map(|e| e.value)
    }

    /// Min value alone.
    pub fn min_value(&self) -> Option<f64> {
        self.min.map(|e| e.value)
    }
}

/// Whole-year summary.
pub fn annual(group: &BasinYearGroup) -> WindowSummary {
    WindowSummary::of_group(group, |_| true)
}

/// One summary per season, in [`Season::ALL`] order.
pub fn seasonal(group: &BasinYearGroup) -> [WindowSummary; 4] {
    Season::ALL.map(|s| WindowSummary::of_group(group, |p| s.contains_date(p.date)))
}

/// One summary per calendar month; index 0 is January.
pub fn monthly(group: &BasinYearGroup) -> [WindowSummary; 12] {
    let mut out = [WindowSummary::default(); 12];
    for (i, slot) in out.iter_mut().enumerate() {
        let month = i as u32 + 1;
        *slot = WindowSummary::of_group(group, |p| p.date.month() == month);
    }
    out
}

/// Months with the largest and smallest monthly sum and how far apart
/// they lie in the hydrological year.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonthContrast {
    /// Calendar month with the largest sum.
    pub max_month: u8,
    /// That month's sum.
    pub max_sum: f64,
    /// Calendar month with the smallest sum.
    pub min_month: u8,
    /// That month's sum.
    pub min_sum: f64,
    /// `max_sum - min_sum`.
    pub sum_difference: f64,
    /// Hydrological-month distance between the two months.
    pub distance: u8,
}

/// Compares monthly sums over the months that hold data.
///
/// Months are scanned January to December and the first month wins a tie.
/// Returns `Ok(None)` when no month has data.
///
/// # Errors
///
/// Propagates [`ParamsError::Calendar`] from the month-distance helper.
pub fn month_contrast(
    months: &[WindowSummary; 12],
    start: StartMonth,
) -> Result<Option<MonthContrast>, ParamsError> {
    let mut max: Option<(u8, f64)> = None;
    let mut min: Option<(u8, f64)> = None;
    for (i, summary) in months.iter().enumerate() {
        let Some(sum) = summary.sum() else { continue };
        let month = i as u8 + 1;
        if max.is_none_or(|(_, m)| sum > m) {
            max = Some((month, sum));
        }
        if min.is_none_or(|(_, m)| sum < m) {
            min = Some((month, sum));
        }
    }
    let (Some((max_month, max_sum)), Some((min_month, min_sum))) = (max, min) else {
        return Ok(None);
    };
    Ok(Some(MonthContrast {
        max_month,
        max_sum,
        min_month,
        min_sum,
        sum_difference: max_sum - min_sum,
        distance: month_distance(max_month, min_month, start)?,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use hytrend_calendar::HydroYear;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn group(points: Vec<TimePoint>) -> BasinYearGroup {
        BasinYearGroup::new("b", HydroYear::new(2022), StartMonth::SEPTEMBER, points).unwrap()
    }

    #[test]
    fn empty_window_is_all_null() {
        let s = WindowSummary::compute(std::iter::empty(), StartMonth::SEPTEMBER);
        assert_eq!(s.max, None);
        assert_eq!(s.min, None);
        assert_eq!(s.sum(), None);
        assert_eq!(s.mean(), None);
    }

    #[test]
    fn missing_only_window_is_all_null() {
        let g = group(vec![TimePoint::missing(date(2021, 9, 1))]);
        let s = annual(&g);
        assert_eq!(s.count, 0);
        assert_eq!(s.max, None);
        assert_eq!(s.sum(), None);
    }

    #[test]
    fn first_occurrence_wins_ties() {
        let g = group(vec![
            TimePoint::new(date(2021, 9, 1), 5.0),
            TimePoint::new(date(2021, 9, 2), 1.0),
            TimePoint::new(date(2021, 9, 3), 5.0),
            TimePoint::new(date(2021, 9, 4), 1.0),
        ]);
        let s = annual(&g);
        let max = s.max.unwrap();
        assert_eq!(max.date, date(2021, 9, 1));
        assert_eq!(max.day, 1);
        assert_eq!(s.min.unwrap().date, date(2021, 9, 2));
        assert_eq!(s.sum(), Some(12.0));
        assert_eq!(s.mean(), Some(3.0));
    }

    #[test]
    fn seasonal_uses_calendar_months() {
        let g = group(vec![
            TimePoint::new(date(2021, 12, 15), 1.0),
            TimePoint::new(date(2022, 2, 15), 3.0),
            TimePoint::new(date(2022, 7, 1), 7.0),
        ]);
        let [djf, mam, jja, son] = seasonal(&g);
        assert_eq!(djf.sum(), Some(4.0));
        assert_eq!(djf.max.unwrap().date, date(2022, 2, 15));
        assert_eq!(mam.max, None);
        assert_eq!(jja.max_value(), Some(7.0));
        assert_eq!(son.count, 0);
    }

    #[test]
    fn monthly_contrast_ties_to_lowest_month() {
        let g = group(vec![
            TimePoint::new(date(2021, 9, 1), 2.0),
            TimePoint::new(date(2022, 1, 1), 5.0),
            TimePoint::new(date(2022, 3, 1), 5.0),
        ]);
        let c = month_contrast(&monthly(&g), StartMonth::SEPTEMBER)
            .unwrap()
            .unwrap();
        assert_eq!(c.max_month, 1);
        assert_eq!(c.min_month, 9);
        assert_eq!(c.sum_difference, 3.0);
        // January is hydro month 5, September is 1.
        assert_eq!(c.distance, 4);
    }

    #[test]
    fn no_months_no_contrast() {
        let g = group(vec![]);
        assert_eq!(
            month_contrast(&monthly(&g), StartMonth::SEPTEMBER).unwrap(),
            None
        );
    }
}
