//! Dated points, hydrological-year assignment and grouping.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use hytrend_calendar::{HydroYear, StartMonth};

use crate::error::ParamsError;
use crate::group::BasinYearGroup;

/// One dated measurement. Non-finite inputs are stored as missing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimePoint {
    /// Observation date.
    pub date: NaiveDate,
    /// Measured value, `None` when missing.
    pub value: Option<f64>,
}

impl TimePoint {
    /// A point with a value; NaN and infinities become missing.
    pub fn new(date: NaiveDate, value: f64) -> Self {
        Self {
            date,
            value: value.is_finite().then_some(value),
        }
    }

    /// A point with no value.
    pub fn missing(date: NaiveDate) -> Self {
        Self { date, value: None }
    }
}

/// A [`TimePoint`] annotated with its hydrological year.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HydroPoint {
    /// The original point.
    pub point: TimePoint,
    /// Hydrological year of `point.date`.
    pub hydro_year: HydroYear,
}

impl HydroPoint {
    /// Display label such as `"2021/22"`.
    pub fn label(&self) -> String {
        self.hydro_year.label()
    }
}

/// Annotates each point with its hydrological year, preserving order.
///
/// Input need not be sorted; callers sort before grouping.
pub fn assign_hydro_years(points: &[TimePoint], start: StartMonth) -> Vec<HydroPoint> {
    points
        .iter()
        .map(|&point| HydroPoint {
            point,
            hydro_year: HydroYear::from_date(point.date, start),
        })
        .collect()
}

/// Splits one basin's series into per-hydrological-year groups.
///
/// Groups come back in ascending year order with points sorted by date.
///
/// # Errors
///
/// Returns [`ParamsError::Validation`] if two points share a date.
pub fn group_by_hydro_year(
    basin_id: &str,
    points: &[TimePoint],
    start: StartMonth,
) -> Result<Vec<BasinYearGroup>, ParamsError> {
    let mut years: BTreeMap<HydroYear, Vec<TimePoint>> = BTreeMap::new();
    for hp in assign_hydro_years(points, start) {
        years.entry(hp.hydro_year).or_default().push(hp.point);
    }
    years
        .into_iter()
        .map(|(hy, mut pts)| {
            pts.sort_by_key(|p| p.date);
            BasinYearGroup::new(basin_id, hy, start, pts)
        })
        .collect()
}

/// Concatenates groups back into one date-ordered series.
pub fn flatten_groups(groups: &[BasinYearGroup]) -> Vec<TimePoint> {
    groups.iter().flat_map(|g| g.points().iter().copied()).collect()
}
