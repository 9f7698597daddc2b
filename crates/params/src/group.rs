//! One basin's observations for one hydrological year.

use hytrend_calendar::{HydroYear, StartMonth};

use crate::error::{ParamsError, ValidationCollector};
use crate::series::TimePoint;

/// All points of one basin sharing one hydrological year, strictly
/// increasing in date.
///
/// May be empty; extractors treat an empty group as "nothing computable".
#[derive(Debug, Clone, PartialEq)]
pub struct BasinYearGroup {
    basin_id: String,
    hydro_year: HydroYear,
    start: StartMonth,
    points: Vec<TimePoint>,
}

impl BasinYearGroup {
    /// Validates and wraps a group.
    ///
    /// # Errors
    ///
    /// Returns [`ParamsError::Validation`] listing every date that is out
    /// of order, duplicated, or outside `hydro_year`.
    pub fn new(
        basin_id: impl Into<String>,
        hydro_year: HydroYear,
        start: StartMonth,
        points: Vec<TimePoint>,
    ) -> Result<Self, ParamsError> {
        let basin_id = basin_id.into();
        let mut c = ValidationCollector::new();

        for p in &points {
            if !hydro_year.contains(p.date, start) {
                c.push(format!(
                    "basin {basin_id}: date {} outside hydro year {}",
                    p.date,
                    hydro_year.label()
                ));
            }
        }
        for w in points.windows(2) {
            if w[1].date <= w[0].date {
                c.push(format!(
                    "basin {basin_id}: date {} does not follow {}",
                    w[1].date, w[0].date
                ));
            }
        }
        c.finish()?;

        Ok(Self {
            basin_id,
            hydro_year,
            start,
            points,
        })
    }

    /// Basin identifier.
    pub fn basin_id(&self) -> &str {
        &self.basin_id
    }

    /// Hydrological year shared by every point.
    pub fn hydro_year(&self) -> HydroYear {
        self.hydro_year
    }

    /// Start month the group was built with.
    pub fn start_month(&self) -> StartMonth {
        self.start
    }

    /// Points in date order.
    pub fn points(&self) -> &[TimePoint] {
        &self.points
    }

    /// Number of points, missing values included.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns `true` if the group holds no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Day-over-day differences aligned with `points()`.
    ///
    /// Entry `i` is `points[i] - points[i - 1]`, defined only when both
    /// values are present; entry 0 is always `None`.
    pub fn differences(&self) -> Vec<Option<f64>> {
        differences(&self.points)
    }
}

pub(crate) fn differences(points: &[TimePoint]) -> Vec<Option<f64>> {
    let mut out = Vec::with_capacity(points.len());
    out.extend(points.first().map(|_| None));
    out.extend(points.windows(2).map(|w| match (w[0].value, w[1].value) {
        (Some(a), Some(b)) => Some(b - a),
        _ => None,
    }));
    out
}
