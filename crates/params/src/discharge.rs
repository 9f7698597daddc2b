//! River discharge extremes, volume and seasonality.

use hytrend_calendar::Season;

use crate::cell::Cell;
use crate::error::ParamsError;
use crate::group::BasinYearGroup;
use crate::record::{ParameterSet, push};
use crate::window::{self, Extremum, MonthContrast};

/// Seasonal discharge statistics.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SeasonalDischarge {
    /// Mean daily flow over the season.
    pub mean: Option<f64>,
    /// Highest flow in the season.
    pub max: Option<Extremum>,
    /// Lowest flow in the season.
    pub min: Option<Extremum>,
}

/// All discharge parameters for one hydrological year.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DischargeParameters {
    /// Annual peak flow.
    pub max: Option<Extremum>,
    /// Annual low flow.
    pub min: Option<Extremum>,
    /// Mean daily flow.
    pub annual_mean: Option<f64>,
    /// Total of the daily flows.
    pub annual_sum: Option<f64>,
    /// Months with the largest and smallest total flow.
    pub contrast: Option<MonthContrast>,
    /// Per season, in [`Season::ALL`] order.
    pub seasons: [SeasonalDischarge; 4],
}

/// Extracts discharge parameters from one group.
///
/// # Errors
///
/// Propagates calendar errors from the month-distance helper.
pub fn extract_discharge(group: &BasinYearGroup) -> Result<DischargeParameters, ParamsError> {
    let annual = window::annual(group);
    let contrast = window::month_contrast(&window::monthly(group), group.start_month())?;
    let seasons = window::seasonal(group).map(|s| SeasonalDischarge {
        mean: s.mean(),
        max: s.max,
        min: s.min,
    });
    Ok(DischargeParameters {
        max: annual.max,
        min: annual.min,
        annual_mean: annual.mean(),
        annual_sum: annual.sum(),
        contrast,
        seasons,
    })
}

impl ParameterSet for DischargeParameters {
    fn fields(&self) -> Vec<(String, Cell)> {
        let mut f = Vec::with_capacity(14 + 28);
        push(&mut f, "max_discharge", self.max.map(|e| e.value));
        push(&mut f, "date_of_max", self.max.map(|e| e.date));
        push(&mut f, "day_of_max", self.max.map(|e| e.day));
        push(&mut f, "min_discharge", self.min.map(|e| e.value));
        push(&mut f, "date_of_min", self.min.map(|e| e.date));
        push(&mut f, "day_of_min", self.min.map(|e| e.day));
        push(&mut f, "annual_mean", self.annual_mean);
        push(&mut f, "annual_sum", self.annual_sum);

        let c = self.contrast;
        push(&mut f, "max_discharge_month", c.map(|c| c.max_month));
        push(&mut f, "max_discharge_month_sum", c.map(|c| c.max_sum));
        push(&mut f, "min_discharge_month", c.map(|c| c.min_month));
        push(&mut f, "min_discharge_month_sum", c.map(|c| c.min_sum));
        push(&mut f, "discharge_month_diff", c.map(|c| c.sum_difference));
        push(&mut f, "month_distance", c.map(|c| c.distance));

        let seasons = || Season::ALL.iter().zip(&self.seasons);
        for (s, d) in seasons() {
            push(&mut f, format!("{s}_mean"), d.mean);
        }
        for (s, d) in seasons() {
            push(&mut f, format!("{s}_max"), d.max.map(|e| e.value));
        }
        for (s, d) in seasons() {
            push(&mut f, format!("{s}_max_date"), d.max.map(|e| e.date));
        }
        for (s, d) in seasons() {
            push(&mut f, format!("{s}_max_day"), d.max.map(|e| e.day));
        }
        for (s, d) in seasons() {
            push(&mut f, format!("{s}_min"), d.min.map(|e| e.value));
        }
        for (s, d) in seasons() {
            push(&mut f, format!("{s}_min_date"), d.min.map(|e| e.date));
        }
        for (s, d) in seasons() {
            push(&mut f, format!("{s}_min_day"), d.min.map(|e| e.day));
        }
        f
    }
}
