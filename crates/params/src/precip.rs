//! Precipitation totals, extremes, seasonality and concentration.

use hytrend_calendar::Season;
use hytrend_stats::{mean, population_sd};

use crate::cell::Cell;
use crate::error::ParamsError;
use crate::group::BasinYearGroup;
use crate::record::{ParameterSet, push};
use crate::window::{self, Extremum, MonthContrast, WindowSummary};

/// Sum and extremes of one season or month.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PrecipWindow {
    /// Total over the window.
    pub sum: Option<f64>,
    /// Largest value.
    pub max: Option<f64>,
    /// Smallest value.
    pub min: Option<f64>,
}

impl From<&WindowSummary> for PrecipWindow {
    fn from(s: &WindowSummary) -> Self {
        Self {
            sum: s.sum(),
            max: s.max_value(),
            min: s.min_value(),
        }
    }
}

/// All precipitation parameters for one hydrological year.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PrecipParameters {
    /// Annual total.
    pub annual_sum: Option<f64>,
    /// Mean daily value.
    pub annual_mean: Option<f64>,
    /// Wettest day.
    pub annual_max: Option<Extremum>,
    /// Driest day.
    pub annual_min: Option<Extremum>,
    /// Per season, in [`Season::ALL`] order.
    pub seasons: [PrecipWindow; 4],
    /// Per calendar month; index 0 is January.
    pub months: [PrecipWindow; 12],
    /// Wettest and driest month.
    pub contrast: Option<MonthContrast>,
    /// Coefficient of variation of the monthly sums.
    pub monthly_cv: Option<f64>,
    /// Concentration index.
    pub pci: Option<f64>,
}

/// Extracts precipitation parameters from one group.
///
/// # Errors
///
/// Only fails if the group's start month is rejected by the month-distance
/// helper, which cannot happen for a validated [`StartMonth`](hytrend_calendar::StartMonth).
pub fn extract_precipitation(group: &BasinYearGroup) -> Result<PrecipParameters, ParamsError> {
    let annual = window::annual(group);
    let monthly = window::monthly(group);
    let contrast = window::month_contrast(&monthly, group.start_month())?;

    let sums: Vec<f64> = monthly.iter().filter_map(WindowSummary::sum).collect();
    Ok(PrecipParameters {
        annual_sum: annual.sum(),
        annual_mean: annual.mean(),
        annual_max: annual.max,
        annual_min: annual.min,
        seasons: window::seasonal(group).each_ref().map(PrecipWindow::from),
        months: monthly.each_ref().map(PrecipWindow::from),
        contrast,
        monthly_cv: coefficient_of_variation(&sums),
        pci: concentration_index(&sums),
    })
}

/// Population standard deviation over mean; `None` for no data or zero mean.
fn coefficient_of_variation(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let m = mean(values);
    (m != 0.0).then(|| population_sd(values) / m)
}

/// `100 * sum((1000 s)^2) / sum((1000 s)^2)` over the monthly sums `s`.
///
/// This reproduces the historical formula, which is 100 for any wet year.
/// The conventional index is `100 * sum(s^2) / (sum s)^2`.
fn concentration_index(monthly_sums: &[f64]) -> Option<f64> {
    let scaled_squares = || monthly_sums.iter().map(|s| (1000.0 * s).powi(2));
    let numerator: f64 = scaled_squares().sum();
    let denominator: f64 = scaled_squares().sum();
    (denominator > 0.0).then(|| 100.0 * numerator / denominator)
}

impl ParameterSet for PrecipParameters {
    fn fields(&self) -> Vec<(String, Cell)> {
        let mut f = Vec::with_capacity(8 + 12 + 36 + 8);
        push(&mut f, "annual_sum", self.annual_sum);
        push(&mut f, "annual_mean", self.annual_mean);
        push(&mut f, "annual_max", self.annual_max.map(|e| e.value));
        push(&mut f, "annual_max_date", self.annual_max.map(|e| e.date));
        push(&mut f, "timing_annual_max", self.annual_max.map(|e| e.day));
        push(&mut f, "annual_min", self.annual_min.map(|e| e.value));
        push(&mut f, "annual_min_date", self.annual_min.map(|e| e.date));
        push(&mut f, "timing_annual_min", self.annual_min.map(|e| e.day));

        for (season, w) in Season::ALL.iter().zip(&self.seasons) {
            push(&mut f, format!("{season}_sum"), w.sum);
            push(&mut f, format!("{season}_max"), w.max);
            push(&mut f, format!("{season}_min"), w.min);
        }
        for (i, w) in self.months.iter().enumerate() {
            let m = i + 1;
            push(&mut f, format!("month_{m}_sum"), w.sum);
            push(&mut f, format!("month_{m}_max"), w.max);
            push(&mut f, format!("month_{m}_min"), w.min);
        }

        let c = self.contrast;
        push(&mut f, "max_month", c.map(|c| c.max_month));
        push(&mut f, "min_month", c.map(|c| c.min_month));
        push(&mut f, "max_month_sum", c.map(|c| c.max_sum));
        push(&mut f, "min_month_sum", c.map(|c| c.min_sum));
        push(&mut f, "month_sum_difference", c.map(|c| c.sum_difference));
        push(&mut f, "month_difference", c.map(|c| c.distance));
        push(&mut f, "monthly_cv", self.monthly_cv);
        push(&mut f, "pci", self.pci);
        f
    }
}
