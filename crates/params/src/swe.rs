//! Snow water equivalent: peak, melt, accumulation and summer snowfall.
//!
//! The detector walks one hydrological year forward:
//!
//! 1. the annual maximum is the peak;
//! 2. after the peak, the first values at or below 50 % and 10 % of the peak
//!    mark melt progress (each searched from the peak independently);
//! 3. the first strictly positive day-over-day difference starts
//!    accumulation, and the days from there to the peak form the
//!    accumulation window;
//! 4. inside that window a [`ConstantSnowfallRule`] locates the start of
//!    sustained snowfall;
//! 5. positive differences between consecutive June-August observations
//!    count as summer snowfall.
//!
//! Missing values never satisfy a threshold and break the difference on
//! both sides.

use chrono::NaiveDate;
use hytrend_calendar::{Season, StartMonth, day_of_hydro_year};

use crate::cell::Cell;
use crate::config::ConstantSnowfallRule;
use crate::group::{BasinYearGroup, differences};
use crate::record::{ParameterSet, push};
use crate::series::TimePoint;
use crate::window::{self, Extremum};

/// First post-peak date at or below a fraction of the peak.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeltThreshold {
    /// Date the threshold is first reached.
    pub date: NaiveDate,
    /// Hydro-day ordinal of `date`.
    pub day: u32,
    /// Days from the peak to `date`.
    pub days_after_peak: i64,
}

/// Accumulation onset and, when it precedes the peak, its window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Accumulation {
    /// First date with a strictly positive difference.
    pub start_date: NaiveDate,
    /// Hydro-day ordinal of `start_date`.
    pub start_day: u32,
    /// Statistics over `start_date..=peak`; `None` when the onset falls
    /// after the peak.
    pub window: Option<AccumulationWindow>,
}

/// Statistics over the accumulation window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AccumulationWindow {
    /// Days from onset to peak.
    pub duration: i64,
    /// Observations in the window with a positive difference.
    pub snowfall_days: usize,
    /// `snowfall_days` divided by the number of observations in the window.
    pub snowfall_fraction: f64,
    /// Start of sustained snowfall, if the rule finds one.
    pub constant_start: Option<(NaiveDate, u32)>,
}

/// Positive changes between consecutive summer observations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SummerSnowfall {
    /// Sum of positive differences.
    pub total: f64,
    /// Number of positive differences.
    pub days: usize,
}

/// Seasonal SWE extremes.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SeasonalSwe {
    /// Seasonal maximum.
    pub max: Option<Extremum>,
    /// Seasonal minimum.
    pub min: Option<Extremum>,
}

/// All SWE parameters for one hydrological year.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SweParameters {
    /// Annual peak.
    pub max: Option<Extremum>,
    /// Annual minimum.
    pub min: Option<Extremum>,
    /// Melt to 50 % of peak.
    pub swe50: Option<MeltThreshold>,
    /// Melt to 10 % of peak.
    pub swe10: Option<MeltThreshold>,
    /// Accumulation onset and window.
    pub accumulation: Option<Accumulation>,
    /// June-August snowfall.
    pub summer: Option<SummerSnowfall>,
    /// Extremes per season, in [`Season::ALL`] order.
    pub seasons: [SeasonalSwe; 4],
}

/// Extracts SWE parameters from one group.
///
/// Groups with fewer than two observations only get the annual and
/// seasonal extremes.
pub fn extract_swe(group: &BasinYearGroup, rule: ConstantSnowfallRule) -> SweParameters {
    let start = group.start_month();
    let annual = window::annual(group);
    let seasons = window::seasonal(group).map(|s| SeasonalSwe {
        max: s.max,
        min: s.min,
    });
    let mut out = SweParameters {
        max: annual.max,
        min: annual.min,
        seasons,
        ..SweParameters::default()
    };

    let points = group.points();
    if points.len() < 2 {
        return out;
    }
    let Some(peak) = annual.max else {
        return out;
    };
    let Some(peak_idx) = points.iter().position(|p| p.date == peak.date) else {
        return out;
    };

    let after_peak = &points[peak_idx + 1..];
    out.swe50 = melt_threshold(after_peak, &peak, 0.5, start);
    out.swe10 = melt_threshold(after_peak, &peak, 0.1, start);

    let diffs = group.differences();
    out.accumulation = accumulation(points, &diffs, peak_idx, &peak, rule, start);
    out.summer = summer_snowfall(points);
    out
}

fn melt_threshold(
    after_peak: &[TimePoint],
    peak: &Extremum,
    fraction: f64,
    start: StartMonth,
) -> Option<MeltThreshold> {
    let limit = peak.value * fraction;
    after_peak
        .iter()
        .find(|p| p.value.is_some_and(|v| v <= limit))
        .map(|p| MeltThreshold {
            date: p.date,
            day: day_of_hydro_year(p.date, start),
            days_after_peak: (p.date - peak.date).num_days(),
        })
}

fn accumulation(
    points: &[TimePoint],
    diffs: &[Option<f64>],
    peak_idx: usize,
    peak: &Extremum,
    rule: ConstantSnowfallRule,
    start: StartMonth,
) -> Option<Accumulation> {
    let onset = (1..points.len()).find(|&i| is_gain(diffs[i]))?;
    let onset_date = points[onset].date;

    let window = (onset <= peak_idx).then(|| {
        let n = peak_idx - onset + 1;
        let snowfall_days = diffs[onset..=peak_idx].iter().filter(|d| is_gain(**d)).count();
        let constant_start = constant_snowfall_start(points, diffs, onset, peak_idx, rule)
            .map(|i| (points[i].date, day_of_hydro_year(points[i].date, start)));
        AccumulationWindow {
            duration: (peak.date - onset_date).num_days(),
            snowfall_days,
            snowfall_fraction: snowfall_days as f64 / n as f64,
            constant_start,
        }
    });

    Some(Accumulation {
        start_date: onset_date,
        start_day: day_of_hydro_year(onset_date, start),
        window,
    })
}

/// Index of the first sustained-snowfall day in `onset..=peak`.
fn constant_snowfall_start(
    points: &[TimePoint],
    diffs: &[Option<f64>],
    onset: usize,
    peak: usize,
    rule: ConstantSnowfallRule,
) -> Option<usize> {
    match rule {
        ConstantSnowfallRule::MonotonicToPeak => (onset..=peak).find(|&i| {
            let (true, Some(base)) = (is_gain(diffs[i]), points[i].value) else {
                return false;
            };
            points[i..=peak]
                .iter()
                .filter_map(|p| p.value)
                .all(|v| v >= base)
        }),
        ConstantSnowfallRule::PositiveRun { length } => {
            if length == 0 || peak + 1 < onset + length {
                return None;
            }
            (onset..=peak + 1 - length).find(|&i| diffs[i..i + length].iter().all(|d| is_gain(*d)))
        }
    }
}

fn summer_snowfall(points: &[TimePoint]) -> Option<SummerSnowfall> {
    let summer: Vec<TimePoint> = points
        .iter()
        .filter(|p| Season::Jja.contains_date(p.date))
        .copied()
        .collect();
    if summer.iter().all(|p| p.value.is_none()) {
        return None;
    }
    let gains: Vec<f64> = differences(&summer)
        .into_iter()
        .flatten()
        .filter(|d| *d > 0.0)
        .collect();
    Some(SummerSnowfall {
        total: gains.iter().sum(),
        days: gains.len(),
    })
}

fn is_gain(diff: Option<f64>) -> bool {
    diff.is_some_and(|d| d > 0.0)
}

impl ParameterSet for SweParameters {
    fn fields(&self) -> Vec<(String, Cell)> {
        let mut f = Vec::with_capacity(37);
        push(&mut f, "max_swe", self.max.map(|e| e.value));
        push(&mut f, "date_of_max_swe", self.max.map(|e| e.date));
        push(&mut f, "timing_of_max_swe", self.max.map(|e| e.day));
        push(&mut f, "min_swe", self.min.map(|e| e.value));
        push(&mut f, "date_of_min_swe", self.min.map(|e| e.date));
        push(&mut f, "timing_of_min_swe", self.min.map(|e| e.day));
        for (label, melt) in [("swe50", self.swe50), ("swe10", self.swe10)] {
            push(&mut f, format!("melt_duration_to_{label}"), melt.map(|m| m.days_after_peak));
            push(&mut f, format!("date_{label}"), melt.map(|m| m.date));
            push(&mut f, format!("timing_{label}"), melt.map(|m| m.day));
        }

        let acc = self.accumulation;
        let win = acc.and_then(|a| a.window);
        let constant = win.and_then(|w| w.constant_start);
        push(&mut f, "accumulation_start_date", acc.map(|a| a.start_date));
        push(&mut f, "timing_accumulation_start", acc.map(|a| a.start_day));
        push(&mut f, "accumulation_duration", win.map(|w| w.duration));
        push(&mut f, "snowfall_days_accumulation", win.map(|w| w.snowfall_days));
        push(&mut f, "snowfall_percent_accumulation", win.map(|w| w.snowfall_fraction));
        push(&mut f, "constant_snowfall_start_date", constant.map(|(d, _)| d));
        push(&mut f, "timing_constant_snowfall_start", constant.map(|(_, day)| day));
        push(&mut f, "summer_snowfall_accumulation", self.summer.map(|s| s.total));
        push(&mut f, "number_of_days_summer_snowfall", self.summer.map(|s| s.days));

        for (season, s) in Season::ALL.iter().zip(&self.seasons) {
            push(&mut f, format!("{season}_min_swe"), s.min.map(|e| e.value));
            push(&mut f, format!("{season}_max_swe"), s.max.map(|e| e.value));
            push(&mut f, format!("{season}_timing_max_swe"), s.max.map(|e| e.day));
            push(&mut f, format!("{season}_timing_min_swe"), s.min.map(|e| e.day));
        }
        f
    }
}
