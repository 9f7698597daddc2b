//! Per-group and per-basin extraction drivers.

use rayon::prelude::*;
use tracing::debug;

use crate::config::ExtractConfig;
use crate::discharge::extract_discharge;
use crate::error::ParamsError;
use crate::group::BasinYearGroup;
use crate::precip::extract_precipitation;
use crate::record::{Family, ParameterRecord, ParameterRow};
use crate::series::{TimePoint, group_by_hydro_year};
use crate::swe::extract_swe;

/// Runs the configured family's extractor on one group.
///
/// The group's own start month is used for timing; `config` only selects
/// the family and the constant-snowfall rule.
///
/// # Errors
///
/// Propagates calendar errors from the month-distance helper.
pub fn extract_group(
    group: &BasinYearGroup,
    config: &ExtractConfig,
) -> Result<ParameterRecord, ParamsError> {
    let parameters = match config.family() {
        Family::Swe => ParameterRow::Swe(extract_swe(group, config.constant_snowfall())),
        Family::Precipitation => ParameterRow::Precipitation(extract_precipitation(group)?),
        Family::Discharge => ParameterRow::Discharge(extract_discharge(group)?),
    };
    Ok(ParameterRecord {
        basin_id: group.basin_id().to_string(),
        hydro_year: group.hydro_year(),
        parameters,
    })
}

/// Extracts one record per hydrological year of a basin's series.
///
/// Years are processed in parallel; records come back in ascending
/// hydrological-year order.
///
/// # Errors
///
/// Returns [`ParamsError::Validation`] for an invalid configuration or
/// duplicate dates in `points`.
#[tracing::instrument(skip(points, config), fields(family = %config.family(), n_points = points.len()))]
pub fn extract_basin(
    basin_id: &str,
    points: &[TimePoint],
    config: &ExtractConfig,
) -> Result<Vec<ParameterRecord>, ParamsError> {
    let start = config.validate()?;
    let groups = group_by_hydro_year(basin_id, points, start)?;
    debug!(n_years = groups.len(), "grouped by hydrological year");

    groups
        .par_iter()
        .map(|g| extract_group(g, config))
        .collect()
}
