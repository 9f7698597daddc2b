//! Per-(basin, column) Theil-Sen slope and Mann-Kendall significance.

use hytrend_params::{Cell, ParameterTable};
use hytrend_stats::{StatsError, mann_kendall, mean, theil_sen};
use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::config::TrendConfig;
use crate::error::TrendError;

/// Trend of one parameter column for one basin.
///
/// Every statistic is `None` when fewer than the configured minimum of
/// valid years is available; `significant` is then `false`.
#[derive(Debug, Clone, PartialEq)]
pub struct TrendRow {
    /// Basin identifier.
    pub basin_id: String,
    /// Parameter column the trend was fitted to.
    pub column: String,
    /// Theil-Sen slope, in column units per hydrological year.
    pub slope: Option<f64>,
    /// Theil-Sen intercept at hydrological year 0.
    pub intercept: Option<f64>,
    /// Two-sided Mann-Kendall p-value.
    pub p_value: Option<f64>,
    /// `p_value < significance_level`.
    pub significant: bool,
    /// Mean of the valid values.
    pub mean: Option<f64>,
    /// `slope / mean`; `None` when the mean is zero.
    pub trend_percent: Option<f64>,
    /// Theil-Sen slope bounds at the configured confidence.
    pub interval: Option<(f64, f64)>,
    /// Number of valid years used.
    pub n_valid: usize,
}

impl TrendRow {
    fn empty(basin_id: &str, column: &str, n_valid: usize) -> Self {
        Self {
            basin_id: basin_id.to_string(),
            column: column.to_string(),
            slope: None,
            intercept: None,
            p_value: None,
            significant: false,
            mean: None,
            trend_percent: None,
            interval: None,
            n_valid,
        }
    }
}

/// Fits a trend for every basin of `table` and every column in `columns`.
///
/// Rows come back grouped by column in request order, and within a column
/// by basin in first-seen order. Units of work run in parallel.
///
/// # Errors
///
/// - [`TrendError::Validation`] for an invalid configuration.
/// - [`TrendError::SchemaMismatch`] if a column is not in the table.
/// - [`TrendError::NonNumericColumn`] if a column holds dates or text.
/// - [`TrendError::Stats`] if a statistics routine fails for a reason
///   other than too little data.
#[tracing::instrument(skip_all, fields(n_rows = table.len(), n_columns = columns.len()))]
pub fn estimate_trends(
    table: &ParameterTable,
    columns: &[String],
    config: &TrendConfig,
) -> Result<Vec<TrendRow>, TrendError> {
    config.validate()?;

    let mut indices = Vec::with_capacity(columns.len());
    for column in columns {
        let idx = table
            .column_index(column)
            .ok_or_else(|| TrendError::SchemaMismatch {
                column: column.clone(),
                available: table.columns().len(),
            })?;
        if table.rows().iter().any(|r| r.cells[idx].is_non_numeric()) {
            return Err(TrendError::NonNumericColumn {
                column: column.clone(),
            });
        }
        indices.push((column.as_str(), idx));
    }

    let basins = table.basins();
    let units: Vec<(&str, usize, &str)> = indices
        .iter()
        .flat_map(|&(column, idx)| basins.iter().map(move |&b| (column, idx, b)))
        .collect();
    debug!(n_units = units.len(), "estimating trends");

    let rows = units
        .par_iter()
        .map(|&(column, idx, basin)| {
            estimate_series(basin, column, &basin_series(table, basin, idx), config)
        })
        .collect::<Result<Vec<_>, _>>()?;

    let n_significant = rows.iter().filter(|r| r.significant).count();
    info!(n_rows = rows.len(), n_significant, "trend estimation complete");
    Ok(rows)
}

/// Fits one trend to `(hydro_year, value)` pairs sorted by year.
///
/// # Errors
///
/// Returns [`TrendError::Stats`] if a statistics routine fails for a
/// reason other than too little data.
pub fn estimate_series(
    basin_id: &str,
    column: &str,
    pairs: &[(f64, f64)],
    config: &TrendConfig,
) -> Result<TrendRow, TrendError> {
    let n = pairs.len();
    if n < config.min_points() {
        debug!(basin_id, column, n, "too few valid years");
        return Ok(TrendRow::empty(basin_id, column, n));
    }

    let (x, y): (Vec<f64>, Vec<f64>) = pairs.iter().copied().unzip();
    let fit = match theil_sen(&x, &y, config.confidence()) {
        Ok(fit) => fit,
        Err(StatsError::InsufficientData { .. }) => {
            warn!(basin_id, column, "all valid values share one hydrological year");
            return Ok(TrendRow::empty(basin_id, column, n));
        }
        Err(e) => return Err(e.into()),
    };
    let mk = mann_kendall(&y, config.significance_level())?;
    let m = mean(&y);

    Ok(TrendRow {
        basin_id: basin_id.to_string(),
        column: column.to_string(),
        slope: Some(fit.slope),
        intercept: Some(fit.intercept),
        p_value: Some(mk.p_value),
        significant: mk.p_value < config.significance_level(),
        mean: Some(m),
        trend_percent: (m != 0.0).then(|| fit.slope / m),
        interval: fit.interval,
        n_valid: n,
    })
}

/// `(hydro_year, value)` pairs of one basin and column, sorted by year.
/// Missing values are dropped.
pub fn basin_series(table: &ParameterTable, basin_id: &str, column: usize) -> Vec<(f64, f64)> {
    let mut pairs: Vec<(f64, f64)> = table
        .basin_rows(basin_id)
        .filter_map(|r| {
            let v = r.cells.get(column).and_then(Cell::as_f64)?;
            Some((f64::from(r.hydro_year.year()), v))
        })
        .collect();
    pairs.sort_by(|a, b| a.0.total_cmp(&b.0));
    pairs
}
