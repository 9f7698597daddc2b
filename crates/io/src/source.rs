//! Basin-indexed series sources and their in-memory store.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use hytrend_params::TimePoint;

use crate::error::IoError;

/// Column holding the basin identifier in every series file.
pub const BASIN_COLUMN: &str = "basin_id";
/// Column holding the observation date in every series file.
pub const DATE_COLUMN: &str = "date";

/// A source of per-basin daily series.
///
/// Sources load their file wholesale when opened. `fetch` returns the
/// basin's points in file order, unfiltered; windowing, de-duplication and
/// sorting are left to [`SeriesLoader`](crate::SeriesLoader).
pub trait SeriesSource: Send + Sync {
    /// Human-readable origin, used in log messages.
    fn name(&self) -> &str;

    /// Basin ids in ascending order.
    fn basin_ids(&self) -> Vec<String>;

    /// Whether the source holds `basin_id`.
    fn contains(&self, basin_id: &str) -> bool {
        self.basin_ids().iter().any(|b| b == basin_id)
    }

    /// Points of one basin and variable; `Ok(None)` if the basin is absent.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::MissingColumn`] if `variable` is not a column of
    /// the source.
    fn fetch(&self, basin_id: &str, variable: &str) -> Result<Option<Vec<TimePoint>>, IoError>;
}

/// Columnar rows of one basin.
#[derive(Debug, Clone, Default)]
struct BasinRows {
    dates: Vec<NaiveDate>,
    /// One column per variable, aligned with `dates`.
    values: Vec<Vec<Option<f64>>>,
}

/// Long-format series held in memory: `(basin_id, date, variables...)`.
#[derive(Debug, Clone)]
pub(crate) struct SeriesStore {
    path: PathBuf,
    variables: Vec<String>,
    basins: BTreeMap<String, BasinRows>,
}

impl SeriesStore {
    pub(crate) fn new(path: &Path, variables: Vec<String>) -> Self {
        Self {
            path: path.to_path_buf(),
            variables,
            basins: BTreeMap::new(),
        }
    }

    /// Appends one row. `values` must align with the variable list.
    pub(crate) fn push(&mut self, basin_id: &str, date: NaiveDate, values: &[Option<f64>]) {
        let n_vars = self.variables.len();
        let rows = self
            .basins
            .entry(basin_id.to_string())
            .or_insert_with(|| BasinRows {
                dates: Vec::new(),
                values: vec![Vec::new(); n_vars],
            });
        rows.dates.push(date);
        for (col, v) in rows.values.iter_mut().zip(values) {
            col.push(v.filter(|x| x.is_finite()));
        }
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    pub(crate) fn variables(&self) -> &[String] {
        &self.variables
    }

    pub(crate) fn n_rows(&self) -> usize {
        self.basins.values().map(|b| b.dates.len()).sum()
    }

    pub(crate) fn basin_ids(&self) -> Vec<String> {
        self.basins.keys().cloned().collect()
    }

    pub(crate) fn contains(&self, basin_id: &str) -> bool {
        self.basins.contains_key(basin_id)
    }

    pub(crate) fn fetch(
        &self,
        basin_id: &str,
        variable: &str,
    ) -> Result<Option<Vec<TimePoint>>, IoError> {
        let idx = self
            .variables
            .iter()
            .position(|v| v == variable)
            .ok_or_else(|| IoError::MissingColumn {
                name: variable.to_string(),
                path: self.path.clone(),
            })?;
        Ok(self.basins.get(basin_id).map(|rows| {
            rows.dates
                .iter()
                .zip(&rows.values[idx])
                .map(|(&date, &value)| TimePoint { date, value })
                .collect()
        }))
    }
}
