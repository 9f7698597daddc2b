//! Long-format CSV series: `basin_id,date,<variable>...`.

use std::path::Path;

use chrono::NaiveDate;
use csv::ReaderBuilder;
use hytrend_params::{DATE_FORMAT, TimePoint};
use tracing::{debug, info};

use crate::error::IoError;
use crate::source::{BASIN_COLUMN, DATE_COLUMN, SeriesSource, SeriesStore};
use crate::validate::require_columns;

/// A CSV file of daily values for many basins, loaded wholesale.
///
/// Every column other than `basin_id` and `date` is a variable. Dates are
/// ISO `YYYY-MM-DD`; empty fields, `NA` and `NaN` are missing values.
#[derive(Debug, Clone)]
pub struct CsvSeriesSource {
    name: String,
    store: SeriesStore,
}

impl CsvSeriesSource {
    /// Reads the whole file.
    ///
    /// # Errors
    ///
    /// - [`IoError::FileNotFound`] if `path` does not exist.
    /// - [`IoError::Validation`] if `basin_id` or `date` is missing from the
    ///   header.
    /// - [`IoError::InvalidDate`] / [`IoError::InvalidValue`] for malformed
    ///   fields.
    /// - [`IoError::Csv`] for malformed CSV.
    #[tracing::instrument(skip_all, fields(path = %path.display()))]
    pub fn open(path: &Path) -> Result<Self, IoError> {
        if !path.exists() {
            return Err(IoError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_path(path)?;

        let header: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();
        require_columns(&header, &[BASIN_COLUMN, DATE_COLUMN]).into_result()?;
        let basin_idx = header.iter().position(|h| h == BASIN_COLUMN);
        let date_idx = header.iter().position(|h| h == DATE_COLUMN);
        let (Some(basin_idx), Some(date_idx)) = (basin_idx, date_idx) else {
            return Err(IoError::MissingColumn {
                name: BASIN_COLUMN.to_string(),
                path: path.to_path_buf(),
            });
        };
        let var_idx: Vec<usize> = (0..header.len())
            .filter(|&i| i != basin_idx && i != date_idx)
            .collect();
        let variables = var_idx.iter().map(|&i| header[i].clone()).collect();
        debug!(?variables, "csv header");

        let mut store = SeriesStore::new(path, variables);
        let mut values = Vec::with_capacity(var_idx.len());
        for (i, record) in rdr.records().enumerate() {
            let record = record?;
            let row = i + 1;
            let field = |idx: usize| record.get(idx).unwrap_or("");

            let date = parse_date(field(date_idx)).ok_or_else(|| IoError::InvalidDate {
                value: field(date_idx).to_string(),
                row,
                path: path.to_path_buf(),
            })?;
            values.clear();
            for &idx in &var_idx {
                let v = parse_value(field(idx)).ok_or_else(|| IoError::InvalidValue {
                    value: field(idx).to_string(),
                    column: header[idx].clone(),
                    row,
                    path: path.to_path_buf(),
                })?;
                values.push(v);
            }
            store.push(field(basin_idx), date, &values);
        }

        info!(
            n_rows = store.n_rows(),
            n_basins = store.basin_ids().len(),
            "loaded csv series"
        );
        Ok(Self {
            name: path.display().to_string(),
            store,
        })
    }

    /// Variable columns in header order.
    pub fn variables(&self) -> &[String] {
        self.store.variables()
    }

    /// File the source was read from.
    pub fn path(&self) -> &Path {
        self.store.path()
    }
}

impl SeriesSource for CsvSeriesSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn basin_ids(&self) -> Vec<String> {
        self.store.basin_ids()
    }

    fn contains(&self, basin_id: &str) -> bool {
        self.store.contains(basin_id)
    }

    fn fetch(&self, basin_id: &str, variable: &str) -> Result<Option<Vec<TimePoint>>, IoError> {
        self.store.fetch(basin_id, variable)
    }
}

pub(crate) fn parse_date(field: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(field.trim(), DATE_FORMAT).ok()
}

/// `Some(None)` for a missing value, `None` for unparseable text.
pub(crate) fn parse_value(field: &str) -> Option<Option<f64>> {
    let field = field.trim();
    if field.is_empty() || field.eq_ignore_ascii_case("na") {
        return Some(None);
    }
    field.parse::<f64>().ok().map(|v| v.is_finite().then_some(v))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_parsing() {
        assert_eq!(parse_value("1.5"), Some(Some(1.5)));
        assert_eq!(parse_value(" 2 "), Some(Some(2.0)));
        assert_eq!(parse_value(""), Some(None));
        assert_eq!(parse_value("NA"), Some(None));
        assert_eq!(parse_value("NaN"), Some(None));
        assert_eq!(parse_value("abc"), None);
    }

    #[test]
    fn date_parsing() {
        assert_eq!(parse_date("2021-09-01"), NaiveDate::from_ymd_opt(2021, 9, 1));
        assert_eq!(parse_date("2021-02-30"), None);
        assert_eq!(parse_date("01/09/2021"), None);
    }
}
