//! Reads parameter CSV files back into a [`ParameterTable`].

use std::path::Path;

use csv::ReaderBuilder;
use hytrend_calendar::HydroYear;
use hytrend_params::{Cell, KEY_COLUMNS, ParameterTable, TableRow};
use tracing::info;

use crate::error::IoError;
use crate::validate::Problems;

/// Reads a parameter file written by
/// [`ResultWriter`](crate::ResultWriter).
///
/// The header must start with `basin_id,hydro_year,hydro_year_str`; every
/// later column becomes a value column. Fields are typed by
/// [`Cell::parse`], except `basin_id` which is always kept as text.
///
/// # Errors
///
/// - [`IoError::FileNotFound`] if `path` does not exist.
/// - [`IoError::Validation`] if the key columns are missing or misplaced.
/// - [`IoError::InvalidValue`] for a non-integer `hydro_year`.
/// - [`IoError::Csv`] / [`IoError::Params`] for malformed rows.
#[tracing::instrument(skip_all, fields(path = %path.display()))]
pub fn read_parameter_table(path: &Path) -> Result<ParameterTable, IoError> {
    if !path.exists() {
        return Err(IoError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let mut rdr = ReaderBuilder::new().has_headers(true).from_path(path)?;
    let header: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();

    let mut p = Problems::default();
    for (i, key) in KEY_COLUMNS.iter().enumerate() {
        match header.get(i) {
            Some(h) if h == key => {}
            Some(h) => p.note(format!("column {i}: expected '{key}', got '{h}'")),
            None => p.note(format!("column {i}: expected '{key}', header too short")),
        }
    }
    p.into_result()?;

    let mut table = ParameterTable::new(header[KEY_COLUMNS.len()..].to_vec());
    for (i, record) in rdr.records().enumerate() {
        let record = record?;
        let year_field = record.get(1).unwrap_or("").trim();
        let year: i32 = year_field.parse().map_err(|_| IoError::InvalidValue {
            value: year_field.to_string(),
            column: KEY_COLUMNS[1].to_string(),
            row: i + 1,
            path: path.to_path_buf(),
        })?;
        table.push(TableRow {
            basin_id: record.get(0).unwrap_or("").to_string(),
            hydro_year: HydroYear::new(year),
            cells: record.iter().skip(KEY_COLUMNS.len()).map(Cell::parse).collect(),
        })?;
    }
    info!(n_rows = table.len(), n_columns = table.columns().len(), "read parameter table");
    Ok(table)
}
