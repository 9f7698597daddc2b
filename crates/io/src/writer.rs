//! CSV output of parameter tables, annotated series and trend results.

use std::path::{Path, PathBuf};

use csv::{Writer, WriterBuilder};
use hytrend_calendar::{HydroYear, StartMonth};
use hytrend_params::{DATE_FORMAT, KEY_COLUMNS, ParameterTable, TableRow, TimePoint};
use hytrend_trend::TrendRow;
use serde::Serialize;
use tracing::{debug, info};

use crate::error::IoError;
use crate::validate::Problems;

/// File name of the combined trend table.
pub const ALL_TRENDS_FILE: &str = "trend_results_all.csv";

/// Header of a per-column trend file; field order of [`ColumnTrendRecord`].
const COLUMN_TREND_HEADER: [&str; 7] = [
    "basin_id",
    "slope",
    "intercept",
    "p_value",
    "significant",
    "mean",
    "trend_percent",
];

/// Header of [`ALL_TRENDS_FILE`]; field order of [`TrendRecord`].
const TREND_HEADER: [&str; 11] = [
    "column",
    "basin_id",
    "slope",
    "intercept",
    "p_value",
    "significant",
    "mean",
    "trend_percent",
    "slope_lower",
    "slope_upper",
    "n_valid",
];

/// Configuration for [`ResultWriter`].
#[derive(Debug, Clone)]
pub struct WriterConfig {
    /// Directory every file is written into.
    output_dir: PathBuf,
    /// Whether to write one parameter file per basin.
    basin_files: bool,
    /// Whether to write the annotated input series per basin.
    annotated_series: bool,
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("output"),
            basin_files: true,
            annotated_series: false,
        }
    }
}

impl WriterConfig {
    /// Sets the output directory.
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Enables or disables per-basin parameter files.
    pub fn with_basin_files(mut self, enabled: bool) -> Self {
        self.basin_files = enabled;
        self
    }

    /// Enables or disables annotated series files.
    pub fn with_annotated_series(mut self, enabled: bool) -> Self {
        self.annotated_series = enabled;
        self
    }

    /// Returns the output directory.
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Returns whether per-basin parameter files are written.
    pub fn basin_files(&self) -> bool {
        self.basin_files
    }

    /// Returns whether annotated series files are written.
    pub fn annotated_series(&self) -> bool {
        self.annotated_series
    }

    /// Validates this configuration.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::Validation`] if the output directory is empty or
    /// names an existing regular file.
    pub fn validate(&self) -> Result<(), IoError> {
        let mut p = Problems::default();
        if self.output_dir.as_os_str().is_empty() {
            p.note("output_dir must not be empty");
        } else {
            p.check(!self.output_dir.is_file(), || {
                format!("output_dir {} is a file", self.output_dir.display())
            });
        }
        p.into_result()
    }
}

/// Writes result tables as CSV into one output directory.
#[derive(Debug, Clone)]
pub struct ResultWriter {
    config: WriterConfig,
}

impl ResultWriter {
    /// Validates `config` and creates the output directory.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::Validation`] for an invalid configuration or
    /// [`IoError::Io`] if the directory cannot be created.
    pub fn new(config: WriterConfig) -> Result<Self, IoError> {
        config.validate()?;
        std::fs::create_dir_all(&config.output_dir)
            .map_err(|e| IoError::io(&config.output_dir, &e))?;
        Ok(Self { config })
    }

    /// The configuration in use.
    pub fn config(&self) -> &WriterConfig {
        &self.config
    }

    fn path(&self, file_name: &str) -> PathBuf {
        self.config.output_dir.join(file_name)
    }

    /// Writes every basin's rows to `<basin_id>.csv`, if enabled.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::Csv`] or [`IoError::Io`] on write failure.
    pub fn write_basin_parameters(&self, table: &ParameterTable) -> Result<Vec<PathBuf>, IoError> {
        if !self.config.basin_files {
            return Ok(Vec::new());
        }
        let mut written = Vec::new();
        for basin in table.basins() {
            let path = self.path(&format!("{basin}.csv"));
            write_parameter_rows(&path, table.columns(), table.basin_rows(basin))?;
            written.push(path);
        }
        debug!(n_files = written.len(), "wrote per-basin parameter files");
        Ok(written)
    }

    /// Writes the whole table to `<variable>_params_all_basins.csv`.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::Csv`] or [`IoError::Io`] on write failure.
    pub fn write_all_parameters(
        &self,
        table: &ParameterTable,
        variable: &str,
    ) -> Result<PathBuf, IoError> {
        let path = self.path(&format!("{variable}_params_all_basins.csv"));
        write_parameter_table(&path, table)?;
        info!(path = %path.display(), n_rows = table.len(), "wrote parameter table");
        Ok(path)
    }

    /// Writes `date,<variable>,hydro_year,hydro_year_str` to
    /// `<variable>_<basin_id>.csv`, if enabled.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::Csv`] or [`IoError::Io`] on write failure.
    pub fn write_annotated_series(
        &self,
        variable: &str,
        basin_id: &str,
        points: &[TimePoint],
        start: StartMonth,
    ) -> Result<Option<PathBuf>, IoError> {
        if !self.config.annotated_series {
            return Ok(None);
        }
        let path = self.path(&format!("{variable}_{basin_id}.csv"));
        let mut w = create(&path)?;
        w.write_record(["date", variable, "hydro_year", "hydro_year_str"])?;
        for p in points {
            let hy = HydroYear::from_date(p.date, start);
            w.write_record([
                p.date.format(DATE_FORMAT).to_string(),
                p.value.map(|v| v.to_string()).unwrap_or_default(),
                hy.year().to_string(),
                hy.label(),
            ])?;
        }
        finish(w, &path)?;
        Ok(Some(path))
    }

    /// Writes one `trend_results_<column>.csv` per column plus
    /// [`ALL_TRENDS_FILE`] holding every row.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::Csv`] or [`IoError::Io`] on write failure.
    pub fn write_trends(&self, rows: &[TrendRow]) -> Result<Vec<PathBuf>, IoError> {
        let mut columns: Vec<&str> = Vec::new();
        for r in rows {
            if !columns.contains(&r.column.as_str()) {
                columns.push(&r.column);
            }
        }

        let mut written = Vec::with_capacity(columns.len() + 1);
        for column in columns {
            let path = self.path(&format!("trend_results_{column}.csv"));
            let mut w = create_with_header(&path, &COLUMN_TREND_HEADER)?;
            for r in rows.iter().filter(|r| r.column == column) {
                w.serialize(ColumnTrendRecord::from(r))?;
            }
            finish(w, &path)?;
            written.push(path);
        }

        let path = self.path(ALL_TRENDS_FILE);
        let mut w = create_with_header(&path, &TREND_HEADER)?;
        for r in rows {
            w.serialize(TrendRecord::from(r))?;
        }
        finish(w, &path)?;
        info!(path = %path.display(), n_rows = rows.len(), "wrote trend results");
        written.push(path);
        Ok(written)
    }
}

/// One row of a per-column trend file.
#[derive(Debug, Serialize)]
struct ColumnTrendRecord<'a> {
    basin_id: &'a str,
    slope: Option<f64>,
    intercept: Option<f64>,
    p_value: Option<f64>,
    significant: bool,
    mean: Option<f64>,
    trend_percent: Option<f64>,
}

impl<'a> From<&'a TrendRow> for ColumnTrendRecord<'a> {
    fn from(r: &'a TrendRow) -> Self {
        Self {
            basin_id: &r.basin_id,
            slope: r.slope,
            intercept: r.intercept,
            p_value: r.p_value,
            significant: r.significant,
            mean: r.mean,
            trend_percent: r.trend_percent,
        }
    }
}

/// One row of the combined trend file.
#[derive(Debug, Serialize)]
struct TrendRecord<'a> {
    column: &'a str,
    basin_id: &'a str,
    slope: Option<f64>,
    intercept: Option<f64>,
    p_value: Option<f64>,
    significant: bool,
    mean: Option<f64>,
    trend_percent: Option<f64>,
    slope_lower: Option<f64>,
    slope_upper: Option<f64>,
    n_valid: usize,
}

impl<'a> From<&'a TrendRow> for TrendRecord<'a> {
    fn from(r: &'a TrendRow) -> Self {
        Self {
            column: &r.column,
            basin_id: &r.basin_id,
            slope: r.slope,
            intercept: r.intercept,
            p_value: r.p_value,
            significant: r.significant,
            mean: r.mean,
            trend_percent: r.trend_percent,
            slope_lower: r.interval.map(|(lo, _)| lo),
            slope_upper: r.interval.map(|(_, hi)| hi),
            n_valid: r.n_valid,
        }
    }
}

/// Writes a whole parameter table to `path`.
///
/// # Errors
///
/// Returns [`IoError::Csv`] or [`IoError::Io`] on write failure.
pub fn write_parameter_table(path: &Path, table: &ParameterTable) -> Result<(), IoError> {
    write_parameter_rows(path, table.columns(), table.rows().iter())
}

fn write_parameter_rows<'a>(
    path: &Path,
    columns: &[String],
    rows: impl Iterator<Item = &'a TableRow>,
) -> Result<(), IoError> {
    let mut w = create(path)?;
    w.write_record(KEY_COLUMNS.iter().copied().chain(columns.iter().map(String::as_str)))?;
    for row in rows {
        let keys = [
            row.basin_id.clone(),
            row.hydro_year.year().to_string(),
            row.hydro_year.label(),
        ];
        w.write_record(keys.into_iter().chain(row.cells.iter().map(ToString::to_string)))?;
    }
    finish(w, path)
}

fn create(path: &Path) -> Result<Writer<std::fs::File>, IoError> {
    Writer::from_path(path).map_err(IoError::from)
}

/// Writer whose header is `header` even when no record follows.
fn create_with_header(path: &Path, header: &[&str]) -> Result<Writer<std::fs::File>, IoError> {
    let mut w = WriterBuilder::new().has_headers(false).from_path(path)?;
    w.write_record(header)?;
    Ok(w)
}

fn finish(mut w: Writer<std::fs::File>, path: &Path) -> Result<(), IoError> {
    w.flush().map_err(|e| IoError::io(path, &e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let config = WriterConfig::default();
        assert_eq!(config.output_dir(), Path::new("output"));
        assert!(config.basin_files());
        assert!(!config.annotated_series());
    }

    #[test]
    fn builder_methods() {
        let config = WriterConfig::default()
            .with_output_dir("/tmp/results")
            .with_basin_files(false)
            .with_annotated_series(true);
        assert_eq!(config.output_dir(), Path::new("/tmp/results"));
        assert!(!config.basin_files());
        assert!(config.annotated_series());
    }

    #[test]
    fn trend_headers_match_record_fields() {
        let row = TrendRow {
            basin_id: "b".into(),
            column: "c".into(),
            slope: None,
            intercept: None,
            p_value: None,
            significant: false,
            mean: None,
            trend_percent: None,
            interval: None,
            n_valid: 0,
        };
        let mut w = Writer::from_writer(Vec::new());
        w.serialize(TrendRecord::from(&row)).unwrap();
        let text = String::from_utf8(w.into_inner().unwrap()).unwrap();
        assert_eq!(text.lines().next(), Some(TREND_HEADER.join(",").as_str()));

        let mut w = Writer::from_writer(Vec::new());
        w.serialize(ColumnTrendRecord::from(&row)).unwrap();
        let text = String::from_utf8(w.into_inner().unwrap()).unwrap();
        assert_eq!(text.lines().next(), Some(COLUMN_TREND_HEADER.join(",").as_str()));
    }

    #[test]
    fn validate_empty_output_dir() {
        let err = WriterConfig::default().with_output_dir("").validate().unwrap_err();
        match err {
            IoError::Validation { count, details } => {
                assert_eq!(count, 1);
                assert!(details.contains("output_dir"));
            }
            other => panic!("expected Validation error, got {other:?}"),
        }
    }
}
