//! Long-format Parquet series, same columns as the CSV layout.

use std::path::Path;

use arrow::array::{Array, AsArray, RecordBatch};
use arrow::compute::cast;
use arrow::datatypes::{DataType, Date32Type, Float64Type};
use chrono::NaiveDate;
use hytrend_params::TimePoint;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use tracing::info;

use crate::csv_source::parse_date;
use crate::error::IoError;
use crate::source::{BASIN_COLUMN, DATE_COLUMN, SeriesSource, SeriesStore};
use crate::validate::require_columns;

/// Reads all record batches from a Parquet file.
///
/// # Errors
///
/// Returns [`IoError::FileNotFound`] if the file does not exist, or
/// [`IoError::Parquet`] if the file cannot be opened or read.
pub(crate) fn read_batches(path: &Path) -> Result<Vec<RecordBatch>, IoError> {
    if !path.exists() {
        return Err(IoError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let file = std::fs::File::open(path).map_err(|e| IoError::io(path, &e))?;
    let reader = ParquetRecordBatchReaderBuilder::try_new(file)?.build()?;
    let batches = reader.collect::<Result<Vec<_>, _>>()?;
    Ok(batches)
}

/// A Parquet file of daily values for many basins, loaded wholesale.
///
/// `basin_id` may be any type castable to a string, `date` is either
/// `Date32` or an ISO string, and every other column is cast to `Float64`.
/// Nulls and non-finite values are missing.
#[derive(Debug, Clone)]
pub struct ParquetSeriesSource {
    name: String,
    store: SeriesStore,
}

impl ParquetSeriesSource {
    /// Reads the whole file.
    ///
    /// # Errors
    ///
    /// - [`IoError::FileNotFound`] if `path` does not exist.
    /// - [`IoError::Validation`] if `basin_id` or `date` is missing.
    /// - [`IoError::InvalidDate`] for a null or malformed date.
    /// - [`IoError::Parquet`] if decoding or casting fails.
    #[tracing::instrument(skip_all, fields(path = %path.display()))]
    pub fn open(path: &Path) -> Result<Self, IoError> {
        let batches = read_batches(path)?;

        let Some(first) = batches.first() else {
            info!("empty parquet file");
            return Ok(Self {
                name: path.display().to_string(),
                store: SeriesStore::new(path, Vec::new()),
            });
        };
        let schema = first.schema();
        let header: Vec<String> = schema.fields().iter().map(|f| f.name().clone()).collect();
        require_columns(&header, &[BASIN_COLUMN, DATE_COLUMN]).into_result()?;
        let variables: Vec<String> = header
            .iter()
            .filter(|h| *h != BASIN_COLUMN && *h != DATE_COLUMN)
            .cloned()
            .collect();

        let mut store = SeriesStore::new(path, variables.clone());
        let mut row_offset = 0;
        for batch in &batches {
            append_batch(&mut store, batch, &variables, row_offset, path)?;
            row_offset += batch.num_rows();
        }

        info!(
            n_rows = store.n_rows(),
            n_basins = store.basin_ids().len(),
            "loaded parquet series"
        );
        Ok(Self {
            name: path.display().to_string(),
            store,
        })
    }

    /// Variable columns in schema order.
    pub fn variables(&self) -> &[String] {
        self.store.variables()
    }
}

fn column<'a>(batch: &'a RecordBatch, name: &str, path: &Path) -> Result<&'a dyn Array, IoError> {
    batch
        .column_by_name(name)
        .map(|c| c.as_ref())
        .ok_or_else(|| IoError::MissingColumn {
            name: name.to_string(),
            path: path.to_path_buf(),
        })
}

fn append_batch(
    store: &mut SeriesStore,
    batch: &RecordBatch,
    variables: &[String],
    row_offset: usize,
    path: &Path,
) -> Result<(), IoError> {
    let basins = cast(column(batch, BASIN_COLUMN, path)?, &DataType::Utf8)?;
    let basins = basins.as_string::<i32>();

    let date_col = column(batch, DATE_COLUMN, path)?;
    let dates: Vec<Option<NaiveDate>> = match date_col.data_type() {
        DataType::Date32 => {
            let arr = date_col.as_primitive::<Date32Type>();
            (0..arr.len())
                .map(|i| if arr.is_null(i) { None } else { arr.value_as_date(i) })
                .collect()
        }
        _ => {
            let strings = cast(date_col, &DataType::Utf8)?;
            let arr = strings.as_string::<i32>();
            (0..arr.len())
                .map(|i| if arr.is_null(i) { None } else { parse_date(arr.value(i)) })
                .collect()
        }
    };

    let mut value_cols = Vec::with_capacity(variables.len());
    for v in variables {
        value_cols.push(cast(column(batch, v, path)?, &DataType::Float64)?);
    }
    let value_cols: Vec<_> = value_cols
        .iter()
        .map(|c| c.as_primitive::<Float64Type>())
        .collect();

    let mut values = Vec::with_capacity(variables.len());
    for (row, date) in dates.into_iter().enumerate() {
        let Some(date) = date else {
            return Err(IoError::InvalidDate {
                value: String::new(),
                row: row_offset + row + 1,
                path: path.to_path_buf(),
            });
        };
        values.clear();
        values.extend(
            value_cols
                .iter()
                .map(|c| if c.is_null(row) { None } else { Some(c.value(row)) }),
        );
        let basin = if basins.is_null(row) { "" } else { basins.value(row) };
        store.push(basin, date, &values);
    }
    Ok(())
}

impl SeriesSource for ParquetSeriesSource {
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
