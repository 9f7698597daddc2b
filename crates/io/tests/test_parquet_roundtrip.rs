//! Integration tests: series read from Parquet files.

use std::path::Path;
use std::sync::Arc;

use arrow::array::{ArrayRef, Date32Array, Float64Array, Int64Array, RecordBatch, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use chrono::NaiveDate;
use hytrend_io::{IoError, ParquetSeriesSource, SeriesLoader, SeriesSource};
use parquet::arrow::ArrowWriter;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn days_since_epoch(d: NaiveDate) -> i32 {
    (d - NaiveDate::from_ymd_opt(1970, 1, 1).unwrap()).num_days() as i32
}

fn write_batch(path: &Path, batch: &RecordBatch) {
    let file = std::fs::File::create(path).expect("create file");
    let mut writer = ArrowWriter::try_new(file, batch.schema(), None).expect("writer");
    writer.write(batch).expect("write batch");
    writer.close().expect("close writer");
}

#[test]
fn date32_and_nulls() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("series.parquet");

    let schema = Arc::new(Schema::new(vec![
        Field::new("basin_id", DataType::Int64, false),
        Field::new("date", DataType::Date32, false),
        Field::new("discharge", DataType::Float64, true),
    ]));
    let dates = [date(2010, 9, 1), date(2010, 9, 2), date(2010, 9, 1)];
    let columns: Vec<ArrayRef> = vec![
        Arc::new(Int64Array::from(vec![7, 7, 8])),
        Arc::new(Date32Array::from(
            dates.iter().map(|d| days_since_epoch(*d)).collect::<Vec<_>>(),
        )),
        Arc::new(Float64Array::from(vec![Some(1.5), None, Some(f64::NAN)])),
    ];
    write_batch(&path, &RecordBatch::try_new(schema, columns).unwrap());

    let src = ParquetSeriesSource::open(&path).expect("open succeeds");
    assert_eq!(src.variables(), ["discharge"]);
    assert_eq!(src.basin_ids(), vec!["7", "8"]);

    let q7 = src.fetch("7", "discharge").unwrap().unwrap();
    assert_eq!(q7.len(), 2);
    assert_eq!(q7[0].date, date(2010, 9, 1));
    assert_eq!(q7[0].value, Some(1.5));
    assert_eq!(q7[1].value, None);

    let q8 = src.fetch("8", "discharge").unwrap().unwrap();
    assert_eq!(q8[0].value, None);
}

#[test]
fn string_dates_through_loader() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("series.parquet");

    let schema = Arc::new(Schema::new(vec![
        Field::new("basin_id", DataType::Utf8, false),
        Field::new("date", DataType::Utf8, false),
        Field::new("swe", DataType::Float64, false),
    ]));
    let columns: Vec<ArrayRef> = vec![
        Arc::new(StringArray::from(vec!["a", "a", "a"])),
        Arc::new(StringArray::from(vec!["2001-01-03", "2001-01-01", "2001-01-02"])),
        Arc::new(Float64Array::from(vec![3.0, 1.0, 2.0])),
    ];
    write_batch(&path, &RecordBatch::try_new(schema, columns).unwrap());

    let loader = SeriesLoader::new().with_source(ParquetSeriesSource::open(&path).unwrap());
    let swe = loader.get_series("a", "swe", None).unwrap().unwrap();
    let values: Vec<Option<f64>> = swe.iter().map(|p| p.value).collect();
    assert_eq!(values, vec![Some(1.0), Some(2.0), Some(3.0)]);
}

#[test]
fn bad_string_date_is_rejected() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("series.parquet");
    let schema = Arc::new(Schema::new(vec![
        Field::new("basin_id", DataType::Utf8, false),
        Field::new("date", DataType::Utf8, false),
        Field::new("swe", DataType::Float64, false),
    ]));
    let columns: Vec<ArrayRef> = vec![
        Arc::new(StringArray::from(vec!["a"])),
        Arc::new(StringArray::from(vec!["yesterday"])),
        Arc::new(Float64Array::from(vec![1.0])),
    ];
    write_batch(&path, &RecordBatch::try_new(schema, columns).unwrap());
    assert!(matches!(
        ParquetSeriesSource::open(&path),
        Err(IoError::InvalidDate { row: 1, .. })
    ));
}

#[test]
fn missing_date_column_is_rejected() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("series.parquet");
    let schema = Arc::new(Schema::new(vec![
        Field::new("basin_id", DataType::Utf8, false),
        Field::new("swe", DataType::Float64, false),
    ]));
    let columns: Vec<ArrayRef> = vec![
        Arc::new(StringArray::from(vec!["a"])),
        Arc::new(Float64Array::from(vec![1.0])),
    ];
    write_batch(&path, &RecordBatch::try_new(schema, columns).unwrap());
    assert!(matches!(
        ParquetSeriesSource::open(&path),
        Err(IoError::Validation { count: 1, .. })
    ));
}
