//! Integration tests: CSV output and reading parameter tables back.

use approx::assert_relative_eq;
use chrono::NaiveDate;
use hytrend_calendar::{HydroYear, StartMonth};
use hytrend_io::{ALL_TRENDS_FILE, IoError, ResultWriter, WriterConfig, read_parameter_table};
use hytrend_params::{Cell, ExtractConfig, Family, ParameterTable, TimePoint, extract_basin};
use hytrend_trend::{TrendConfig, estimate_trends};

fn swe_table() -> ParameterTable {
    let mut records = Vec::new();
    for (basin, scale) in [("b1", 1.0), ("b2", 2.0)] {
        let first = NaiveDate::from_ymd_opt(2000, 9, 1).unwrap();
        let points: Vec<TimePoint> = first
            .iter_days()
            .take(365 * 4)
            .enumerate()
            .map(|(i, d)| TimePoint::new(d, scale * ((i % 365) as f64).min(150.0)))
            .collect();
        records.extend(extract_basin(basin, &points, &ExtractConfig::new(Family::Swe)).unwrap());
    }
    ParameterTable::from_records(Family::Swe, &records).unwrap()
}

#[test]
fn parameter_files_round_trip() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let writer = ResultWriter::new(WriterConfig::default().with_output_dir(dir.path())).unwrap();
    let table = swe_table();

    let basin_files = writer.write_basin_parameters(&table).unwrap();
    assert_eq!(basin_files.len(), 2);
    assert!(dir.path().join("b1.csv").exists());

    let all = writer.write_all_parameters(&table, "swe").unwrap();
    assert_eq!(all, dir.path().join("swe_params_all_basins.csv"));

    let back = read_parameter_table(&all).unwrap();
    assert_eq!(back.columns(), table.columns());
    assert_eq!(back.len(), table.len());
    assert_eq!(back.basins(), vec!["b1", "b2"]);

    let max_col = back.column_index("max_swe").unwrap();
    let date_col = back.column_index("date_of_max_swe").unwrap();
    for (a, b) in table.rows().iter().zip(back.rows()) {
        assert_eq!(a.hydro_year, b.hydro_year);
        assert_relative_eq!(
            a.cells[max_col].as_f64().unwrap(),
            b.cells[max_col].as_f64().unwrap()
        );
        assert_eq!(a.cells[date_col], b.cells[date_col]);
    }

    let text = std::fs::read_to_string(dir.path().join("b2.csv")).unwrap();
    let header = text.lines().next().unwrap();
    assert!(header.starts_with("basin_id,hydro_year,hydro_year_str,max_swe,date_of_max_swe"));
    assert!(text.lines().nth(1).unwrap().starts_with("b2,2001,2000/01,"));
}

#[test]
fn basin_files_can_be_disabled() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let writer = ResultWriter::new(
        WriterConfig::default()
            .with_output_dir(dir.path())
            .with_basin_files(false),
    )
    .unwrap();
    assert!(writer.write_basin_parameters(&swe_table()).unwrap().is_empty());
}

#[test]
fn annotated_series_file() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let writer = ResultWriter::new(
        WriterConfig::default()
            .with_output_dir(dir.path())
            .with_annotated_series(true),
    )
    .unwrap();
    let points = vec![
        TimePoint::new(NaiveDate::from_ymd_opt(1981, 8, 31).unwrap(), 1.0),
        TimePoint::missing(NaiveDate::from_ymd_opt(1981, 9, 1).unwrap()),
    ];
    let path = writer
        .write_annotated_series("swe", "1001", &points, StartMonth::SEPTEMBER)
        .unwrap()
        .unwrap();
    assert_eq!(path, dir.path().join("swe_1001.csv"));
    let text = std::fs::read_to_string(path).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "date,swe,hydro_year,hydro_year_str");
    assert_eq!(lines[1], "1981-08-31,1,1981,1980/81");
    assert_eq!(lines[2], "1981-09-01,,1982,1981/82");
}

#[test]
fn trend_files() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let writer = ResultWriter::new(WriterConfig::default().with_output_dir(dir.path())).unwrap();
    let table = swe_table();
    let columns = vec!["max_swe".to_string(), "timing_of_max_swe".to_string()];
    let rows = estimate_trends(&table, &columns, &TrendConfig::default()).unwrap();

    let written = writer.write_trends(&rows).unwrap();
    assert_eq!(written.len(), 3);
    assert!(written.last().unwrap().ends_with(ALL_TRENDS_FILE));

    let text = std::fs::read_to_string(dir.path().join("trend_results_max_swe.csv")).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(
        lines[0],
        "basin_id,slope,intercept,p_value,significant,mean,trend_percent"
    );
    assert_eq!(lines.len(), 3);
    assert!(lines[1].starts_with("b1,"));

    let all = std::fs::read_to_string(dir.path().join(ALL_TRENDS_FILE)).unwrap();
    assert_eq!(all.lines().count(), 5);
    assert!(all.lines().next().unwrap().starts_with("column,basin_id,slope"));
}

#[test]
fn empty_trend_set_still_has_header() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let writer = ResultWriter::new(WriterConfig::default().with_output_dir(dir.path())).unwrap();
    let columns = Family::Swe.default_trend_columns();
    let rows = estimate_trends(&ParameterTable::for_family(Family::Swe), &columns, &TrendConfig::default())
        .unwrap();
    assert!(rows.is_empty());

    let written = writer.write_trends(&rows).unwrap();
    assert_eq!(written.len(), 1);
    let text = std::fs::read_to_string(&written[0]).unwrap();
    assert_eq!(
        text,
        "column,basin_id,slope,intercept,p_value,significant,mean,trend_percent,\
         slope_lower,slope_upper,n_valid\n"
    );

    let mut rdr = csv::Reader::from_path(&written[0]).unwrap();
    assert_eq!(rdr.headers().unwrap().len(), 11);
    assert_eq!(rdr.records().count(), 0);
}

#[test]
fn read_rejects_foreign_header() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("x.csv");
    std::fs::write(&path, "site,year,value\na,2000,1\n").unwrap();
    match read_parameter_table(&path).unwrap_err() {
        IoError::Validation { count, .. } => assert_eq!(count, 3),
        other => panic!("expected Validation, got {other:?}"),
    }
}

#[test]
fn read_parses_cells() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("p.csv");
    std::fs::write(
        &path,
        "basin_id,hydro_year,hydro_year_str,a,b,c\n007,1982,1981/82,1.5,,1982-03-01\n",
    )
    .unwrap();
    let t = read_parameter_table(&path).unwrap();
    let row = &t.rows()[0];
    assert_eq!(row.basin_id, "007");
    assert_eq!(row.hydro_year, HydroYear::new(1982));
    assert_eq!(row.cells[0], Cell::Float(1.5));
    assert_eq!(row.cells[1], Cell::Missing);
    assert!(matches!(row.cells[2], Cell::Date(_)));
}
