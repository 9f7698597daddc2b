use approx::assert_relative_eq;
use chrono::NaiveDate;
use hytrend_calendar::{HydroYear, StartMonth, day_of_hydro_year};
use hytrend_params::{
    Cell, ExtractConfig, Family, ParameterTable, TableRow, TimePoint, extract_basin,
};
use hytrend_trend::{TrendConfig, TrendError, estimate_trends};

fn table(rows: &[(&str, i32, f64)]) -> ParameterTable {
    let mut t = ParameterTable::new(vec!["value".into(), "when".into()]);
    for &(basin, year, v) in rows {
        t.push(TableRow {
            basin_id: basin.into(),
            hydro_year: HydroYear::new(year),
            cells: vec![Cell::from(v), Cell::Missing],
        })
        .unwrap();
    }
    t
}

// ---------------------------------------------------------------------------
// Known series
// ---------------------------------------------------------------------------

#[test]
fn twenty_year_sawtooth() {
    let saw = [0.0, 3.0, -2.0, 1.0, -1.0];
    let rows: Vec<(&str, i32, f64)> = (0..20)
        .map(|i| ("b", 2000 + i, 0.5 * f64::from(i) + saw[i as usize % 5]))
        .collect();
    let t = table(&rows);
    let out = estimate_trends(&t, &["value".to_string()], &TrendConfig::default()).unwrap();
    assert_eq!(out.len(), 1);
    let r = &out[0];
    assert_relative_eq!(r.slope.unwrap(), 0.5);
    assert_relative_eq!(r.intercept.unwrap(), -999.75);
    assert_relative_eq!(r.p_value.unwrap(), 4.7336364187966495e-5, max_relative = 1e-6);
    assert!(r.significant);
    assert_relative_eq!(r.mean.unwrap(), 4.95);
    assert_relative_eq!(r.trend_percent.unwrap(), 0.5 / 4.95);
    assert_eq!(r.n_valid, 20);
}

#[test]
fn output_order_is_column_then_basin() {
    let mut t = ParameterTable::new(vec!["a".into(), "b".into()]);
    for (basin, year) in [("z", 2000), ("y", 2000), ("z", 2001), ("y", 2001)] {
        t.push(TableRow {
            basin_id: basin.into(),
            hydro_year: HydroYear::new(year),
            cells: vec![Cell::Float(1.0), Cell::Int(2)],
        })
        .unwrap();
    }
    let cols = vec!["b".to_string(), "a".to_string()];
    let out = estimate_trends(&t, &cols, &TrendConfig::default()).unwrap();
    let order: Vec<(&str, &str)> = out
        .iter()
        .map(|r| (r.column.as_str(), r.basin_id.as_str()))
        .collect();
    assert_eq!(order, vec![("b", "z"), ("b", "y"), ("a", "z"), ("a", "y")]);
    // Two years each: below the minimum.
    assert!(out.iter().all(|r| r.slope.is_none() && !r.significant));
}

#[test]
fn missing_years_are_dropped() {
    let t = table(&[("b", 2000, 1.0), ("b", 2001, f64::NAN), ("b", 2002, 3.0), ("b", 2003, 4.0)]);
    let out = estimate_trends(&t, &["value".to_string()], &TrendConfig::default()).unwrap();
    assert_eq!(out[0].n_valid, 3);
    assert!(out[0].slope.is_some());
}

// ---------------------------------------------------------------------------
// Schema errors
// ---------------------------------------------------------------------------

#[test]
fn unknown_column_is_fatal() {
    let t = table(&[("b", 2000, 1.0)]);
    let err = estimate_trends(&t, &["nope".to_string()], &TrendConfig::default()).unwrap_err();
    assert_eq!(
        err,
        TrendError::SchemaMismatch {
            column: "nope".into(),
            available: 2
        }
    );
}

#[test]
fn date_column_is_fatal() {
    let mut t = ParameterTable::new(vec!["d".into()]);
    t.push(TableRow {
        basin_id: "b".into(),
        hydro_year: HydroYear::new(2000),
        cells: vec![Cell::Date(NaiveDate::from_ymd_opt(2000, 1, 1).unwrap())],
    })
    .unwrap();
    let err = estimate_trends(&t, &["d".to_string()], &TrendConfig::default()).unwrap_err();
    assert!(matches!(err, TrendError::NonNumericColumn { .. }));
}

#[test]
fn all_missing_column_gives_null_rows() {
    let t = table(&[("b", 2000, 1.0), ("b", 2001, 2.0), ("b", 2002, 3.0)]);
    let out = estimate_trends(&t, &["when".to_string()], &TrendConfig::default()).unwrap();
    assert_eq!(out[0].n_valid, 0);
    assert_eq!(out[0].mean, None);
}

// ---------------------------------------------------------------------------
// End to end
// ---------------------------------------------------------------------------

#[test]
fn forty_five_years_of_swe_trends() {
    let first = NaiveDate::from_ymd_opt(1975, 9, 1).unwrap();
    let last = NaiveDate::from_ymd_opt(2020, 8, 31).unwrap();
    let points: Vec<TimePoint> = first
        .iter_days()
        .take_while(|d| *d <= last)
        .map(|d| {
            let day = f64::from(day_of_hydro_year(d, StartMonth::SEPTEMBER));
            let year = f64::from(HydroYear::from_date(d, StartMonth::SEPTEMBER).year() - 1976);
            let v = if (60.0..=300.0).contains(&day) {
                (150.0 - year) * (std::f64::consts::PI * (day - 60.0) / 240.0).sin()
            } else {
                0.0
            };
            TimePoint::new(d, v.max(0.0))
        })
        .collect();

    let records = extract_basin("alpine", &points, &ExtractConfig::new(Family::Swe)).unwrap();
    assert_eq!(records.len(), 45);
    let t = ParameterTable::from_records(Family::Swe, &records).unwrap();

    let columns = Family::Swe.default_trend_columns();
    let out = estimate_trends(&t, &columns, &TrendConfig::default()).unwrap();
    assert_eq!(out.len(), columns.len());

    let max_swe = out.iter().find(|r| r.column == "max_swe").unwrap();
    assert!(max_swe.slope.unwrap() < 0.0);
    assert!(max_swe.significant);
}
