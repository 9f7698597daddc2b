//! Pure conversion functions: TOML config structs -> crate API config types.

use anyhow::{Context, Result, bail};
use hytrend_calendar::{DateWindow, StartMonth};
use hytrend_io::{SeriesLoader, WriterConfig, open_source};
use hytrend_params::{ConstantSnowfallRule, ExtractConfig, Family};
use hytrend_trend::TrendConfig;

use crate::config::*;

/// Builds an [`ExtractConfig`] from the TOML extract configuration.
pub fn build_extract_config(extract: &ExtractToml) -> Result<ExtractConfig> {
    let rule: ConstantSnowfallRule = extract
        .constant_snowfall
        .parse()
        .context("invalid [extract].constant_snowfall")?;
    let cfg = ExtractConfig::new(extract.family)
        .with_start_month(extract.start_month)
        .with_constant_snowfall(rule);
    cfg.validate().context("invalid [extract] settings")?;
    Ok(cfg)
}

/// Source column read for the configured family.
pub fn variable_name(extract: &ExtractToml) -> String {
    extract
        .variable
        .clone()
        .unwrap_or_else(|| extract.family.name().to_string())
}

/// Builds the analysis window from the TOML period, if both bounds are set.
pub fn build_window(period: &PeriodToml, start_month: u8) -> Result<Option<DateWindow>> {
    match (period.start_year, period.end_year) {
        (Some(first), Some(last)) => {
            let start = StartMonth::new(start_month)?;
            let w = DateWindow::from_years(first, last, start)
                .with_context(|| format!("invalid period {first}..{last}"))?;
            Ok(Some(w))
        }
        (None, None) => Ok(None),
        _ => bail!("[period] needs both start_year and end_year, or neither"),
    }
}

/// Opens every configured source in priority order.
pub fn build_loader(io: &IoToml) -> Result<SeriesLoader> {
    if io.sources.is_empty() {
        bail!("no input sources: set [io].sources in config");
    }
    let mut loader = SeriesLoader::new();
    for path in &io.sources {
        let source =
            open_source(path).with_context(|| format!("failed to open source: {}", path.display()))?;
        loader.push(source);
    }
    Ok(loader)
}

/// Builds a [`WriterConfig`] from the TOML I/O configuration.
pub fn build_writer_config(io: &IoToml) -> WriterConfig {
    WriterConfig::default()
        .with_output_dir(&io.output_dir)
        .with_basin_files(io.basin_files)
        .with_annotated_series(io.annotated_series)
}

/// Builds a [`TrendConfig`] from the TOML trend configuration.
pub fn build_trend_config(trend: &TrendToml) -> Result<TrendConfig> {
    let cfg = TrendConfig::default()
        .with_significance_level(trend.significance_level)
        .with_confidence(trend.confidence)
        .with_min_points(trend.min_points);
    cfg.validate().context("invalid [trend] settings")?;
    Ok(cfg)
}

/// Columns to analyse: configured list, or every numeric column of `family`.
pub fn trend_columns(trend: &TrendToml, family: Family) -> Vec<String> {
    trend
        .columns
        .clone()
        .unwrap_or_else(|| family.default_trend_columns())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn extract_config_from_defaults() {
        let cfg = build_extract_config(&ExtractToml::default()).unwrap();
        assert_eq!(cfg.family(), Family::Swe);
        assert_eq!(cfg.start_month(), 9);
        assert_eq!(cfg.constant_snowfall(), ConstantSnowfallRule::MonotonicToPeak);
    }

    #[test]
    fn extract_config_rejects_bad_rule_and_month() {
        let bad_rule = ExtractToml {
            constant_snowfall: "sometimes".into(),
            ..ExtractToml::default()
        };
        assert!(build_extract_config(&bad_rule).is_err());
        let bad_month = ExtractToml {
            start_month: 0,
            ..ExtractToml::default()
        };
        assert!(build_extract_config(&bad_month).is_err());
    }

    #[test]
    fn variable_defaults_to_family() {
        let mut e = ExtractToml::default();
        assert_eq!(variable_name(&e), "swe");
        e.variable = Some("SWE_mm".into());
        assert_eq!(variable_name(&e), "SWE_mm");
    }

    #[test]
    fn window_needs_both_bounds() {
        let both = PeriodToml {
            start_year: Some(1980),
            end_year: Some(2024),
        };
        let w = build_window(&both, 9).unwrap().unwrap();
        assert_eq!(w.start().to_string(), "1980-09-01");
        assert_eq!(w.end().to_string(), "2024-08-31");
        assert!(build_window(&PeriodToml::default(), 9).unwrap().is_none());
        let half = PeriodToml {
            start_year: Some(1980),
            end_year: None,
        };
        assert!(build_window(&half, 9).is_err());
    }

    #[test]
    fn loader_requires_sources() {
        assert!(build_loader(&IoToml::default()).is_err());
        let missing = IoToml {
            sources: vec![PathBuf::from("/nonexistent/series.csv")],
            ..IoToml::default()
        };
        assert!(build_loader(&missing).is_err());
    }

    #[test]
    fn trend_settings() {
        let t = TrendToml::default();
        assert!(build_trend_config(&t).is_ok());
        assert_eq!(trend_columns(&t, Family::Swe).len(), 31);
        let bad = TrendToml {
            confidence: 1.5,
            ..TrendToml::default()
        };
        assert!(build_trend_config(&bad).is_err());
    }
}
