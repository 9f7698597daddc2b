use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use hytrend_params::Family;
use serde::Deserialize;

/// Top-level hytrend configuration.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HytrendConfig {
    /// Input sources and output location.
    #[serde(default)]
    pub io: IoToml,

    /// Analysis period.
    #[serde(default)]
    pub period: PeriodToml,

    /// Parameter extraction settings.
    #[serde(default)]
    pub extract: ExtractToml,

    /// Trend estimation settings.
    #[serde(default)]
    pub trend: TrendToml,
}

impl HytrendConfig {
    /// Reads and parses a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let toml_str = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        toml::from_str(&toml_str).context("failed to parse TOML config")
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IoToml {
    /// Series files in priority order (CSV or Parquet).
    #[serde(default)]
    pub sources: Vec<PathBuf>,
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    #[serde(default = "default_true")]
    pub basin_files: bool,
    #[serde(default)]
    pub annotated_series: bool,
}

impl Default for IoToml {
    fn default() -> Self {
        Self {
            sources: Vec::new(),
            output_dir: default_output_dir(),
            basin_files: true,
            annotated_series: false,
        }
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("output")
}
fn default_true() -> bool {
    true
}

/// First and last hydrological year, by the calendar year each starts and
/// ends in. Unset bounds leave the series unclipped.
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct PeriodToml {
    pub start_year: Option<i32>,
    pub end_year: Option<i32>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExtractToml {
    #[serde(default = "default_family")]
    pub family: Family,
    /// Column to read from the sources; defaults to the family name.
    #[serde(default)]
    pub variable: Option<String>,
    /// Basins to process; empty means every basin of every source.
    #[serde(default)]
    pub basins: Vec<String>,
    #[serde(default = "default_start_month")]
    pub start_month: u8,
    #[serde(default = "default_constant_snowfall")]
    pub constant_snowfall: String,
}

impl Default for ExtractToml {
    fn default() -> Self {
        Self {
            family: default_family(),
            variable: None,
            basins: Vec::new(),
            start_month: default_start_month(),
            constant_snowfall: default_constant_snowfall(),
        }
    }
}

fn default_family() -> Family {
    Family::Swe
}
fn default_start_month() -> u8 {
    9
}
fn default_constant_snowfall() -> String {
    "monotonic".to_string()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TrendToml {
    /// Columns to analyse; defaults to every numeric column of the family.
    #[serde(default)]
    pub columns: Option<Vec<String>>,
    #[serde(default = "default_significance_level")]
    pub significance_level: f64,
    #[serde(default = "default_confidence")]
    pub confidence: f64,
    #[serde(default = "default_min_points")]
    pub min_points: usize,
}

impl Default for TrendToml {
    fn default() -> Self {
        Self {
            columns: None,
            significance_level: default_significance_level(),
            confidence: default_confidence(),
            min_points: default_min_points(),
        }
    }
}

fn default_significance_level() -> f64 {
    0.05
}
fn default_confidence() -> f64 {
    0.95
}
fn default_min_points() -> usize {
    3
}
