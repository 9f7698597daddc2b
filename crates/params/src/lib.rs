//! # hytrend-params
//!
//! Per-hydrological-year parameter extraction for basin time series.
//!
//! A basin's daily series is split into [`BasinYearGroup`]s, one per
//! hydrological year, and each group is reduced to a typed record by the
//! extractor of its variable family. Records of one family share a fixed
//! column layout, so they flatten into a [`ParameterTable`] that the trend
//! estimator and the writers consume without knowing the family.
//!
//! ## Architecture
//!
//! ```mermaid
//! graph LR
//!     A["&[TimePoint]"] -->|"group_by_hydro_year()"| B["Vec&lt;BasinYearGroup&gt;"]
//!     B -->|"WindowSummary"| C{"Family"}
//!     C -->|Swe| D["SweParameters"]
//!     C -->|Precipitation| E["PrecipParameters"]
//!     C -->|Discharge| F["DischargeParameters"]
//!     D & E & F --> G["ParameterRecord"]
//!     G -->|"ParameterTable::from_records()"| H["ParameterTable"]
//! ```
//!
//! ## Quick Start
//!
//! ```ignore
//! use hytrend_params::{ExtractConfig, Family, ParameterTable, extract_basin};
//!
//! let config = ExtractConfig::new(Family::Swe).with_start_month(9);
//! let records = extract_basin("basin_1", &points, &config)?;
//! let table = ParameterTable::from_records(Family::Swe, &records)?;
//! ```
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `series` | Dated points, hydro-year assignment and grouping |
//! | `group` | One basin's observations for one hydrological year |
//! | `window` | Count, sum, mean and extremes over any date window |
//! | `swe` | Peak, melt, accumulation and summer snowfall |
//! | `precip` | Totals, seasonality, monthly variability, PCI |
//! | `discharge` | Extremes, volume and seasonal flow |
//! | `record` | Families, typed records and column generation |
//! | `table` | Rectangular table of records |
//! | `cell` | Nullable table values |
//! | `config` | Extraction configuration |
//! | `extract` | Per-group and per-basin drivers |
//! | `error` | Error types |

mod cell;
mod config;
mod discharge;
mod error;
mod extract;
mod group;
mod precip;
mod record;
mod series;
mod swe;
mod table;
mod window;

pub use cell::{Cell, DATE_FORMAT};
pub use config::{ConstantSnowfallRule, ExtractConfig};
pub use discharge::{DischargeParameters, SeasonalDischarge, extract_discharge};
pub use error::ParamsError;
pub use extract::{extract_basin, extract_group};
pub use group::BasinYearGroup;
pub use precip::{PrecipParameters, PrecipWindow, extract_precipitation};
pub use record::{Family, ParameterRecord, ParameterRow, ParameterSet};
pub use series::{HydroPoint, TimePoint, assign_hydro_years, flatten_groups, group_by_hydro_year};
pub use swe::{
    Accumulation, AccumulationWindow, MeltThreshold, SeasonalSwe, SummerSnowfall, SweParameters,
    extract_swe,
};
pub use table::{KEY_COLUMNS, ParameterTable, TableRow};
pub use window::{Extremum, MonthContrast, WindowSummary, annual, month_contrast, monthly, seasonal};
