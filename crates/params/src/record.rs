//! Typed parameter records and the variable families that produce them.

use std::fmt;
use std::str::FromStr;

use hytrend_calendar::HydroYear;
use serde::{Deserialize, Serialize};

use crate::cell::Cell;
use crate::discharge::DischargeParameters;
use crate::error::ParamsError;
use crate::precip::PrecipParameters;
use crate::swe::SweParameters;

/// A named, ordered set of per-year parameters.
///
/// The column list is derived from `fields()` of the all-null default, so a
/// family's header and its rows come from the same code path.
pub trait ParameterSet: Default {
    /// Column names paired with values, in output order.
    fn fields(&self) -> Vec<(String, Cell)>;

    /// Column names in output order.
    fn columns() -> Vec<String> {
        Self::default().fields().into_iter().map(|(n, _)| n).collect()
    }

    /// Values in output order.
    fn cells(&self) -> Vec<Cell> {
        self.fields().into_iter().map(|(_, c)| c).collect()
    }
}

/// Variable family, selecting which extractor runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Family {
    /// Snow water equivalent.
    #[serde(alias = "snow")]
    Swe,
    /// Precipitation.
    #[serde(alias = "precip", alias = "rain")]
    Precipitation,
    /// River discharge.
    #[serde(alias = "riverdischarge")]
    Discharge,
}

impl Family {
    /// All families.
    pub const ALL: [Family; 3] = [Family::Swe, Family::Precipitation, Family::Discharge];

    /// Lower-case name.
    pub fn name(self) -> &'static str {
        match self {
            Family::Swe => "swe",
            Family::Precipitation => "precipitation",
            Family::Discharge => "discharge",
        }
    }

    /// Value columns of this family, without the key columns.
    pub fn columns(self) -> Vec<String> {
        match self {
            Family::Swe => SweParameters::columns(),
            Family::Precipitation => PrecipParameters::columns(),
            Family::Discharge => DischargeParameters::columns(),
        }
    }

    /// Every numeric column, i.e. every column that does not hold a date.
    pub fn default_trend_columns(self) -> Vec<String> {
        self.columns()
            .into_iter()
            .filter(|c| !c.contains("date"))
            .collect()
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Family {
    type Err = ParamsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "swe" | "snow" => Ok(Family::Swe),
            "precipitation" | "precip" | "rain" => Ok(Family::Precipitation),
            "discharge" | "riverdischarge" | "q" => Ok(Family::Discharge),
            _ => Err(ParamsError::UnknownFamily {
                name: s.to_string(),
            }),
        }
    }
}

/// Parameters of one hydrological year, tagged by family.
#[derive(Debug, Clone, PartialEq)]
pub enum ParameterRow {
    /// SWE melt and accumulation parameters.
    Swe(SweParameters),
    /// Precipitation totals and concentration.
    Precipitation(PrecipParameters),
    /// Discharge extremes and seasonality.
    Discharge(DischargeParameters),
}

impl ParameterRow {
    /// Family of the contained record.
    pub fn family(&self) -> Family {
        match self {
            ParameterRow::Swe(_) => Family::Swe,
            ParameterRow::Precipitation(_) => Family::Precipitation,
            ParameterRow::Discharge(_) => Family::Discharge,
        }
    }

    /// Named values in column order.
    pub fn fields(&self) -> Vec<(String, Cell)> {
        match self {
            ParameterRow::Swe(p) => p.fields(),
            ParameterRow::Precipitation(p) => p.fields(),
            ParameterRow::Discharge(p) => p.fields(),
        }
    }

    /// Values in column order.
    pub fn cells(&self) -> Vec<Cell> {
        match self {
            ParameterRow::Swe(p) => p.cells(),
            ParameterRow::Precipitation(p) => p.cells(),
            ParameterRow::Discharge(p) => p.cells(),
        }
    }
}

/// One basin's parameters for one hydrological year.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterRecord {
    /// Opaque basin identifier.
    pub basin_id: String,
    /// Hydrological year the parameters describe.
    pub hydro_year: HydroYear,
    /// The family-specific values.
    pub parameters: ParameterRow,
}

/// Appends `name -> cell` to a field list.
pub(crate) fn push(fields: &mut Vec<(String, Cell)>, name: impl Into<String>, cell: impl Into<Cell>) {
    fields.push((name.into(), cell.into()));
}
