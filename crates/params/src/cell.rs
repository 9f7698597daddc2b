//! Scalar table cells.

use std::fmt;

use chrono::NaiveDate;

/// ISO date format used for every date-valued cell.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// One scalar in a parameter table.
///
/// `Missing` means "not computable this year" and is written as an empty
/// field.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    /// Floating-point measurement or ratio.
    Float(f64),
    /// Day ordinal, duration in days, count, or month number.
    Int(i64),
    /// Calendar date.
    Date(NaiveDate),
    /// Free text that parsed as nothing else.
    Text(String),
    /// Null.
    Missing,
}

impl Cell {
    /// Numeric view of the cell; dates, text and nulls have none.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Cell::Float(v) => Some(*v),
            Cell::Int(v) => Some(*v as f64),
            _ => None,
        }
    }

    /// Returns `true` for [`Cell::Missing`].
    pub fn is_missing(&self) -> bool {
        matches!(self, Cell::Missing)
    }

    /// Returns `true` for dates and text.
    pub fn is_non_numeric(&self) -> bool {
        matches!(self, Cell::Date(_) | Cell::Text(_))
    }

    /// Parses a delimited-text field.
    ///
    /// Empty fields and non-finite numbers are missing. Integers are tried
    /// before floats, then ISO dates; anything else is kept as text.
    pub fn parse(field: &str) -> Cell {
        let field = field.trim();
        if field.is_empty() {
            return Cell::Missing;
        }
        if let Ok(v) = field.parse::<i64>() {
            return Cell::Int(v);
        }
        if let Ok(v) = field.parse::<f64>() {
            return Cell::from(v);
        }
        if let Ok(d) = NaiveDate::parse_from_str(field, DATE_FORMAT) {
            return Cell::Date(d);
        }
        Cell::Text(field.to_string())
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Float(v) => write!(f, "{v}"),
            Cell::Int(v) => write!(f, "{v}"),
            Cell::Date(d) => write!(f, "{}", d.format(DATE_FORMAT)),
            Cell::Text(s) => f.write_str(s),
            Cell::Missing => Ok(()),
        }
    }
}

impl From<f64> for Cell {
    fn from(v: f64) -> Self {
        if v.is_finite() {
            Cell::Float(v)
        } else {
            Cell::Missing
        }
    }
}

impl From<Option<f64>> for Cell {
    fn from(v: Option<f64>) -> Self {
        v.map_or(Cell::Missing, Cell::from)
    }
}

impl From<Option<i64>> for Cell {
    fn from(v: Option<i64>) -> Self {
        v.map_or(Cell::Missing, Cell::Int)
    }
}

impl From<Option<u32>> for Cell {
    fn from(v: Option<u32>) -> Self {
        v.map_or(Cell::Missing, |x| Cell::Int(i64::from(x)))
    }
}

impl From<Option<u8>> for Cell {
    fn from(v: Option<u8>) -> Self {
        v.map_or(Cell::Missing, |x| Cell::Int(i64::from(x)))
    }
}

impl From<Option<usize>> for Cell {
    fn from(v: Option<usize>) -> Self {
        v.map_or(Cell::Missing, |x| Cell::Int(x as i64))
    }
}

impl From<Option<NaiveDate>> for Cell {
    fn from(v: Option<NaiveDate>) -> Self {
        v.map_or(Cell::Missing, Cell::Date)
    }
}
