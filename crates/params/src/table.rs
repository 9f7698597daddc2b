//! Rectangular parameter table: key columns plus named value columns.
//!
//! This is the shape the trend estimator and the writers see. It carries no
//! knowledge of which family produced it, so a table read back from disk
//! behaves exactly like one built from fresh records.

use hytrend_calendar::HydroYear;

use crate::cell::Cell;
use crate::error::ParamsError;
use crate::record::{Family, ParameterRecord};

/// Leading key columns of every parameter file.
pub const KEY_COLUMNS: [&str; 3] = ["basin_id", "hydro_year", "hydro_year_str"];

/// One row of a [`ParameterTable`].
#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    /// Basin identifier.
    pub basin_id: String,
    /// Hydrological year.
    pub hydro_year: HydroYear,
    /// Values aligned with [`ParameterTable::columns`].
    pub cells: Vec<Cell>,
}

/// Rows keyed by `(basin_id, hydro_year)` with a fixed column header.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParameterTable {
    columns: Vec<String>,
    rows: Vec<TableRow>,
}

impl ParameterTable {
    /// Empty table with the given value columns.
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Empty table with a family's value columns.
    pub fn for_family(family: Family) -> Self {
        Self::new(family.columns())
    }

    /// Builds a table from records of one family.
    ///
    /// # Errors
    ///
    /// Returns [`ParamsError::ColumnMismatch`] if the records mix families.
    pub fn from_records(family: Family, records: &[ParameterRecord]) -> Result<Self, ParamsError> {
        let mut table = Self::for_family(family);
        for r in records {
            let got = r.parameters.family();
            if got != family {
                return Err(ParamsError::ColumnMismatch {
                    details: format!(
                        "record for basin '{}' is {got}, table is {family}",
                        r.basin_id
                    ),
                });
            }
            table.push(TableRow {
                basin_id: r.basin_id.clone(),
                hydro_year: r.hydro_year,
                cells: r.parameters.cells(),
            })?;
        }
        Ok(table)
    }

    /// Appends a row.
    ///
    /// # Errors
    ///
    /// Returns [`ParamsError::RowWidth`] if the row does not match the header.
    pub fn push(&mut self, row: TableRow) -> Result<(), ParamsError> {
        if row.cells.len() != self.columns.len() {
            return Err(ParamsError::RowWidth {
                basin_id: row.basin_id,
                expected: self.columns.len(),
                got: row.cells.len(),
            });
        }
        self.rows.push(row);
        Ok(())
    }

    /// Moves every row of `other` into `self`.
    ///
    /// # Errors
    ///
    /// Returns [`ParamsError::ColumnMismatch`] if the headers differ.
    pub fn append(&mut self, other: ParameterTable) -> Result<(), ParamsError> {
        if other.columns != self.columns {
            return Err(ParamsError::ColumnMismatch {
                details: format!(
                    "{} columns vs {} columns",
                    self.columns.len(),
                    other.columns.len()
                ),
            });
        }
        self.rows.extend(other.rows);
        Ok(())
    }

    /// Value column names.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// All rows in insertion order.
    pub fn rows(&self) -> &[TableRow] {
        &self.rows
    }

    /// Position of a value column.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Distinct basin ids in first-seen order.
    pub fn basins(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for r in &self.rows {
            if !seen.contains(&r.basin_id.as_str()) {
                seen.push(&r.basin_id);
            }
        }
        seen
    }

    /// Rows of one basin, in insertion order.
    pub fn basin_rows<'a>(&'a self, basin_id: &'a str) -> impl Iterator<Item = &'a TableRow> + 'a {
        self.rows.iter().filter(move |r| r.basin_id == basin_id)
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
