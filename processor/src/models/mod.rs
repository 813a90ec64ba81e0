//! Domain models for the player data pipeline.
//!
//! - [`Table`] - column-ordered table of string cells, the unit every stage
//!   consumes and produces
//! - [`PlayerId`] - opaque join key
//! - column name constants for the four input datasets and the derived ones
//!
//! Cells are kept as text so descriptive columns the pipeline never touches
//! round-trip unchanged. An empty cell is a null.

use std::collections::HashSet;

use crate::error::{CsvError, CsvResult};

// =============================================================================
// Column names
// =============================================================================

pub const PLAYER_ID: &str = "player_id";
pub const PLAYER_NAME: &str = "player_name";
pub const VALUE: &str = "value";
pub const MARKET_VALUE: &str = "market_value";
pub const PLACE_OF_BIRTH: &str = "place_of_birth";
pub const CURRENT_CLUB_NAME: &str = "current_club_name";
pub const CLUB_ID: &str = "club_id";
pub const COUNTRY_NAME: &str = "country_name";
pub const FROM_TEAM_ID: &str = "from_team_id";
pub const FROM_TEAM_NAME: &str = "from_team_name";
pub const TO_TEAM_ID: &str = "to_team_id";
pub const TO_TEAM_NAME: &str = "to_team_name";
pub const FROM_TEAM_COUNTRY: &str = "from_team_country";
pub const TO_TEAM_COUNTRY: &str = "to_team_country";

// =============================================================================
// Player identifier
// =============================================================================

/// Opaque player identifier. Compared as text, never as a number.
pub type PlayerId = String;

// =============================================================================
// Table
// =============================================================================

/// A materialized table: ordered headers plus rows of cells.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    /// Human-readable name used in error messages ("player profiles").
    pub name: String,
    /// Column headers, in file order.
    pub headers: Vec<String>,
    /// Data rows; every row has `headers.len()` cells.
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Create an empty table with the given headers.
    pub fn new(name: impl Into<String>, headers: Vec<String>) -> Self {
        Self {
            name: name.into(),
            headers,
            rows: Vec::new(),
        }
    }

    /// Build a table from literal headers and rows (mostly for tests).
    pub fn from_rows(name: impl Into<String>, headers: &[&str], rows: &[&[&str]]) -> Self {
        Self {
            name: name.into(),
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: rows
                .iter()
                .map(|r| r.iter().map(|c| c.to_string()).collect())
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Same name and headers, different rows.
    pub fn with_rows(&self, rows: Vec<Vec<String>>) -> Self {
        Self {
            name: self.name.clone(),
            headers: self.headers.clone(),
            rows,
        }
    }

    /// Rename the table (the artifact it becomes).
    pub fn renamed(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Index of an optional column.
    pub fn find_column(&self, column: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == column)
    }

    /// Index of a column the caller consumes; absent is an error.
    pub fn column(&self, column: &str) -> CsvResult<usize> {
        self.find_column(column).ok_or_else(|| CsvError::MissingColumn {
            table: self.name.clone(),
            column: column.to_string(),
        })
    }

    /// Cell text, `None` for nulls (empty cells).
    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .map(String::as_str)
            .filter(|s| !s.is_empty())
    }

    /// Parse every cell of a numeric column.
    ///
    /// Empty cells are missing values (`None`); anything else that is not a
    /// number fails with the row's line number (header is line 1).
    pub fn numeric_column(&self, column: &str) -> CsvResult<Vec<Option<f64>>> {
        let col = self.column(column)?;
        self.rows
            .iter()
            .enumerate()
            .map(|(i, row)| {
                let raw = row.get(col).map(String::as_str).unwrap_or("");
                parse_number(raw).map_err(|message| CsvError::InvalidValue {
                    table: self.name.clone(),
                    line: i + 2,
                    column: column.to_string(),
                    value: raw.to_string(),
                    message,
                })
            })
            .collect()
    }

    /// Distinct values of a column, nulls excluded.
    pub fn id_set(&self, column: &str) -> CsvResult<HashSet<PlayerId>> {
        let col = self.column(column)?;
        Ok(self
            .rows
            .iter()
            .filter_map(|r| r.get(col))
            .filter(|v| !v.is_empty())
            .cloned()
            .collect())
    }

    /// Return the index of `column`, appending it (empty for every row) if absent.
    pub fn ensure_column(&mut self, column: &str) -> usize {
        if let Some(idx) = self.find_column(column) {
            return idx;
        }
        self.headers.push(column.to_string());
        for row in &mut self.rows {
            row.push(String::new());
        }
        self.headers.len() - 1
    }

    /// Apply `f` to every non-null cell of an optional column.
    pub fn map_column(&mut self, column: &str, f: impl Fn(&str) -> String) -> bool {
        let Some(col) = self.find_column(column) else {
            return false;
        };
        for row in &mut self.rows {
            if let Some(cell) = row.get_mut(col) {
                if !cell.is_empty() {
                    *cell = f(cell);
                }
            }
        }
        true
    }

    /// Append `other`'s rows, matching columns by name.
    ///
    /// Columns only `other` has are appended to the headers; cells missing
    /// on either side are left empty.
    pub fn append_aligned(&mut self, other: Table) {
        let mapping: Vec<usize> = other
            .headers
            .iter()
            .map(|h| self.ensure_column(h))
            .collect();
        let width = self.headers.len();

        for source in other.rows {
            let mut row = vec![String::new(); width];
            for (value, &target) in source.into_iter().zip(&mapping) {
                row[target] = value;
            }
            self.rows.push(row);
        }
    }
}

// =============================================================================
// Numbers
// =============================================================================

/// Parse a numeric cell. Empty means missing.
pub fn parse_number(raw: &str) -> Result<Option<f64>, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("nan") {
        return Ok(None);
    }
    match trimmed.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(Some(v)),
        Ok(_) => Err("not a finite number".to_string()),
        Err(_) => Err("not a number".to_string()),
    }
}

/// Format a number for output: integral values without a fractional part.
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}
