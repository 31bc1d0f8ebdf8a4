//! Tabular grid model shared by the spreadsheet extraction paths.
//!
//! Hosts build a [`Workbook`] from whatever spreadsheet reader they use; the
//! optional `xlsx` feature provides a calamine-backed adapter.

#[cfg(feature = "xlsx")]
mod xlsx;

#[cfg(feature = "xlsx")]
pub use xlsx::{load_workbook, load_workbook_from_bytes};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single typed spreadsheet cell.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Cell {
    /// Blank cell.
    #[default]
    Empty,
    /// Text cell.
    Text(String),
    /// Numeric cell. `percent` is set when the cell carries a percentage
    /// display format.
    Number { value: f64, percent: bool },
    /// Boolean cell.
    Bool(bool),
    /// Date-formatted numeric cell.
    Date(NaiveDate),
    /// Formula cell with its cached result.
    Formula(Box<Cell>),
}

impl Cell {
    /// Text cell from anything string-like.
    pub fn text(s: impl Into<String>) -> Self {
        Cell::Text(s.into())
    }

    /// Plain numeric cell.
    pub fn number(value: f64) -> Self {
        Cell::Number { value, percent: false }
    }

    /// Numeric cell with a percentage display format.
    pub fn percent(value: f64) -> Self {
        Cell::Number { value, percent: true }
    }

    /// The value a formula evaluates to, or the cell itself.
    pub fn resolved(&self) -> &Cell {
        match self {
            Cell::Formula(cached) => cached.resolved(),
            other => other,
        }
    }

    /// True when the cell holds no content (blank text counts as empty).
    pub fn is_empty(&self) -> bool {
        match self.resolved() {
            Cell::Empty => true,
            Cell::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// Cell content formatted the way a spreadsheet would display it.
    pub fn display_text(&self) -> String {
        match self.resolved() {
            Cell::Empty | Cell::Formula(_) => String::new(),
            Cell::Text(s) => s.clone(),
            Cell::Number { value, percent: true } => format!("{}%", format_number(value * 100.0)),
            Cell::Number { value, percent: false } => format_number(*value),
            Cell::Bool(b) => if *b { "TRUE" } else { "FALSE" }.to_string(),
            Cell::Date(d) => d.format("%Y-%m-%d").to_string(),
        }
    }
}

/// Whole numbers print without a fractional part.
fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

/// One worksheet: an ordered list of rows, each an ordered list of cells.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Sheet {
    /// Sheet name as shown on its tab.
    pub name: String,
    /// Rows in order. Rows may have different lengths.
    pub rows: Vec<Vec<Cell>>,
}

impl Sheet {
    /// Create a sheet from rows of cells.
    pub fn new(name: impl Into<String>, rows: Vec<Vec<Cell>>) -> Self {
        Self {
            name: name.into(),
            rows,
        }
    }

    /// Create a sheet where every cell is text. Empty strings become blank cells.
    pub fn from_text_rows<S: AsRef<str>>(name: impl Into<String>, rows: &[Vec<S>]) -> Self {
        let rows = rows
            .iter()
            .map(|row| {
                row.iter()
                    .map(|s| {
                        let s = s.as_ref();
                        if s.is_empty() { Cell::Empty } else { Cell::text(s) }
                    })
                    .collect()
            })
            .collect();
        Self::new(name, rows)
    }

    /// Cell at a signed position; `None` outside the sheet.
    pub fn cell(&self, row: isize, col: isize) -> Option<&Cell> {
        if row < 0 || col < 0 {
            return None;
        }
        self.rows.get(row as usize)?.get(col as usize)
    }

    /// Row by index.
    pub fn row(&self, index: usize) -> Option<&[Cell]> {
        self.rows.get(index).map(Vec::as_slice)
    }

    /// Number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

/// An ordered collection of sheets.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Workbook {
    pub sheets: Vec<Sheet>,
}

impl Workbook {
    /// Create a workbook from sheets.
    pub fn new(sheets: Vec<Sheet>) -> Self {
        Self { sheets }
    }

    /// Sheet names in workbook order.
    pub fn sheet_names(&self) -> Vec<String> {
        self.sheets.iter().map(|s| s.name.clone()).collect()
    }

    /// First sheet whose name equals `name`, ignoring case.
    pub fn sheet_named_ignore_case(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|s| s.name.eq_ignore_ascii_case(name))
    }
}
