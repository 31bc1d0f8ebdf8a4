//! Coercers for typed grid cells.
//!
//! Numeric cells are used directly, text cells go through the text
//! coercers, and formula cells are read through their cached value.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::{amounts, dates, non_blank, to_integer};
use crate::grid::Cell;

/// Displayed text of a cell, `None` when blank.
pub fn cell_text(cell: Option<&Cell>) -> Option<String> {
    cell.and_then(|c| non_blank(&c.display_text()))
}

/// Amount from a cell. Date cells are never amounts.
pub fn cell_decimal(cell: Option<&Cell>) -> Option<Decimal> {
    match cell?.resolved() {
        Cell::Number { value, .. } => amounts::decimal_from_f64(*value),
        Cell::Text(s) => amounts::to_plain_decimal(s),
        Cell::Bool(b) => Some(if *b { Decimal::ONE } else { Decimal::ZERO }),
        Cell::Empty | Cell::Date(_) | Cell::Formula(_) => None,
    }
}

/// Percentage (0-100 form) from a cell.
pub fn cell_percent(cell: Option<&Cell>) -> Option<Decimal> {
    match cell?.resolved() {
        Cell::Number { value, percent } => amounts::percent_from_number(*value, *percent),
        Cell::Text(s) => amounts::to_percent_decimal(s),
        Cell::Bool(b) => Some(if *b { Decimal::ONE_HUNDRED } else { Decimal::ZERO }),
        Cell::Empty | Cell::Date(_) | Cell::Formula(_) => None,
    }
}

/// Date from a cell; date-typed cells skip text parsing.
pub fn cell_date(cell: Option<&Cell>) -> Option<NaiveDate> {
    match cell?.resolved() {
        Cell::Date(d) => Some(*d),
        other => dates::to_date(&other.display_text()),
    }
}

/// Integer from the displayed text of a cell.
pub fn cell_integer(cell: Option<&Cell>) -> Option<i32> {
    cell.and_then(|c| to_integer(&c.display_text()))
}
