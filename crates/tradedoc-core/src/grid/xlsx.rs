//! Workbook loading via calamine.

use std::io::Cursor;
use std::path::Path;

use calamine::{open_workbook_auto, open_workbook_auto_from_rs, Data, DataType, Range, Reader, Sheets};
use tracing::{debug, trace};

use super::{Cell, Sheet, Workbook};
use crate::error::SourceError;

/// Load every sheet of a spreadsheet file (xlsx, xlsm, xls, ods).
pub fn load_workbook(path: &Path) -> Result<Workbook, SourceError> {
    let mut sheets = open_workbook_auto(path)
        .map_err(|e| SourceError::Workbook(format!("{}: {}", path.display(), e)))?;
    read_all(&mut sheets)
}

/// Load every sheet of an in-memory spreadsheet.
pub fn load_workbook_from_bytes(data: &[u8]) -> Result<Workbook, SourceError> {
    let mut sheets = open_workbook_auto_from_rs(Cursor::new(data.to_vec()))
        .map_err(|e| SourceError::Workbook(e.to_string()))?;
    read_all(&mut sheets)
}

fn read_all<RS>(workbook: &mut Sheets<RS>) -> Result<Workbook, SourceError>
where
    RS: std::io::Read + std::io::Seek,
{
    let names = workbook.sheet_names();
    let mut sheets = Vec::with_capacity(names.len());

    for name in names {
        let range = workbook
            .worksheet_range(&name)
            .map_err(|e| SourceError::Workbook(format!("sheet '{}': {}", name, e)))?;
        debug!("Read sheet '{}' ({} rows)", name, range.height());
        sheets.push(Sheet::new(name, range_to_rows(&range)));
    }

    Ok(Workbook::new(sheets))
}

/// Calamine ranges start at the first used cell; pad so positions stay absolute.
fn range_to_rows(range: &Range<Data>) -> Vec<Vec<Cell>> {
    let (row_offset, col_offset) = range
        .start()
        .map(|(r, c)| (r as usize, c as usize))
        .unwrap_or((0, 0));

    let mut rows: Vec<Vec<Cell>> = vec![Vec::new(); row_offset];
    for row in range.rows() {
        let mut cells = vec![Cell::Empty; col_offset];
        cells.extend(row.iter().map(convert_cell));
        rows.push(cells);
    }
    rows
}

fn convert_cell(data: &Data) -> Cell {
    match data {
        Data::Empty | Data::Error(_) => Cell::Empty,
        Data::String(s) => Cell::Text(s.clone()),
        Data::Int(i) => Cell::number(*i as f64),
        Data::Float(f) => Cell::number(*f),
        Data::Bool(b) => Cell::Bool(*b),
        Data::DateTime(_) | Data::DateTimeIso(_) => match data.as_date() {
            Some(date) => Cell::Date(date),
            None => {
                trace!("Unconvertible date cell {:?}", data);
                Cell::Text(data.to_string())
            }
        },
        Data::DurationIso(s) => Cell::Text(s.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_scalar_cells() {
        assert_eq!(convert_cell(&Data::Int(7)), Cell::number(7.0));
        assert_eq!(convert_cell(&Data::Float(0.5)), Cell::number(0.5));
        assert_eq!(convert_cell(&Data::String("SB No".into())), Cell::text("SB No"));
        assert_eq!(convert_cell(&Data::Empty), Cell::Empty);
        assert_eq!(convert_cell(&Data::Bool(false)), Cell::Bool(false));
    }

    #[test]
    fn test_range_offset_is_preserved() {
        let mut range: Range<Data> = Range::new((1, 2), (1, 3));
        range.set_value((1, 2), Data::String("SB No".into()));
        range.set_value((1, 3), Data::Int(12345));

        let rows = range_to_rows(&range);
        assert_eq!(rows.len(), 2);
        assert!(rows[0].is_empty());
        assert_eq!(rows[1][2], Cell::text("SB No"));
        assert_eq!(rows[1][3], Cell::number(12345.0));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let err = load_workbook(Path::new("/nonexistent/workbook.xlsx")).unwrap_err();
        assert!(matches!(err, SourceError::Workbook(_)));
    }
}
