//! Import duty sheets: header-indexed spreadsheets with one duty line per row.

mod assembler;
pub mod header;
mod layout;

pub use assembler::{parse_import_sheet, ImportSheetParser};
pub use header::{normalize_header, HeaderIndex};
pub use layout::{ImportField, ImportLayout};
