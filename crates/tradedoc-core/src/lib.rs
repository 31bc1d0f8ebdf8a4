//! Core library for customs document field extraction.
//!
//! This crate provides:
//! - Import duty lines from header-indexed spreadsheets (BE sheets)
//! - Export shipping bills from free-form spreadsheets (label-adjacency scan)
//! - Export shipping bills from flat PDF text (label-then-line rules)
//! - Total type coercers for amounts, percentages, dates and codes
//!
//! The engine works on an in-memory [`Workbook`] or a `&str` and performs no
//! I/O. The `xlsx` and `pdf` features add adapters that build those inputs
//! from files.

pub mod coerce;
pub mod error;
pub mod grid;
pub mod import;
pub mod models;
#[cfg(feature = "pdf")]
pub mod pdf;
pub mod shipping;

pub use error::{ImportError, PdfError, Result, SourceError, TradedocError};
pub use grid::{Cell, Sheet, Workbook};
#[cfg(feature = "xlsx")]
pub use grid::{load_workbook, load_workbook_from_bytes};
pub use import::{parse_import_sheet, ImportField, ImportLayout, ImportSheetParser};
pub use models::config::{OutputConfig, TradedocConfig};
pub use models::{FieldValue, ImportLine, ShippingBill, ShippingBillField, StockWiseEligibility};
#[cfg(feature = "pdf")]
pub use pdf::{read_pdf_text, PdfContent, PdfExtractor, PdfProcessor};
pub use shipping::{
    extract_shipping_bill_from_grid, extract_shipping_bill_from_text, GridLayout, GridScanner,
    ShippingBillExtractor, TextExtractor, TextLayout,
};
