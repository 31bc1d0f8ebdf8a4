//! Error types for the tradedoc-core library.
//!
//! Only structural problems are errors. A field that cannot be located or
//! coerced is reported as `None` on the record, never through these types.

use thiserror::Error;

/// Main error type for the tradedoc library.
#[derive(Error, Debug)]
pub enum TradedocError {
    /// Import sheet could not be processed.
    #[error("import error: {0}")]
    Import(#[from] ImportError),

    /// Source document could not be opened or read.
    #[error("source error: {0}")]
    Source(#[from] SourceError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Structural failures of the header-indexed import path.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ImportError {
    /// No sheet matched the preferred names or the fallback substring.
    #[error("no import sheet found (sheets: {})", sheets.join(", "))]
    NoImportSheet { sheets: Vec<String> },

    /// The selected sheet has no header row.
    #[error("header row missing in sheet '{sheet}'")]
    HeaderMissing { sheet: String },
}

/// Errors raised by the grid and text adapters.
#[derive(Error, Debug)]
pub enum SourceError {
    /// Failed to open or read a spreadsheet workbook.
    #[error("failed to read workbook: {0}")]
    Workbook(String),

    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),
}

/// Errors related to PDF processing.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,
}

/// Result type for the tradedoc library.
pub type Result<T> = std::result::Result<T, TradedocError>;
