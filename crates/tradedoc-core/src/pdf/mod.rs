//! PDF text layer access for the flat-text extraction path.

mod extractor;

pub use extractor::{PdfContent, PdfExtractor};

use crate::error::PdfError;

/// Result type for PDF operations.
pub type Result<T> = std::result::Result<T, PdfError>;

/// Trait for PDF processing implementations.
pub trait PdfProcessor {
    /// Load a PDF from bytes.
    fn load(&mut self, data: &[u8]) -> Result<()>;

    /// Get the number of pages in the PDF.
    fn page_count(&self) -> u32;

    /// Extract text from the entire PDF.
    fn extract_text(&self) -> Result<String>;
}

/// Load a PDF and return its text layer.
pub fn read_pdf_text(data: &[u8]) -> Result<String> {
    let mut extractor = PdfExtractor::new();
    extractor.load(data)?;
    extractor.extract_text()
}
