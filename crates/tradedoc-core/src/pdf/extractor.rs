//! PDF text extraction using lopdf and pdf-extract.

use lopdf::Document;
use tracing::debug;

use super::{PdfProcessor, Result};
use crate::error::PdfError;

/// Below this many non-whitespace characters a document is treated as a
/// scan without a usable text layer.
const MIN_TEXT_CHARS: usize = 20;

/// PDF content extractor using lopdf.
pub struct PdfExtractor {
    document: Option<Document>,
    raw_data: Vec<u8>,
}

/// Text content of a loaded PDF.
#[derive(Debug, Clone)]
pub struct PdfContent {
    /// Number of pages.
    pub page_count: u32,
    /// Text of all pages, in page order.
    pub text: String,
}

impl PdfContent {
    /// Whether the text layer carries enough content to extract from.
    pub fn has_text_layer(&self) -> bool {
        self.text.chars().filter(|c| !c.is_whitespace()).count() >= MIN_TEXT_CHARS
    }
}

impl PdfExtractor {
    /// Create a new PDF extractor.
    pub fn new() -> Self {
        Self {
            document: None,
            raw_data: Vec::new(),
        }
    }

    /// Page count and text of the loaded document.
    pub fn extract_all(&self) -> Result<PdfContent> {
        if self.document.is_none() {
            return Err(PdfError::Parse("No document loaded".to_string()));
        }

        let content = PdfContent {
            page_count: self.page_count(),
            text: self.extract_text()?,
        };

        debug!(
            "PDF analysis: {} pages, {} chars text, text layer: {}",
            content.page_count,
            content.text.len(),
            content.has_text_layer()
        );

        Ok(content)
    }
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfProcessor for PdfExtractor {
    fn load(&mut self, data: &[u8]) -> Result<()> {
        let mut doc = Document::load_mem(data).map_err(|e| PdfError::Parse(e.to_string()))?;

        // Customs portals often encrypt with an empty user password
        if doc.is_encrypted() {
            if doc.decrypt("").is_err() {
                return Err(PdfError::Encrypted);
            }
            debug!("Decrypted PDF with empty password");

            // pdf_extract reads the decrypted copy
            let mut decrypted_data = Vec::new();
            doc.save_to(&mut decrypted_data)
                .map_err(|e| PdfError::Parse(format!("Failed to save decrypted PDF: {}", e)))?;
            self.raw_data = decrypted_data;
        } else {
            self.raw_data = data.to_vec();
        }

        let page_count = doc.get_pages().len();
        if page_count == 0 {
            return Err(PdfError::NoPages);
        }

        debug!("Loaded PDF with {} pages", page_count);
        self.document = Some(doc);
        Ok(())
    }

    fn page_count(&self) -> u32 {
        self.document
            .as_ref()
            .map(|doc| doc.get_pages().len() as u32)
            .unwrap_or(0)
    }

    fn extract_text(&self) -> Result<String> {
        if self.document.is_none() {
            return Err(PdfError::Parse("No document loaded".to_string()));
        }
        pdf_extract::extract_text_from_mem(&self.raw_data)
            .map_err(|e| PdfError::TextExtraction(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pdf_extractor_new() {
        let extractor = PdfExtractor::new();
        assert!(extractor.document.is_none());
        assert_eq!(extractor.page_count(), 0);
        assert!(extractor.extract_text().is_err());
    }

    #[test]
    fn test_load_rejects_garbage() {
        let mut extractor = PdfExtractor::new();
        let err = extractor.load(b"not a pdf").unwrap_err();
        assert!(matches!(err, PdfError::Parse(_)));
    }

    #[test]
    fn test_text_layer_threshold() {
        let scan = PdfContent {
            page_count: 1,
            text: " \n\n  ".to_string(),
        };
        assert!(!scan.has_text_layer());

        let text = PdfContent {
            page_count: 1,
            text: "SB No\n7654321\nSB Date\n03/06/2024".to_string(),
        };
        assert!(text.has_text_layer());
    }
}
