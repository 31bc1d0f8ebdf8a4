//! Reading documents from disk into the engine's inputs.

use std::fs;
use std::path::Path;

use tracing::debug;

use tradedoc_core::{
    GridScanner, PdfExtractor, PdfProcessor, ShippingBill, ShippingBillExtractor, TextExtractor,
    Workbook,
};

/// Kind of document, decided by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Spreadsheet,
    Pdf,
    Text,
}

impl DocumentKind {
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match extension.as_str() {
            "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => Some(DocumentKind::Spreadsheet),
            "pdf" => Some(DocumentKind::Pdf),
            "txt" => Some(DocumentKind::Text),
            _ => None,
        }
    }
}

/// Open a spreadsheet workbook.
pub fn read_workbook(path: &Path) -> anyhow::Result<Workbook> {
    let workbook = tradedoc_core::load_workbook(path)?;
    debug!(
        "Loaded {} sheets from {}",
        workbook.sheets.len(),
        path.display()
    );
    Ok(workbook)
}

/// Text layer of a PDF file. Scans without text are rejected.
pub fn read_pdf_text(path: &Path) -> anyhow::Result<String> {
    let data = fs::read(path)?;
    let mut extractor = PdfExtractor::new();
    extractor.load(&data)?;

    let content = extractor.extract_all()?;
    if !content.has_text_layer() {
        anyhow::bail!(
            "PDF has no text layer (scanned document?): {}",
            path.display()
        );
    }
    Ok(content.text)
}

/// Extract one shipping bill from any supported document.
pub fn extract_shipping_bill(
    path: &Path,
    scanner: &GridScanner,
    text_extractor: &TextExtractor,
) -> anyhow::Result<ShippingBill> {
    match DocumentKind::from_path(path) {
        Some(DocumentKind::Spreadsheet) => Ok(scanner.extract(&read_workbook(path)?)),
        Some(DocumentKind::Pdf) => Ok(text_extractor.extract(&read_pdf_text(path)?)),
        Some(DocumentKind::Text) => Ok(text_extractor.extract(&fs::read_to_string(path)?)),
        None => anyhow::bail!("Unsupported file format: {}", path.display()),
    }
}
