//! Builds import lines from a header-indexed sheet.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::time::Instant;

use tracing::{debug, info};

use crate::coerce::{
    cell_date, cell_decimal, cell_integer, cell_percent, cell_text, to_eligibility,
};
use crate::error::ImportError;
use crate::grid::{Cell, Sheet, Workbook};
use crate::models::ImportLine;

use super::header::HeaderIndex;
use super::layout::{ImportField, ImportLayout};

/// Parser for import duty sheets.
#[derive(Debug, Clone, Default)]
pub struct ImportSheetParser {
    layout: ImportLayout,
}

impl ImportSheetParser {
    /// Create a parser with the built-in layout.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a parser with a custom layout.
    pub fn with_layout(layout: ImportLayout) -> Self {
        Self { layout }
    }

    pub fn layout(&self) -> &ImportLayout {
        &self.layout
    }

    /// Pick the import sheet: preferred names first (ignoring case), then
    /// the first sheet whose lowercase name contains the fallback text.
    pub fn select_sheet<'a>(&self, workbook: &'a Workbook) -> Result<&'a Sheet, ImportError> {
        for name in &self.layout.preferred_sheets {
            if let Some(sheet) = workbook.sheet_named_ignore_case(name) {
                return Ok(sheet);
            }
        }

        let needle = self.layout.sheet_name_fallback.to_lowercase();
        if !needle.is_empty() {
            if let Some(sheet) = workbook
                .sheets
                .iter()
                .find(|s| s.name.to_lowercase().contains(&needle))
            {
                return Ok(sheet);
            }
        }

        Err(ImportError::NoImportSheet {
            sheets: workbook.sheet_names(),
        })
    }

    /// Parse every data row of the import sheet, newest BE date first.
    pub fn parse(&self, workbook: &Workbook) -> Result<Vec<ImportLine>, ImportError> {
        let start = Instant::now();
        let sheet = self.select_sheet(workbook)?;
        debug!("Using import sheet '{}'", sheet.name);

        let header = sheet
            .row(self.layout.header_row)
            .filter(|row| row.iter().any(|c| !c.is_empty()))
            .ok_or_else(|| ImportError::HeaderMissing {
                sheet: sheet.name.clone(),
            })?;

        let columns = self.resolve_columns(&HeaderIndex::from_row(header));
        debug!("Resolved {} of {} columns", columns.len(), self.layout.aliases.len());

        let mut lines = Vec::new();
        let mut skipped = 0usize;
        for row in sheet.rows.iter().skip(self.layout.header_row + 1) {
            match build_line(row, &columns) {
                Some(line) => lines.push(line),
                None => skipped += 1,
            }
        }

        sort_by_be_date(&mut lines);

        info!(
            "Parsed {} import lines from '{}' ({} rows skipped) in {}ms",
            lines.len(),
            sheet.name,
            skipped,
            start.elapsed().as_millis()
        );

        Ok(lines)
    }

    fn resolve_columns(&self, index: &HeaderIndex) -> HashMap<ImportField, usize> {
        self.layout
            .aliases
            .keys()
            .filter_map(|field| {
                let col = index.resolve(self.layout.aliases(*field))?;
                debug!("{:?} -> column {}", field, col);
                Some((*field, col))
            })
            .collect()
    }
}

/// Build one line; `None` when the BE number is blank.
fn build_line(row: &[Cell], columns: &HashMap<ImportField, usize>) -> Option<ImportLine> {
    use ImportField::*;

    let get = |field: ImportField| columns.get(&field).and_then(|col| row.get(*col));
    let text = |field| cell_text(get(field));
    let amount = |field| cell_decimal(get(field));
    let rate = |field| cell_percent(get(field));

    let be_no = text(BeNo)?;

    Some(ImportLine {
        be_no,
        be_date: cell_date(get(BeDate)),
        be_month: text(BeMonth),
        be_year: cell_integer(get(BeYear)),
        claim_ref_no: text(ClaimRefNo),
        claim_year: text(ClaimYear),
        port_code: text(PortCode),
        country_of_origin: text(CountryOfOrigin),
        supplier_name_address: text(SupplierNameAddress),
        itchs_code: text(ItchsCode),
        item_description: text(ItemDescription),
        bom_part_no: text(BomPartNo),
        alt_boe_part_no: text(AltBoePartNo),
        dbk_part_no: text(DbkPartNo),
        quantity: amount(Quantity),
        uom: text(Uom),
        assessable_value: amount(AssessableValue),
        bcd_rate: rate(BcdRate),
        bcd: amount(Bcd),
        sws_rate: rate(SwsRate),
        sws: amount(Sws),
        add_rate: rate(AddRate),
        add_duty: amount(AddDuty),
        igst_rate: rate(IgstRate),
        igst: amount(Igst),
        total_duty: amount(TotalDuty),
        notn_no: text(NotnNo),
        notn_eligibility: text(NotnEligibility),
        qty_opening_balance: amount(QtyOpeningBalance),
        qty_used: amount(QtyUsed),
        closing_balance: amount(ClosingBalance),
        stock_wise_eligibility: text(StockWiseEligibility).and_then(|s| to_eligibility(&s)),
        duty_claimed_amt: amount(DutyClaimedAmt),
    })
}

/// Newest BE date first; lines without a date go last. Stable.
fn sort_by_be_date(lines: &mut [ImportLine]) {
    lines.sort_by(|a, b| match (a.be_date, b.be_date) {
        (Some(x), Some(y)) => y.cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
}

/// Parse the import sheet of a workbook with the built-in layout.
pub fn parse_import_sheet(workbook: &Workbook) -> Result<Vec<ImportLine>, ImportError> {
    ImportSheetParser::new().parse(workbook)
}
