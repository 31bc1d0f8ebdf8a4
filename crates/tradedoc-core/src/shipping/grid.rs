//! Label-adjacency scanning of free-form spreadsheets.

use std::time::Instant;

use tracing::{debug, info, trace};

use crate::coerce::patterns::{normalize_label, BARE_NUMBER};
use crate::coerce::{cell_date, cell_decimal};
use crate::grid::{Cell, Sheet, Workbook};
use crate::models::{FieldValue, ShippingBill};

use super::rules::{GridLayout, GridRule, MultilineBlock, Probe};
use super::ShippingBillExtractor;

/// Scans every populated cell for labels and reads values next to them.
#[derive(Debug, Clone, Default)]
pub struct GridScanner {
    layout: GridLayout,
}

impl GridScanner {
    /// Create a scanner with the built-in rules.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a scanner with custom rules.
    pub fn with_layout(layout: GridLayout) -> Self {
        Self { layout }
    }

    pub fn layout(&self) -> &GridLayout {
        &self.layout
    }

    /// Scan all sheets in order into one record.
    pub fn scan(&self, workbook: &Workbook) -> ShippingBill {
        let start = Instant::now();
        let mut bill = ShippingBill::default();

        for sheet in &workbook.sheets {
            self.scan_sheet(sheet, &mut bill);
        }
        bill.derive_period();

        info!(
            "Scanned {} sheets, {} fields missing, in {}ms",
            workbook.sheets.len(),
            bill.missing_fields().len(),
            start.elapsed().as_millis()
        );

        bill
    }

    /// Scan one sheet row by row, filling only fields still absent.
    pub fn scan_sheet(&self, sheet: &Sheet, bill: &mut ShippingBill) {
        for (r, row) in sheet.rows.iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                if cell.is_empty() {
                    continue;
                }
                let raw = cell.display_text();
                let raw = raw.trim();
                let normalized = normalize_label(raw);

                for rule in &self.layout.rules {
                    if bill.is_set(rule.field) || !rule.is_label(&normalized, raw) {
                        continue;
                    }
                    if let Some(value) = self.probe(sheet, r as isize, c as isize, rule) {
                        debug!(
                            "{} from '{}' at {}!R{}C{}",
                            rule.field.name(),
                            raw,
                            sheet.name,
                            r + 1,
                            c + 1
                        );
                        bill.set_if_absent(rule.field, value);
                    }
                }
            }
        }
    }

    fn probe(&self, sheet: &Sheet, row: isize, col: isize, rule: &GridRule) -> Option<FieldValue> {
        match &rule.probe {
            Probe::SelfPattern(patterns) => {
                let text = sheet.cell(row, col)?.display_text();
                patterns
                    .iter()
                    .find_map(|p| p.find(&text))
                    .map(|m| FieldValue::Text(m.as_str().to_string()))
            }
            Probe::Multiline(block) => collect_block(sheet, row, col, block).map(FieldValue::Text),
            probe => {
                let found = self.layout.offsets.iter().find_map(|(dr, dc)| {
                    let neighbour = sheet.cell(row + dr, col + dc)?;
                    trace!("probing {:?} at offset ({}, {})", rule.field, dr, dc);
                    read_value(probe, neighbour)
                });
                if found.is_some() || !rule.self_fallback {
                    return found;
                }
                read_value(probe, sheet.cell(row, col)?)
            }
        }
    }
}

/// Read a neighbour through a value probe.
fn read_value(probe: &Probe, cell: &Cell) -> Option<FieldValue> {
    if cell.is_empty() {
        return None;
    }
    match probe {
        Probe::Pattern(re) => {
            let text = cell.display_text();
            re.find(text.trim())
                .map(|m| FieldValue::Text(m.as_str().to_string()))
        }
        Probe::Date => cell_date(Some(cell)).map(FieldValue::Date),
        Probe::Number => cell_decimal(Some(cell)).map(FieldValue::Amount),
        Probe::SelfPattern(_) | Probe::Multiline(_) => None,
    }
}

/// Join qualifying cells of the block anchored at the label, row-major.
fn collect_block(sheet: &Sheet, row: isize, col: isize, block: &MultilineBlock) -> Option<String> {
    let mut parts: Vec<String> = Vec::new();

    for dr in 0..block.rows as isize {
        for dc in 0..block.cols as isize {
            let Some(cell) = sheet.cell(row + dr, col + dc) else {
                continue;
            };
            let text = cell.display_text();
            let text = text.trim();
            if text.chars().count() < block.min_len
                || BARE_NUMBER.is_match(text)
                || normalize_label(text).contains(&block.exclude)
            {
                continue;
            }
            parts.push(text.to_string());
        }
    }

    if parts.is_empty() { None } else { Some(parts.join(" ")) }
}

impl ShippingBillExtractor for GridScanner {
    type Input = Workbook;

    fn extract(&self, input: &Workbook) -> ShippingBill {
        self.scan(input)
    }
}

/// Extract a shipping bill from a free-form workbook with the built-in rules.
pub fn extract_shipping_bill_from_grid(workbook: &Workbook) -> ShippingBill {
    GridScanner::new().scan(workbook)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn sheet(rows: &[Vec<&str>]) -> Workbook {
        Workbook::new(vec![Sheet::from_text_rows("SB", rows)])
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_value_right_of_label() {
        let bill = extract_shipping_bill_from_grid(&sheet(&[vec!["SB No", "12345"]]));
        assert_eq!(bill.sb_no.as_deref(), Some("12345"));
    }

    #[test]
    fn test_value_below_label() {
        let bill = extract_shipping_bill_from_grid(&sheet(&[vec!["SB No"], vec!["12345"]]));
        assert_eq!(bill.sb_no.as_deref(), Some("12345"));
    }

    #[test]
    fn test_offset_priority() {
        // Right beats below; two-right beats below.
        let bill = extract_shipping_bill_from_grid(&sheet(&[
            vec!["Port Code", "", "INMAA1"],
            vec!["INNSA1", "", ""],
        ]));
        assert_eq!(bill.port_code.as_deref(), Some("INMAA1"));
    }

    #[test]
    fn test_diagonal_offset() {
        let bill = extract_shipping_bill_from_grid(&sheet(&[
            vec!["Port Code", ""],
            vec!["", "INMAA1"],
        ]));
        assert_eq!(bill.port_code.as_deref(), Some("INMAA1"));
    }

    #[test]
    fn test_below_beats_diagonal() {
        let bill = extract_shipping_bill_from_grid(&sheet(&[
            vec!["Port Code", ""],
            vec!["INNSA1", "INMAA1"],
        ]));
        assert_eq!(bill.port_code.as_deref(), Some("INNSA1"));
    }

    #[test]
    fn test_diagonal_beats_left() {
        let bill = extract_shipping_bill_from_grid(&sheet(&[
            vec!["INBOM4", "Port Code", ""],
            vec!["", "", "INMAA1"],
        ]));
        assert_eq!(bill.port_code.as_deref(), Some("INMAA1"));
    }

    #[test]
    fn test_left_offset_is_last_resort() {
        let bill = extract_shipping_bill_from_grid(&sheet(&[vec!["84821011", "HS CD"]]));
        assert_eq!(bill.hs_code.as_deref(), Some("84821011"));
    }

    #[test]
    fn test_first_label_wins() {
        let bill = extract_shipping_bill_from_grid(&sheet(&[
            vec!["SB No", "1111111"],
            vec!["SB No", "2222222"],
        ]));
        assert_eq!(bill.sb_no.as_deref(), Some("1111111"));
    }

    #[test]
    fn test_unmatched_label_leaves_field_for_later_label() {
        let bill = extract_shipping_bill_from_grid(&sheet(&[
            vec!["SB Date", "pending"],
            vec!["", ""],
            vec!["SB Date", "15-Jan-24"],
        ]));
        assert_eq!(bill.sb_date, NaiveDate::from_ymd_opt(2024, 1, 15));
        assert_eq!(bill.month.as_deref(), Some("January"));
        assert_eq!(bill.year, Some(2024));
    }

    #[test]
    fn test_typed_cells() {
        let rows = vec![
            vec![
                Cell::text("LEO Date"),
                Cell::Date(NaiveDate::from_ymd_opt(2024, 2, 1).unwrap()),
            ],
            vec![Cell::text("EXCHANGE RATE"), Cell::number(83.25)],
            vec![Cell::text("FOB"), Cell::Formula(Box::new(Cell::number(1200.0)))],
        ];
        let bill = GridScanner::new().scan(&Workbook::new(vec![Sheet::new("SB", rows)]));
        assert_eq!(bill.leo_date, NaiveDate::from_ymd_opt(2024, 2, 1));
        assert_eq!(bill.exchange_rate, Some(dec("83.25")));
        assert_eq!(bill.fob, Some(dec("1200")));
    }

    #[test]
    fn test_numbered_label_is_not_a_number() {
        let bill = extract_shipping_bill_from_grid(&sheet(&[vec![
            "FOB",
            "6.LEO Date.",
            "1,250.00",
        ]]));
        assert_eq!(bill.fob, Some(dec("1250.00")));
        assert_eq!(bill.leo_date, None);
    }

    #[test]
    fn test_rate_needs_exact_label() {
        let bill = extract_shipping_bill_from_grid(&sheet(&[
            vec!["EXCHANGE RATE", "83.10"],
            vec!["RATE", "1.5%"],
        ]));
        assert_eq!(bill.exchange_rate, Some(dec("83.10")));
        assert_eq!(bill.rate, Some(dec("1.5")));
    }

    #[test]
    fn test_currency_falls_back_to_label_cell() {
        let bill = extract_shipping_bill_from_grid(&sheet(&[vec!["USD"]]));
        assert_eq!(bill.currency.as_deref(), Some("USD"));

        let bill = extract_shipping_bill_from_grid(&sheet(&[vec!["CURRENCY", "EUR"]]));
        assert_eq!(bill.currency.as_deref(), Some("EUR"));
    }

    #[test]
    fn test_model_number_from_cell_itself() {
        let bill =
            extract_shipping_bill_from_grid(&sheet(&[vec!["PHOTOELECTRIC SENSOR FQ-M12"]]));
        assert_eq!(bill.model_no.as_deref(), Some("FQ-M12"));
    }

    #[test]
    fn test_buyer_block() {
        let bill = extract_shipping_bill_from_grid(&sheet(&[
            vec!["BUYER'S NAME & ADDRESS", "ACME GmbH", ""],
            vec!["", "Hauptstrasse 5", "10"],
            vec!["", "10115 Berlin", "DE"],
        ]));
        assert_eq!(
            bill.buyer_details.as_deref(),
            Some("ACME GmbH Hauptstrasse 5 10115 Berlin")
        );
    }

    #[test]
    fn test_description_block_excludes_short_and_numeric_cells() {
        let bill = extract_shipping_bill_from_grid(&sheet(&[
            vec!["DESCRIPTION", "BALL BEARING", "123456"],
            vec!["", "6204-2RS", "SEALED TYPE"],
        ]));
        assert_eq!(
            bill.description.as_deref(),
            Some("BALL BEARING 6204-2RS SEALED TYPE")
        );
    }

    #[test]
    fn test_empty_workbook_gives_empty_bill() {
        let bill = extract_shipping_bill_from_grid(&Workbook::default());
        assert!(bill.is_empty());
    }

    #[test]
    fn test_idempotent() {
        let wb = sheet(&[
            vec!["SB No", "7654321", "SB Date", "03/06/2024"],
            vec!["Port Code", "INMAA1", "QUANTITY", "1,000"],
            vec!["UNIT", "PCS", "DBK SNO.", "8482B"],
        ]);
        let first = serde_json::to_string(&extract_shipping_bill_from_grid(&wb)).unwrap();
        let second = serde_json::to_string(&extract_shipping_bill_from_grid(&wb)).unwrap();
        assert_eq!(first, second);
    }
}
