//! Column layout of import sheets: which sheet to read and which header
//! texts name each field.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Fields of an [`ImportLine`](crate::models::ImportLine) that can be read
/// from a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImportField {
    BeNo,
    BeDate,
    BeMonth,
    BeYear,
    ClaimRefNo,
    ClaimYear,
    PortCode,
    CountryOfOrigin,
    SupplierNameAddress,
    ItchsCode,
    ItemDescription,
    BomPartNo,
    AltBoePartNo,
    DbkPartNo,
    Quantity,
    Uom,
    AssessableValue,
    BcdRate,
    Bcd,
    SwsRate,
    Sws,
    AddRate,
    AddDuty,
    IgstRate,
    Igst,
    TotalDuty,
    NotnNo,
    NotnEligibility,
    QtyOpeningBalance,
    QtyUsed,
    ClosingBalance,
    StockWiseEligibility,
    DutyClaimedAmt,
}

/// Sheet selection and header aliases for one family of import workbooks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportLayout {
    /// Sheet names tried first, in order, ignoring case.
    pub preferred_sheets: Vec<String>,

    /// Otherwise the first sheet whose lowercase name contains this.
    pub sheet_name_fallback: String,

    /// Zero-based index of the header row.
    pub header_row: usize,

    /// Accepted header texts per field, in priority order.
    pub aliases: BTreeMap<ImportField, Vec<String>>,
}

impl Default for ImportLayout {
    fn default() -> Self {
        use ImportField::*;

        let table: &[(ImportField, &[&str])] = &[
            (BeNo, &["BE NO"]),
            (BeDate, &["BE DATE"]),
            (BeMonth, &["MONTH"]),
            (BeYear, &["YEAR"]),
            (ClaimRefNo, &["CLAIM REF NO"]),
            (ClaimYear, &["CLAIM YEAR"]),
            (PortCode, &["PORT CODE"]),
            (CountryOfOrigin, &["COUNTRY OF ORIGIN"]),
            (SupplierNameAddress, &["SUPPLIER NAME & ADDRESS"]),
            (ItchsCode, &["ITCHS CODE", "HS CODE", "HS CD"]),
            (ItemDescription, &["ITEM DESCRIPTION", "ITEM DESCRIPTION."]),
            (BomPartNo, &["BOM PART NO"]),
            (AltBoePartNo, &["ALTERNATE BOE PART NO"]),
            (DbkPartNo, &["DBK PART NO"]),
            (Quantity, &["QUANTITY", "QTY"]),
            (Uom, &["UOM", "UNIT"]),
            (AssessableValue, &["ASSESSABLE VALUE", "ASSESSABLE"]),
            (BcdRate, &["BCD RATE"]),
            (Bcd, &["BCD"]),
            (SwsRate, &["SWS RATE"]),
            (Sws, &["SWS"]),
            (AddRate, &["ADD RATE"]),
            (AddDuty, &["ADD", "ADD DUTY", "ADDL DUTY"]),
            (IgstRate, &["IGST RATE"]),
            (Igst, &["IGST"]),
            (TotalDuty, &["TOTAL DUTY", "TOTAL"]),
            (
                NotnNo,
                &[
                    "NOTN NO",
                    "NOTN NO(SHOULD AUTO FETCH FROM BOE)",
                    "NOTN NOSHOULD AUTO FETCH FROM BOE",
                    "NOTIFICATION NO",
                ],
            ),
            (NotnEligibility, &["NOTN ELIGIBILITY", "ELIGIBILITY"]),
            (
                QtyOpeningBalance,
                &["QTY (OPENING BALANCE)", "QTY OPENING BALANCE", "OPENING BALANCE"],
            ),
            (QtyUsed, &["QTY USED", "USED QTY"]),
            (ClosingBalance, &["CLOSING BALANCE", "QTY CLOSING BALANCE"]),
            (StockWiseEligibility, &["STOCK WISE ELIGIBILITY", "STOCK ELIGIBILITY"]),
            (DutyClaimedAmt, &["DUTY CLAIMED AMT", "DUTY CLAIMED"]),
        ];

        Self {
            preferred_sheets: vec!["IMPORT".to_string(), "IMPORT DETAILS".to_string()],
            sheet_name_fallback: "import".to_string(),
            header_row: 0,
            aliases: table
                .iter()
                .map(|(field, names)| (*field, names.iter().map(|s| s.to_string()).collect()))
                .collect(),
        }
    }
}

impl ImportLayout {
    /// Aliases for a field; empty when the layout does not map it.
    pub fn aliases(&self, field: ImportField) -> &[String] {
        self.aliases.get(&field).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Add an alias with the lowest priority.
    pub fn with_alias(mut self, field: ImportField, alias: impl Into<String>) -> Self {
        self.aliases.entry(field).or_default().push(alias.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_maps_every_field() {
        let layout = ImportLayout::default();
        assert_eq!(layout.aliases.len(), 33);
        assert_eq!(layout.aliases(ImportField::Quantity), ["QUANTITY", "QTY"]);
    }

    #[test]
    fn test_layout_json_roundtrip_keeps_aliases() {
        let layout = ImportLayout::default().with_alias(ImportField::Quantity, "PCS");
        let json = serde_json::to_string(&layout).unwrap();
        assert!(json.contains("\"quantity\":[\"QUANTITY\",\"QTY\",\"PCS\"]"));
        let back: ImportLayout = serde_json::from_str(&json).unwrap();
        assert_eq!(back, layout);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let layout: ImportLayout = serde_json::from_str(r#"{"header_row": 2}"#).unwrap();
        assert_eq!(layout.header_row, 2);
        assert_eq!(layout.preferred_sheets, ["IMPORT", "IMPORT DETAILS"]);
    }
}
