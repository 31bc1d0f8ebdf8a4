//! Import duty line records.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One duty-computation row of an import sheet.
///
/// `be_no` is the only mandatory field; rows without it are never built.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImportLine {
    /// Bill of Entry number.
    pub be_no: String,
    pub be_date: Option<NaiveDate>,
    pub be_month: Option<String>,
    pub be_year: Option<i32>,
    pub claim_ref_no: Option<String>,
    pub claim_year: Option<String>,

    pub port_code: Option<String>,
    pub country_of_origin: Option<String>,
    pub supplier_name_address: Option<String>,

    /// ITC-HS tariff code.
    pub itchs_code: Option<String>,
    pub item_description: Option<String>,
    pub bom_part_no: Option<String>,
    pub alt_boe_part_no: Option<String>,
    pub dbk_part_no: Option<String>,

    pub quantity: Option<Decimal>,
    /// Unit of measure.
    pub uom: Option<String>,
    pub assessable_value: Option<Decimal>,

    // Duty rates are in 0-100 form, amounts in currency units.
    pub bcd_rate: Option<Decimal>,
    pub bcd: Option<Decimal>,
    pub sws_rate: Option<Decimal>,
    pub sws: Option<Decimal>,
    pub add_rate: Option<Decimal>,
    pub add_duty: Option<Decimal>,
    pub igst_rate: Option<Decimal>,
    pub igst: Option<Decimal>,
    pub total_duty: Option<Decimal>,

    pub notn_no: Option<String>,
    pub notn_eligibility: Option<String>,

    pub qty_opening_balance: Option<Decimal>,
    pub qty_used: Option<Decimal>,
    pub closing_balance: Option<Decimal>,
    pub stock_wise_eligibility: Option<StockWiseEligibility>,
    pub duty_claimed_amt: Option<Decimal>,
}

/// Whether a part's stock batch can still be claimed against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum StockWiseEligibility {
    Open,
    Closed,
}

impl StockWiseEligibility {
    pub fn as_str(&self) -> &'static str {
        match self {
            StockWiseEligibility::Open => "OPEN",
            StockWiseEligibility::Closed => "CLOSED",
        }
    }
}

impl ImportLine {
    /// Create a line with only its BE number set.
    pub fn new(be_no: impl Into<String>) -> Self {
        Self {
            be_no: be_no.into(),
            ..Default::default()
        }
    }

    /// Check the record against the constraints a host needs before
    /// persisting it. Issues are reported, never raised.
    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();

        if self.be_no.trim().is_empty() {
            issues.push("Missing BE number".to_string());
        }
        if self.be_date.is_none() {
            issues.push(format!("BE {}: missing BE date", self.be_no));
        }
        if self.claim_ref_no.is_none() {
            issues.push(format!("BE {}: missing claim ref no", self.be_no));
        }
        if self.claim_year.is_none() {
            issues.push(format!("BE {}: missing claim year", self.be_no));
        }
        if self.item_description.is_none() {
            issues.push(format!("BE {}: missing item description", self.be_no));
        }
        if self.uom.is_none() {
            issues.push(format!("BE {}: missing UOM", self.be_no));
        }
        if self.assessable_value.is_none() {
            issues.push(format!("BE {}: missing assessable value", self.be_no));
        }
        match self.quantity {
            Some(q) if q > Decimal::ZERO => {}
            _ => issues.push(format!("BE {}: quantity must be positive", self.be_no)),
        }

        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eligibility_serde() {
        assert_eq!(serde_json::to_string(&StockWiseEligibility::Open).unwrap(), "\"OPEN\"");
        let parsed: StockWiseEligibility = serde_json::from_str("\"CLOSED\"").unwrap();
        assert_eq!(parsed, StockWiseEligibility::Closed);
    }

    #[test]
    fn test_validate_reports_missing_fields() {
        let line = ImportLine::new("BE1");
        let issues = line.validate();
        assert!(issues.iter().any(|i| i.contains("missing BE date")));
        assert!(issues.iter().any(|i| i.contains("quantity must be positive")));
        assert_eq!(issues.len(), 7);
    }

    #[test]
    fn test_validate_complete_line() {
        let line = ImportLine {
            be_date: NaiveDate::from_ymd_opt(2024, 1, 1),
            claim_ref_no: Some("CR-1".into()),
            claim_year: Some("2023-24".into()),
            item_description: Some("BEARING".into()),
            uom: Some("NOS".into()),
            assessable_value: Some(Decimal::new(10000, 2)),
            quantity: Some(Decimal::new(5, 0)),
            ..ImportLine::new("BE1")
        };
        assert!(line.validate().is_empty());
    }
}
