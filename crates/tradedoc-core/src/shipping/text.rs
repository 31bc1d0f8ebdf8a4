//! Label-then-value extraction from flat document text.

use tracing::{debug, info};

use crate::coerce::patterns::collapse_whitespace;
use crate::coerce::{non_blank, to_date, to_plain_decimal};
use crate::models::{FieldValue, ShippingBill};

use super::rules::{TextLayout, ValueKind};
use super::ShippingBillExtractor;

/// Reads shipping bill fields out of text recovered from a PDF.
#[derive(Debug, Clone, Default)]
pub struct TextExtractor {
    layout: TextLayout,
}

impl TextExtractor {
    /// Create an extractor with the built-in rules.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an extractor with custom rules.
    pub fn with_layout(layout: TextLayout) -> Self {
        Self { layout }
    }

    pub fn layout(&self) -> &TextLayout {
        &self.layout
    }

    /// Apply every rule once; labels that are missing leave their field absent.
    pub fn extract_text(&self, text: &str) -> ShippingBill {
        // PDF text layers mix line endings.
        let text = text.replace("\r\n", "\n");
        let mut bill = ShippingBill::default();

        for rule in &self.layout.rules {
            if bill.is_set(rule.field) {
                continue;
            }
            let Some(caps) = rule.regex.captures(&text) else {
                continue;
            };
            let raw = collapse_whitespace(caps.get(1).map_or("", |m| m.as_str()));
            let value = match rule.kind {
                ValueKind::Text => non_blank(&raw).map(FieldValue::Text),
                ValueKind::Date => to_date(&raw).map(FieldValue::Date),
                ValueKind::Amount => to_plain_decimal(&raw).map(FieldValue::Amount),
            };
            if let Some(value) = value {
                debug!("{} = {:?}", rule.field.name(), raw);
                bill.set_if_absent(rule.field, value);
            }
        }
        bill.derive_period();

        info!(
            "Extracted {} of {} fields from text",
            super::FIELD_COUNT - bill.missing_fields().len(),
            super::FIELD_COUNT
        );

        bill
    }
}

impl ShippingBillExtractor for TextExtractor {
    type Input = str;

    fn extract(&self, input: &str) -> ShippingBill {
        self.extract_text(input)
    }
}

/// Extract a shipping bill from PDF text with the built-in rules.
pub fn extract_shipping_bill_from_text(text: &str) -> ShippingBill {
    TextExtractor::new().extract_text(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ShippingBillField;
    use crate::shipping::rules::TextRule;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    const SAMPLE: &str = "\
SHIPPING BILL SUMMARY
SB No
7654321
SB Date
03/06/2024
Port Code
INMAA1
LEO Date
05-Jun-24
INVOICE No. & Dt.
EX123 05/06/2024
BUYER'S NAME & ADDRESS
ACME GmbH
Hauptstrasse 5,
  10115 Berlin
EXCHANGE RATE
83.10
INVOICE VALUE
12,500.00
CURRENCY
USD
HS CD
84821011
DESCRIPTION
BALL BEARING
SEALED TYPE 6204
MODEL no.
FQ-M12
QUANTITY
1,000
UNIT
PCS
FOB
12,450.50
PMV (per qty)
13.20
SCHEME DESCRIPTION
Drawback
DBK SNO.
8482B
RATE
1.5
DBK AMT (AIR) Given in SB
186.76
";

    #[test]
    fn test_full_document() {
        let bill = extract_shipping_bill_from_text(SAMPLE);
        let expected = ShippingBill {
            sb_no: Some("7654321".into()),
            sb_date: NaiveDate::from_ymd_opt(2024, 6, 3),
            month: Some("June".into()),
            year: Some(2024),
            port_code: Some("INMAA1".into()),
            leo_date: NaiveDate::from_ymd_opt(2024, 6, 5),
            brc_realisation_date: None,
            invoice_no_date: Some("EX123 05/06/2024".into()),
            buyer_details: Some("ACME GmbH Hauptstrasse 5, 10115 Berlin".into()),
            exchange_rate: Some(dec("83.10")),
            invoice_value: Some(dec("12500.00")),
            currency: Some("USD".into()),
            hs_code: Some("84821011".into()),
            description: Some("BALL BEARING SEALED TYPE 6204".into()),
            model_no: Some("FQ-M12".into()),
            quantity: Some(dec("1000")),
            unit: Some("PCS".into()),
            fob: Some(dec("12450.50")),
            pmv_per_unit: Some(dec("13.20")),
            scheme_description: Some("Drawback".into()),
            dbk_sno: Some("8482B".into()),
            rate: Some(dec("1.5")),
            dbk_amount: Some(dec("186.76")),
        };
        assert_eq!(bill, expected);
    }

    #[test]
    fn test_buyer_block_ends_at_section_heading() {
        let bill = extract_shipping_bill_from_text(
            "BUYER'S NAME & ADDRESS\nAcme GmbH\nHauptstrasse 5, Berlin\nCONSIGNEE DETAILS\nSame as buyer\nEXCHANGE RATE\n83.10\n",
        );
        assert_eq!(bill.buyer_details.as_deref(), Some("Acme GmbH Hauptstrasse 5, Berlin"));
        assert_eq!(bill.exchange_rate, Some(dec("83.10")));
    }

    #[test]
    fn test_sb_date_short_year() {
        let bill = extract_shipping_bill_from_text("SB Date\n15-Jan-24\n");
        assert_eq!(bill.sb_date, NaiveDate::from_ymd_opt(2024, 1, 15));
    }

    #[test]
    fn test_missing_label_is_absent() {
        let bill = extract_shipping_bill_from_text("SB No\n123\n");
        assert_eq!(bill.sb_date, None);
        assert_eq!(bill.month, None);
        assert_eq!(bill.sb_no.as_deref(), Some("123"));
    }

    #[test]
    fn test_unparseable_value_is_absent() {
        let bill = extract_shipping_bill_from_text("EXCHANGE RATE\nN/A\nSB Date\nsoon\n");
        assert_eq!(bill.exchange_rate, None);
        assert_eq!(bill.sb_date, None);
    }

    #[test]
    fn test_crlf_line_endings() {
        let bill = extract_shipping_bill_from_text("Port Code\r\nINNSA1\r\n");
        assert_eq!(bill.port_code.as_deref(), Some("INNSA1"));
    }

    #[test]
    fn test_custom_layout() {
        let layout = TextLayout {
            rules: vec![TextRule::single_line(
                ShippingBillField::SbNo,
                "Shipping Bill Number",
                true,
                ValueKind::Text,
            )
            .unwrap()],
        };
        let bill = TextExtractor::with_layout(layout).extract("Shipping Bill Number\n  998877  \n");
        assert_eq!(bill.sb_no.as_deref(), Some("998877"));
    }

    #[test]
    fn test_empty_text() {
        assert!(extract_shipping_bill_from_text("").is_empty());
    }
}
