//! Common regex patterns for customs document extraction.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Cell and text normalisation
    pub static ref NON_ALNUM: Regex = Regex::new(r"[^A-Za-z0-9]+").unwrap();
    pub static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
    pub static ref NON_DIGIT: Regex = Regex::new(r"\D").unwrap();
    pub static ref BARE_NUMBER: Regex = Regex::new(r"^\d+$").unwrap();
    pub static ref CURRENCY_PREFIX: Regex = Regex::new(
        r"^(?i:rs\.?|inr|usd|eur|gbp|[₹$€£])\s*"
    ).unwrap();

    // Shipping bill value shapes
    pub static ref SB_NUMBER: Regex = Regex::new(r"\d+").unwrap();
    pub static ref PORT_CODE: Regex = Regex::new(r"[A-Z]{5}\d?").unwrap();
    pub static ref INVOICE_NO_DATE: Regex = Regex::new(
        r"[A-Z]{2}\d+\s+\d{2}/\d{2}/\d{4}"
    ).unwrap();
    pub static ref CURRENCY_CODE: Regex = Regex::new(r"USD|EUR|INR|GBP|AUD|CAD").unwrap();
    pub static ref CURRENCY_LABEL: Regex = Regex::new(r"^(?:USD|EUR|INR|GBP)$").unwrap();
    pub static ref HS_CODE: Regex = Regex::new(r"\d{8}").unwrap();
    pub static ref UNIT_CODE: Regex = Regex::new(r"PCS|KGS|NOS|MTR|LTR").unwrap();
    pub static ref SCHEME: Regex = Regex::new(r"(?i)Drawback|MEIS|ROSL|RODTEP").unwrap();
    pub static ref DBK_SERIAL: Regex = Regex::new(r"\d+[A-Z]?").unwrap();

    // Model numbers are read from the cell that contains them
    pub static ref MODEL_HINT: Regex = Regex::new(r"[A-Z]\d+[A-Z]?\d+|FQ-").unwrap();
    pub static ref MODEL_NUMBERS: [Regex; 3] = [
        Regex::new(r"FQ-[A-Z]?\d+").unwrap(),
        Regex::new(r"A5E\d+").unwrap(),
        Regex::new(r"[A-Z]{2,4}\d{4,}").unwrap(),
    ];
}

/// Uppercase, trim and collapse internal whitespace.
pub fn normalize_label(text: &str) -> String {
    WHITESPACE.replace_all(text.trim(), " ").to_uppercase()
}

/// Collapse all whitespace runs to single spaces and trim.
pub fn collapse_whitespace(text: &str) -> String {
    WHITESPACE.replace_all(text, " ").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_label() {
        assert_eq!(normalize_label("  Sb   no\t"), "SB NO");
        assert_eq!(normalize_label("6.LEO Date."), "6.LEO DATE.");
    }

    #[test]
    fn test_model_numbers() {
        let found: Vec<_> = MODEL_NUMBERS
            .iter()
            .filter_map(|p| p.find("SENSOR FQ-M12 A5E0123").map(|m| m.as_str().to_string()))
            .collect();
        assert_eq!(found, vec!["FQ-M12", "A5E0123"]);
    }

    #[test]
    fn test_port_code_shape() {
        assert_eq!(PORT_CODE.find("INNSA1").map(|m| m.as_str()), Some("INNSA1"));
        assert!(PORT_CODE.find("innsa1").is_none());
    }
}
