//! Type coercers: raw cell or text content into typed values.
//!
//! Every coercer is total. Failure is `None`, and callers never treat zero
//! as a stand-in for a missing value.

pub mod amounts;
pub mod cells;
pub mod dates;
pub mod patterns;

pub use amounts::{decimal_from_f64, percent_from_number, to_percent_decimal, to_plain_decimal};
pub use cells::{cell_date, cell_decimal, cell_integer, cell_percent, cell_text};
pub use dates::{month_name, to_date};

use crate::models::import_line::StockWiseEligibility;
use patterns::NON_DIGIT;

/// Keep only the digits and parse them as an integer.
pub fn to_integer(text: &str) -> Option<i32> {
    let digits = NON_DIGIT.replace_all(text.trim(), "");
    if digits.is_empty() {
        return None;
    }
    digits.parse().ok()
}

/// `OPEN...` or `CLOSE...`, ignoring case and surrounding whitespace.
pub fn to_eligibility(text: &str) -> Option<StockWiseEligibility> {
    let s = text.trim().to_uppercase();
    if s.starts_with("OPEN") {
        Some(StockWiseEligibility::Open)
    } else if s.starts_with("CLOSE") {
        Some(StockWiseEligibility::Closed)
    } else {
        None
    }
}

/// Trimmed text, or `None` when blank.
pub fn non_blank(text: &str) -> Option<String> {
    let s = text.trim();
    if s.is_empty() { None } else { Some(s.to_string()) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_integer() {
        assert_eq!(to_integer("2024"), Some(2024));
        assert_eq!(to_integer("FY 2023"), Some(2023));
        assert_eq!(to_integer("n/a"), None);
        assert_eq!(to_integer(""), None);
        assert_eq!(to_integer("99999999999999"), None);
    }

    #[test]
    fn test_to_eligibility() {
        assert_eq!(to_eligibility("open"), Some(StockWiseEligibility::Open));
        assert_eq!(to_eligibility(" Opened "), Some(StockWiseEligibility::Open));
        assert_eq!(to_eligibility("CLOSED"), Some(StockWiseEligibility::Closed));
        assert_eq!(to_eligibility("close"), Some(StockWiseEligibility::Closed));
        assert_eq!(to_eligibility("pending"), None);
        assert_eq!(to_eligibility(""), None);
    }

    #[test]
    fn test_non_blank() {
        assert_eq!(non_blank("  BE1 "), Some("BE1".to_string()));
        assert_eq!(non_blank("   "), None);
    }
}
