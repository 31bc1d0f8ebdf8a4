//! Amount and percentage coercion.

use rust_decimal::Decimal;
use std::str::FromStr;

use super::patterns::CURRENCY_PREFIX;

/// Tokens that stand for "no value" in customs sheets.
const SENTINELS: [&str; 3] = ["NA", "-", "S"];

/// Parse an amount such as `1,234.50`, `(1,234.50)` or `Rs. 500`.
///
/// A leading currency marker is removed, then everything except digits,
/// `.` and `-` is dropped. Sentinels, empty input and anything that still
/// fails to parse (`6..`, `1.2.3`) yield `None`.
pub fn to_plain_decimal(text: &str) -> Option<Decimal> {
    let s = text.trim();
    if s.is_empty() || SENTINELS.iter().any(|t| s.eq_ignore_ascii_case(t)) {
        return None;
    }

    let negative = s.starts_with('(') && s.ends_with(')');
    let s = if negative { &s[1..s.len() - 1] } else { s };
    let s = CURRENCY_PREFIX.replace(s.trim(), "");

    let cleaned: String = s
        .replace('\u{2212}', "-")
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();
    if cleaned.is_empty() || cleaned == "-" {
        return None;
    }
    let cleaned = match cleaned.strip_prefix('.') {
        Some(rest) => format!("0.{}", rest),
        None => match cleaned.strip_prefix("-.") {
            Some(rest) => format!("-0.{}", rest),
            None => cleaned,
        },
    };

    let value = Decimal::from_str(&cleaned).ok()?;
    Some(if negative { -value } else { value })
}

/// Parse a percentage written as text (`7.5%`, `15`) into 0-100 form.
pub fn to_percent_decimal(text: &str) -> Option<Decimal> {
    let s = text.trim();
    let s = s.strip_suffix('%').unwrap_or(s);
    to_plain_decimal(s)
}

/// Percentage from a numeric cell, expressed in 0-100 form.
///
/// Percent-formatted cells hold a fraction and are scaled by 100. Without
/// that format a value `<= 1` is also taken as a fraction; larger values are
/// assumed to be in 0-100 form already.
pub fn percent_from_number(value: f64, percent_style: bool) -> Option<Decimal> {
    let v = decimal_from_f64(value)?;
    if percent_style || v <= Decimal::ONE {
        v.checked_mul(Decimal::ONE_HUNDRED)
    } else {
        Some(v)
    }
}

/// Convert a spreadsheet double using its shortest decimal representation.
pub fn decimal_from_f64(value: f64) -> Option<Decimal> {
    if !value.is_finite() {
        return None;
    }
    Decimal::from_str(&value.to_string()).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_plain_decimal() {
        assert_eq!(to_plain_decimal("1,234.50"), Some(dec("1234.50")));
        assert_eq!(to_plain_decimal("(1,234.50)"), Some(dec("-1234.50")));
        assert_eq!(to_plain_decimal("\u{2212}12"), Some(dec("-12")));
        assert_eq!(to_plain_decimal(".5"), Some(dec("0.5")));
        assert_eq!(to_plain_decimal("USD 2,000.25"), Some(dec("2000.25")));
    }

    #[test]
    fn test_plain_decimal_absent() {
        assert_eq!(to_plain_decimal(""), None);
        assert_eq!(to_plain_decimal("   "), None);
        assert_eq!(to_plain_decimal("NA"), None);
        assert_eq!(to_plain_decimal("na"), None);
        assert_eq!(to_plain_decimal("-"), None);
        assert_eq!(to_plain_decimal("S"), None);
        assert_eq!(to_plain_decimal("QUANTITY"), None);
        assert_eq!(to_plain_decimal("1.2.3"), None);
        assert_eq!(to_plain_decimal("12-34"), None);
    }

    #[test]
    fn test_numbered_label_is_not_an_amount() {
        assert_eq!(to_plain_decimal("6.LEO Date."), None);
        assert_eq!(to_plain_decimal("3.1.FOB."), None);
    }

    #[test]
    fn test_currency_prefix() {
        assert_eq!(to_plain_decimal("Rs. 1,500"), Some(dec("1500")));
        assert_eq!(to_plain_decimal("rs 250.75"), Some(dec("250.75")));
        assert_eq!(to_plain_decimal("INR 83.10"), Some(dec("83.10")));
        assert_eq!(to_plain_decimal("(USD 40)"), Some(dec("-40")));
    }

    #[test]
    fn test_percent_text() {
        assert_eq!(to_percent_decimal("7.5%"), Some(dec("7.5")));
        assert_eq!(to_percent_decimal("15"), Some(dec("15")));
        assert_eq!(to_percent_decimal("10 %"), Some(dec("10")));
        assert_eq!(to_percent_decimal("NA"), None);
    }

    #[test]
    fn test_percent_from_number() {
        assert_eq!(percent_from_number(0.075, true), Some(dec("7.5")));
        assert_eq!(percent_from_number(0.1, false), Some(dec("10")));
        assert_eq!(percent_from_number(1.0, false), Some(dec("100")));
        assert_eq!(percent_from_number(18.0, false), Some(dec("18")));
        assert_eq!(percent_from_number(f64::NAN, true), None);
    }

    #[test]
    fn test_percent_fraction_property() {
        for v in [0.01, 0.05, 0.075, 0.1, 0.18, 0.5, 1.0] {
            let expected = decimal_from_f64(v).unwrap() * Decimal::ONE_HUNDRED;
            assert_eq!(percent_from_number(v, true), Some(expected));
        }
        for v in [1.5, 7.5, 10.0, 28.0] {
            assert_eq!(percent_from_number(v, false), decimal_from_f64(v));
        }
    }

    #[test]
    fn test_decimal_from_f64_is_shortest() {
        assert_eq!(decimal_from_f64(0.1), Some(dec("0.1")));
        assert_eq!(decimal_from_f64(1234.5), Some(dec("1234.5")));
    }
}
