//! Date coercion for customs documents.

use chrono::{Datelike, NaiveDate};

/// A textual date layout tried by [`to_date`].
struct DatePattern {
    format: &'static str,
    /// Layouts with a four-digit year reject shorter years.
    four_digit_year: bool,
}

/// Tried in order; the first layout that parses wins.
const DATE_PATTERNS: &[DatePattern] = &[
    DatePattern { format: "%Y-%m-%d", four_digit_year: true },
    DatePattern { format: "%d-%m-%Y", four_digit_year: true },
    DatePattern { format: "%d/%m/%Y", four_digit_year: true },
    DatePattern { format: "%m/%d/%Y", four_digit_year: true },
    DatePattern { format: "%Y/%m/%d", four_digit_year: true },
    DatePattern { format: "%d-%b-%y", four_digit_year: false },
    DatePattern { format: "%d-%b-%Y", four_digit_year: true },
];

/// Parse a date written in any of the supported layouts.
///
/// `2024-01-05`, `05-01-2024`, `05/01/2024`, `15-Jan-24` and `15-JAN-2024`
/// are all accepted. Day-first wins over month-first for slash dates.
pub fn to_date(text: &str) -> Option<NaiveDate> {
    let s = text.trim();
    if s.is_empty() {
        return None;
    }

    DATE_PATTERNS.iter().find_map(|p| {
        NaiveDate::parse_from_str(s, p.format)
            .ok()
            .filter(|d| !p.four_digit_year || d.year() >= 1000)
    })
}

/// Full English month name, e.g. "January".
pub fn month_name(date: NaiveDate) -> String {
    date.format("%B").to_string()
}
