//! Label rules for shipping bill extraction.
//!
//! A [`GridLayout`] drives the label-adjacency scan over spreadsheets and a
//! [`TextLayout`] drives the flat-text extractor. Both are ordered: when two
//! rules could fill the same field, the earlier one wins.

use lazy_static::lazy_static;
use regex::Regex;

use crate::coerce::patterns::{
    normalize_label, CURRENCY_CODE, CURRENCY_LABEL, DBK_SERIAL, HS_CODE, INVOICE_NO_DATE,
    MODEL_HINT, MODEL_NUMBERS, PORT_CODE, SB_NUMBER, SCHEME, UNIT_CODE,
};
use crate::models::ShippingBillField;

/// Neighbour offsets `(row, col)` in probe order: right, two right, below,
/// diagonally below-right, left.
pub const DEFAULT_OFFSETS: [(isize, isize); 5] = [(0, 1), (0, 2), (1, 0), (1, 1), (0, -1)];

/// Decides whether a cell is a label.
#[derive(Debug, Clone)]
pub enum LabelMatcher {
    /// Whole normalised cell text equals the label.
    Exact(String),
    /// Normalised cell text contains the label.
    Contains(String),
    /// Regex found in the trimmed, unnormalised cell text.
    Pattern(Regex),
}

impl LabelMatcher {
    pub fn exact(label: &str) -> Self {
        LabelMatcher::Exact(normalize_label(label))
    }

    pub fn contains(label: &str) -> Self {
        LabelMatcher::Contains(normalize_label(label))
    }

    /// `normalized` comes from [`normalize_label`], `raw` is only trimmed.
    pub fn matches(&self, normalized: &str, raw: &str) -> bool {
        match self {
            LabelMatcher::Exact(label) => normalized == label,
            LabelMatcher::Contains(label) => normalized.contains(label.as_str()),
            LabelMatcher::Pattern(re) => re.is_match(raw),
        }
    }
}

/// Rectangle of cells joined into one text block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultilineBlock {
    /// Rows spanned, starting at the label row.
    pub rows: usize,
    /// Columns spanned, starting at the label column.
    pub cols: usize,
    /// Minimum character count for a cell to be kept.
    pub min_len: usize,
    /// Cells containing this text (normalised) are the label and skipped.
    pub exclude: String,
}

impl MultilineBlock {
    pub fn new(rows: usize, cols: usize, min_len: usize, exclude: &str) -> Self {
        Self {
            rows,
            cols,
            min_len,
            exclude: normalize_label(exclude),
        }
    }
}

/// How a value is read once a label has matched.
#[derive(Debug, Clone)]
pub enum Probe {
    /// First regex match in a neighbour's text.
    Pattern(Regex),
    /// Date-typed neighbour, or neighbour text that parses as a date.
    Date,
    /// Numeric neighbour, or neighbour text that parses as an amount.
    Number,
    /// First of these patterns found in the label cell itself.
    SelfPattern(Vec<Regex>),
    /// Text block collected around the label.
    Multiline(MultilineBlock),
}

/// One label-to-field rule of the grid scanner.
#[derive(Debug, Clone)]
pub struct GridRule {
    pub field: ShippingBillField,
    /// Any matcher firing makes the cell a label.
    pub labels: Vec<LabelMatcher>,
    pub probe: Probe,
    /// Apply the probe to the label cell's own text when no neighbour
    /// satisfies it.
    pub self_fallback: bool,
}

impl GridRule {
    pub fn new(field: ShippingBillField, probe: Probe) -> Self {
        Self {
            field,
            labels: Vec::new(),
            probe,
            self_fallback: false,
        }
    }

    pub fn label(mut self, matcher: LabelMatcher) -> Self {
        self.labels.push(matcher);
        self
    }

    pub fn with_self_fallback(mut self) -> Self {
        self.self_fallback = true;
        self
    }

    /// Whether a cell reads as one of this rule's labels.
    pub fn is_label(&self, normalized: &str, raw: &str) -> bool {
        self.labels.iter().any(|m| m.matches(normalized, raw))
    }
}

/// Rule set of the label-adjacency scanner.
#[derive(Debug, Clone)]
pub struct GridLayout {
    pub rules: Vec<GridRule>,
    /// Neighbour offsets in priority order.
    pub offsets: Vec<(isize, isize)>,
}

impl Default for GridLayout {
    fn default() -> Self {
        use LabelMatcher as L;
        use ShippingBillField as F;

        let rules = vec![
            GridRule::new(F::SbNo, Probe::Pattern(SB_NUMBER.clone())).label(L::exact("SB No")),
            GridRule::new(F::SbDate, Probe::Date).label(L::exact("SB Date")),
            GridRule::new(F::PortCode, Probe::Pattern(PORT_CODE.clone()))
                .label(L::exact("Port Code")),
            GridRule::new(F::LeoDate, Probe::Date).label(L::contains("LEO Date")),
            GridRule::new(F::BrcRealisationDate, Probe::Date)
                .label(L::contains("BRC Realisation Date")),
            GridRule::new(F::InvoiceNoDate, Probe::Pattern(INVOICE_NO_DATE.clone()))
                .label(L::contains("INVOICE No")),
            GridRule::new(
                F::BuyerDetails,
                Probe::Multiline(MultilineBlock::new(5, 5, 4, "BUYER'S NAME")),
            )
            .label(L::contains("BUYER'S NAME")),
            GridRule::new(F::ExchangeRate, Probe::Number).label(L::contains("EXCHANGE RATE")),
            GridRule::new(F::InvoiceValue, Probe::Number).label(L::contains("INVOICE VALUE")),
            GridRule::new(F::Currency, Probe::Pattern(CURRENCY_CODE.clone()))
                .label(L::contains("CURRENCY"))
                .label(L::Pattern(CURRENCY_LABEL.clone()))
                .with_self_fallback(),
            GridRule::new(F::HsCode, Probe::Pattern(HS_CODE.clone()))
                .label(L::contains("HS CD"))
                .label(L::contains("HS CODE")),
            GridRule::new(
                F::Description,
                Probe::Multiline(MultilineBlock::new(4, 4, 6, "DESCRIPTION")),
            )
            .label(L::contains("DESCRIPTION")),
            GridRule::new(F::ModelNo, Probe::SelfPattern(MODEL_NUMBERS.to_vec()))
                .label(L::Pattern(MODEL_HINT.clone())),
            GridRule::new(F::Quantity, Probe::Number).label(L::contains("QUANTITY")),
            GridRule::new(F::Unit, Probe::Pattern(UNIT_CODE.clone()))
                .label(L::contains("UQC"))
                .label(L::contains("UNIT")),
            GridRule::new(F::Fob, Probe::Number).label(L::contains("FOB")),
            GridRule::new(F::PmvPerUnit, Probe::Number).label(L::contains("PMV")),
            GridRule::new(F::SchemeDescription, Probe::Pattern(SCHEME.clone()))
                .label(L::contains("SCHEME DESCRIPTION")),
            GridRule::new(F::DbkSno, Probe::Pattern(DBK_SERIAL.clone()))
                .label(L::contains("DBK SNO")),
            GridRule::new(F::Rate, Probe::Number).label(L::exact("RATE")),
            GridRule::new(F::DbkAmount, Probe::Number).label(L::contains("DBK AMT")),
        ];

        Self {
            rules,
            offsets: DEFAULT_OFFSETS.to_vec(),
        }
    }
}

/// Coercion applied to a value captured from text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Text,
    Date,
    Amount,
}

/// One label rule of the flat-text extractor, with its compiled regex.
#[derive(Debug, Clone)]
pub struct TextRule {
    pub field: ShippingBillField,
    pub kind: ValueKind,
    /// Capture group 1 holds the value.
    pub regex: Regex,
}

impl TextRule {
    /// The line after `label`. With `line_start` the label must begin its
    /// line, which keeps `RATE` from firing inside `EXCHANGE RATE`.
    pub fn single_line(
        field: ShippingBillField,
        label: &str,
        line_start: bool,
        kind: ValueKind,
    ) -> Result<Self, regex::Error> {
        let anchor = if line_start { r"(?m)^[ \t]*" } else { "" };
        let regex = Regex::new(&format!(
            r"(?i){}{}\s*\n\s*([^\n]+)",
            anchor,
            regex::escape(label)
        ))?;
        Ok(Self { field, kind, regex })
    }

    /// Everything between `start` and the first line opening with one of
    /// `terminators`, a line of capitals and spaces only (a section
    /// heading), a blank line, or the end of the text. Whitespace in the
    /// captured block collapses to single spaces.
    pub fn multiline(
        field: ShippingBillField,
        start: &str,
        line_start: bool,
        terminators: &[&str],
    ) -> Result<Self, regex::Error> {
        let anchor = if line_start { r"(?m)^[ \t]*" } else { "" };
        let mut stops: Vec<String> = terminators
            .iter()
            .map(|t| format!(r"\n[ \t]*{}", regex::escape(t)))
            .collect();
        stops.push(r"(?-i:\n[ \t]*[A-Z][A-Z ]{2,}[ \t]*(?:\n|\z))".to_string());
        stops.push(r"\n[ \t]*\n".to_string());
        stops.push(r"\z".to_string());

        let regex = Regex::new(&format!(
            r"(?is){}{}\s*(.+?)\s*(?:{})",
            anchor,
            regex::escape(start),
            stops.join("|")
        ))?;
        Ok(Self {
            field,
            kind: ValueKind::Text,
            regex,
        })
    }
}

lazy_static! {
    static ref DEFAULT_TEXT_RULES: Vec<TextRule> = {
        use ShippingBillField as F;
        use ValueKind as K;

        let single = |field, label, kind| TextRule::single_line(field, label, false, kind).unwrap();
        let anchored = |field, label, kind| TextRule::single_line(field, label, true, kind).unwrap();

        vec![
            single(F::SbNo, "SB No", K::Text),
            single(F::SbDate, "SB Date", K::Date),
            single(F::PortCode, "Port Code", K::Text),
            single(F::LeoDate, "LEO Date", K::Date),
            single(F::BrcRealisationDate, "BRC Realisation Date", K::Date),
            single(F::InvoiceNoDate, "INVOICE No. & Dt.", K::Text),
            TextRule::multiline(
                F::BuyerDetails,
                "BUYER'S NAME & ADDRESS",
                false,
                &["EXCHANGE RATE", "INVOICE VALUE", "INVOICE No", "CURRENCY"],
            )
            .unwrap(),
            single(F::ExchangeRate, "EXCHANGE RATE", K::Amount),
            single(F::InvoiceValue, "INVOICE VALUE", K::Amount),
            single(F::Currency, "CURRENCY", K::Text),
            single(F::HsCode, "HS CD", K::Text),
            TextRule::multiline(
                F::Description,
                "DESCRIPTION",
                true,
                &["MODEL no", "QUANTITY", "UQC", "UNIT", "FOB", "HS CD"],
            )
            .unwrap(),
            single(F::ModelNo, "MODEL no.", K::Text),
            single(F::Quantity, "QUANTITY", K::Amount),
            anchored(F::Unit, "UNIT", K::Text),
            single(F::Fob, "FOB", K::Amount),
            single(F::PmvPerUnit, "PMV (per qty)", K::Amount),
            single(F::SchemeDescription, "SCHEME DESCRIPTION", K::Text),
            single(F::DbkSno, "DBK SNO.", K::Text),
            anchored(F::Rate, "RATE", K::Amount),
            single(F::DbkAmount, "DBK AMT (AIR) Given in SB", K::Amount),
        ]
    };
}

/// Rule set of the flat-text extractor.
#[derive(Debug, Clone)]
pub struct TextLayout {
    pub rules: Vec<TextRule>,
}

impl Default for TextLayout {
    fn default() -> Self {
        Self {
            rules: DEFAULT_TEXT_RULES.clone(),
        }
    }
}
