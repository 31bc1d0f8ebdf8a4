//! Header row indexing.

use std::collections::HashMap;

use crate::coerce::patterns::{NON_ALNUM, WHITESPACE};
use crate::grid::Cell;

/// Normalise header text: `&` reads as `AND`, punctuation becomes space,
/// whitespace collapses, and everything is uppercased.
pub fn normalize_header(text: &str) -> String {
    let s = text.replace('&', " AND ").replace('.', " ");
    let s = NON_ALNUM.replace_all(&s, " ");
    WHITESPACE.replace_all(s.trim(), " ").to_uppercase()
}

/// Normalised header text to column position.
#[derive(Debug, Clone, Default)]
pub struct HeaderIndex {
    columns: HashMap<String, usize>,
}

impl HeaderIndex {
    /// Index a header row. A repeated name keeps its first column.
    pub fn from_row(row: &[Cell]) -> Self {
        let mut columns = HashMap::new();
        for (col, cell) in row.iter().enumerate() {
            let key = normalize_header(&cell.display_text());
            if !key.is_empty() {
                columns.entry(key).or_insert(col);
            }
        }
        Self { columns }
    }

    /// Column of the first alias present in the header.
    pub fn resolve<S: AsRef<str>>(&self, aliases: &[S]) -> Option<usize> {
        aliases
            .iter()
            .find_map(|a| self.columns.get(&normalize_header(a.as_ref())).copied())
    }

    /// Number of distinct non-blank headers.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(names: &[&str]) -> Vec<Cell> {
        names.iter().map(|n| Cell::text(*n)).collect()
    }

    #[test]
    fn test_normalize_header() {
        assert_eq!(normalize_header("Supplier Name & Address"), "SUPPLIER NAME AND ADDRESS");
        assert_eq!(normalize_header("Item Description."), "ITEM DESCRIPTION");
        assert_eq!(normalize_header("QTY (Opening Balance)"), "QTY OPENING BALANCE");
        assert_eq!(normalize_header("  be   no "), "BE NO");
        assert_eq!(normalize_header("B.E. No."), "B E NO");
    }

    #[test]
    fn test_first_occurrence_wins() {
        let index = HeaderIndex::from_row(&header(&["BE NO", "Qty", "QTY."]));
        assert_eq!(index.resolve(&["QTY"]), Some(1));
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn test_alias_priority() {
        let index = HeaderIndex::from_row(&header(&["HS CD", "ITCHS Code"]));
        assert_eq!(index.resolve(&["ITCHS CODE", "HS CODE", "HS CD"]), Some(1));
        assert_eq!(index.resolve(&["HS CODE", "HS CD"]), Some(0));
        assert_eq!(index.resolve(&["UOM"]), None);
    }

    #[test]
    fn test_blank_headers_ignored() {
        let index = HeaderIndex::from_row(&[Cell::Empty, Cell::text("  "), Cell::text("BE NO")]);
        assert_eq!(index.len(), 1);
        assert_eq!(index.resolve(&["be no"]), Some(2));
    }
}
