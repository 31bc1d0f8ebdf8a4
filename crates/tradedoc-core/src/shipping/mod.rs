//! Shipping bill extraction from free-form spreadsheets and PDF text.

mod grid;
pub mod rules;
mod text;

pub use grid::{extract_shipping_bill_from_grid, GridScanner};
pub use rules::{GridLayout, GridRule, LabelMatcher, MultilineBlock, Probe, TextLayout, TextRule, ValueKind};
pub use text::{extract_shipping_bill_from_text, TextExtractor};

use crate::models::{ShippingBill, ShippingBillField};

const FIELD_COUNT: usize = ShippingBillField::ALL.len();

/// Trait for shipping bill extractors.
///
/// Extraction never fails: fields that cannot be located stay absent.
pub trait ShippingBillExtractor {
    /// Document representation the extractor reads.
    type Input: ?Sized;

    /// Extract one shipping bill.
    fn extract(&self, input: &Self::Input) -> ShippingBill;
}
