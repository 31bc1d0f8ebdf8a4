//! Record types and configuration.

pub mod config;
pub mod import_line;
pub mod shipping_bill;

pub use import_line::{ImportLine, StockWiseEligibility};
pub use shipping_bill::{FieldValue, ShippingBill, ShippingBillField};
