//! Export shipping bill records.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::coerce::month_name;

/// One export shipping bill.
///
/// Every field starts absent and is assigned at most once per document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShippingBill {
    pub sb_no: Option<String>,
    pub sb_date: Option<NaiveDate>,
    /// Textual month, e.g. "June".
    pub month: Option<String>,
    pub year: Option<i32>,
    pub port_code: Option<String>,
    /// Let Export Order date.
    pub leo_date: Option<NaiveDate>,
    /// Bank realisation certificate date.
    pub brc_realisation_date: Option<NaiveDate>,
    /// Invoice number and date as printed, e.g. "EX123 05/01/2024".
    pub invoice_no_date: Option<String>,
    pub buyer_details: Option<String>,
    pub exchange_rate: Option<Decimal>,
    pub invoice_value: Option<Decimal>,
    pub currency: Option<String>,
    pub hs_code: Option<String>,
    pub description: Option<String>,
    pub model_no: Option<String>,
    pub quantity: Option<Decimal>,
    pub unit: Option<String>,
    pub fob: Option<Decimal>,
    pub pmv_per_unit: Option<Decimal>,
    pub scheme_description: Option<String>,
    pub dbk_sno: Option<String>,
    pub rate: Option<Decimal>,
    pub dbk_amount: Option<Decimal>,
}

/// Field names of a [`ShippingBill`], used to address fields from rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShippingBillField {
    SbNo,
    SbDate,
    Month,
    Year,
    PortCode,
    LeoDate,
    BrcRealisationDate,
    InvoiceNoDate,
    BuyerDetails,
    ExchangeRate,
    InvoiceValue,
    Currency,
    HsCode,
    Description,
    ModelNo,
    Quantity,
    Unit,
    Fob,
    PmvPerUnit,
    SchemeDescription,
    DbkSno,
    Rate,
    DbkAmount,
}

impl ShippingBillField {
    pub const ALL: [ShippingBillField; 23] = [
        Self::SbNo,
        Self::SbDate,
        Self::Month,
        Self::Year,
        Self::PortCode,
        Self::LeoDate,
        Self::BrcRealisationDate,
        Self::InvoiceNoDate,
        Self::BuyerDetails,
        Self::ExchangeRate,
        Self::InvoiceValue,
        Self::Currency,
        Self::HsCode,
        Self::Description,
        Self::ModelNo,
        Self::Quantity,
        Self::Unit,
        Self::Fob,
        Self::PmvPerUnit,
        Self::SchemeDescription,
        Self::DbkSno,
        Self::Rate,
        Self::DbkAmount,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::SbNo => "sb_no",
            Self::SbDate => "sb_date",
            Self::Month => "month",
            Self::Year => "year",
            Self::PortCode => "port_code",
            Self::LeoDate => "leo_date",
            Self::BrcRealisationDate => "brc_realisation_date",
            Self::InvoiceNoDate => "invoice_no_date",
            Self::BuyerDetails => "buyer_details",
            Self::ExchangeRate => "exchange_rate",
            Self::InvoiceValue => "invoice_value",
            Self::Currency => "currency",
            Self::HsCode => "hs_code",
            Self::Description => "description",
            Self::ModelNo => "model_no",
            Self::Quantity => "quantity",
            Self::Unit => "unit",
            Self::Fob => "fob",
            Self::PmvPerUnit => "pmv_per_unit",
            Self::SchemeDescription => "scheme_description",
            Self::DbkSno => "dbk_sno",
            Self::Rate => "rate",
            Self::DbkAmount => "dbk_amount",
        }
    }
}

/// A typed value located for one field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Date(NaiveDate),
    Amount(Decimal),
    Integer(i32),
}

impl ShippingBill {
    /// Whether a field already holds a value.
    pub fn is_set(&self, field: ShippingBillField) -> bool {
        use ShippingBillField as F;
        match field {
            F::SbNo => self.sb_no.is_some(),
            F::SbDate => self.sb_date.is_some(),
            F::Month => self.month.is_some(),
            F::Year => self.year.is_some(),
            F::PortCode => self.port_code.is_some(),
            F::LeoDate => self.leo_date.is_some(),
            F::BrcRealisationDate => self.brc_realisation_date.is_some(),
            F::InvoiceNoDate => self.invoice_no_date.is_some(),
            F::BuyerDetails => self.buyer_details.is_some(),
            F::ExchangeRate => self.exchange_rate.is_some(),
            F::InvoiceValue => self.invoice_value.is_some(),
            F::Currency => self.currency.is_some(),
            F::HsCode => self.hs_code.is_some(),
            F::Description => self.description.is_some(),
            F::ModelNo => self.model_no.is_some(),
            F::Quantity => self.quantity.is_some(),
            F::Unit => self.unit.is_some(),
            F::Fob => self.fob.is_some(),
            F::PmvPerUnit => self.pmv_per_unit.is_some(),
            F::SchemeDescription => self.scheme_description.is_some(),
            F::DbkSno => self.dbk_sno.is_some(),
            F::Rate => self.rate.is_some(),
            F::DbkAmount => self.dbk_amount.is_some(),
        }
    }

    /// Assign `value` to `field` unless the field is already populated or
    /// the value has the wrong type. Returns whether the value was stored.
    pub fn set_if_absent(&mut self, field: ShippingBillField, value: FieldValue) -> bool {
        use FieldValue as V;
        use ShippingBillField as F;

        if self.is_set(field) {
            return false;
        }

        match (field, value) {
            (F::SbNo, V::Text(v)) => self.sb_no = Some(v),
            (F::Month, V::Text(v)) => self.month = Some(v),
            (F::PortCode, V::Text(v)) => self.port_code = Some(v),
            (F::InvoiceNoDate, V::Text(v)) => self.invoice_no_date = Some(v),
            (F::BuyerDetails, V::Text(v)) => self.buyer_details = Some(v),
            (F::Currency, V::Text(v)) => self.currency = Some(v),
            (F::HsCode, V::Text(v)) => self.hs_code = Some(v),
            (F::Description, V::Text(v)) => self.description = Some(v),
            (F::ModelNo, V::Text(v)) => self.model_no = Some(v),
            (F::Unit, V::Text(v)) => self.unit = Some(v),
            (F::SchemeDescription, V::Text(v)) => self.scheme_description = Some(v),
            (F::DbkSno, V::Text(v)) => self.dbk_sno = Some(v),

            (F::SbDate, V::Date(v)) => self.sb_date = Some(v),
            (F::LeoDate, V::Date(v)) => self.leo_date = Some(v),
            (F::BrcRealisationDate, V::Date(v)) => self.brc_realisation_date = Some(v),

            (F::ExchangeRate, V::Amount(v)) => self.exchange_rate = Some(v),
            (F::InvoiceValue, V::Amount(v)) => self.invoice_value = Some(v),
            (F::Quantity, V::Amount(v)) => self.quantity = Some(v),
            (F::Fob, V::Amount(v)) => self.fob = Some(v),
            (F::PmvPerUnit, V::Amount(v)) => self.pmv_per_unit = Some(v),
            (F::Rate, V::Amount(v)) => self.rate = Some(v),
            (F::DbkAmount, V::Amount(v)) => self.dbk_amount = Some(v),

            (F::Year, V::Integer(v)) => self.year = Some(v),

            _ => return false,
        }
        true
    }

    /// Fill month and year from the SB date when the document did not
    /// state them.
    pub fn derive_period(&mut self) {
        if let Some(date) = self.sb_date {
            if self.month.is_none() {
                self.month = Some(month_name(date));
            }
            if self.year.is_none() {
                self.year = Some(date.year());
            }
        }
    }

    /// Names of fields that are still absent.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        ShippingBillField::ALL
            .iter()
            .filter(|f| !self.is_set(**f))
            .map(|f| f.name())
            .collect()
    }

    /// True when no field was located.
    pub fn is_empty(&self) -> bool {
        ShippingBillField::ALL.iter().all(|f| !self.is_set(*f))
    }

    /// Check the record against the constraints a host needs before
    /// persisting it. Issues are reported, never raised.
    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();

        if self.sb_no.is_none() {
            issues.push("Missing SB number".to_string());
        }
        if self.sb_date.is_none() {
            issues.push("Missing SB date".to_string());
        }
        if self.port_code.is_none() {
            issues.push("Missing port code".to_string());
        }
        if self.invoice_value.is_none() {
            issues.push("Missing invoice value".to_string());
        }
        if self.currency.is_none() {
            issues.push("Missing currency".to_string());
        }

        if let Some(year) = self.year {
            if year < 1990 {
                issues.push(format!("Year {} is before 1990", year));
            }
        }
        if self.exchange_rate.is_some_and(|r| r <= Decimal::ZERO) {
            issues.push("Exchange rate must be greater than 0".to_string());
        }
        if self.quantity.is_some_and(|q| q <= Decimal::ZERO) {
            issues.push("Quantity must be greater than 0".to_string());
        }
        if self.invoice_value.is_some_and(|v| v < Decimal::ZERO) {
            issues.push("Invoice value must be non-negative".to_string());
        }
        if self.fob.is_some_and(|v| v < Decimal::ZERO) {
            issues.push("FOB value must be non-negative".to_string());
        }

        issues
    }
}
