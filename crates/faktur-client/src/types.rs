//! # Wire Types
//!
//! Request and response shapes for the invoicing backend, with camelCase
//! field names matching the API (`invoiceNo`, `updatedOn`, `salesRate`,
//! `discountPct`).
//!
//! Dates travel as strings: the backend returns full timestamps for
//! `invoiceDate` while submissions send the canonical `YYYY-MM-DD` form.
//! Canonicalization is the draft controller's job, so the DTOs carry the
//! text untouched.

use faktur_core::{InvoiceId, ItemRef};
use serde::{Deserialize, Serialize};

/// A catalog item as returned by `GET /Item/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemRecord {
    pub item_id: ItemRef,
    #[serde(default)]
    pub item_name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub sales_rate: f64,
    #[serde(default)]
    pub discount_pct: f64,
}

/// An invoice number as stored by the backend.
///
/// The backend keeps these numeric, but historical data may carry text.
/// Numbering tolerates that: non-numeric values are skipped when the
/// next number is derived.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InvoiceNo {
    Number(u32),
    Text(String),
}

impl InvoiceNo {
    /// The numeric value, if this number parses as one.
    pub fn as_u32(&self) -> Option<u32> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(s) => s.trim().parse().ok(),
        }
    }
}

impl From<u32> for InvoiceNo {
    fn from(n: u32) -> Self {
        Self::Number(n)
    }
}

/// One entry of `GET /Invoice/GetList`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceSummary {
    pub invoice_id: InvoiceId,
    pub invoice_no: InvoiceNo,
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub invoice_date: Option<String>,
}

/// One line of a fetched or submitted invoice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceLineDto {
    #[serde(default)]
    pub row_no: Option<u32>,
    #[serde(default)]
    pub item_id: Option<ItemRef>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub quantity: f64,
    #[serde(default)]
    pub rate: f64,
    #[serde(default)]
    pub discount_pct: f64,
}

/// The full record returned by `GET /Invoice/{id}`.
///
/// Line amounts are deliberately absent: they are recomputed from
/// quantity/rate/discount on hydration, never trusted from storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceRecord {
    pub invoice_no: InvoiceNo,
    pub invoice_date: String,
    pub customer_name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub tax_percentage: f64,
    #[serde(default)]
    pub notes: String,
    /// Opaque concurrency token, round-tripped on update.
    #[serde(default)]
    pub updated_on: Option<String>,
    #[serde(default)]
    pub lines: Vec<InvoiceLineDto>,
}

/// Create payload for `POST /Invoice`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewInvoice {
    pub invoice_no: u32,
    /// Canonical `YYYY-MM-DD`.
    pub invoice_date: String,
    pub customer_name: String,
    pub address: String,
    pub city: String,
    pub tax_percentage: f64,
    pub notes: String,
    pub lines: Vec<InvoiceLineDto>,
}

/// Update payload for `PUT /Invoice`: the create shape plus the record
/// identity and the concurrency token loaded at open time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceUpdate {
    #[serde(flatten)]
    pub invoice: NewInvoice,
    #[serde(rename = "invoiceID")]
    pub invoice_id: InvoiceId,
    pub updated_on: Option<String>,
}

/// Response body of a successful `POST /Invoice`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedInvoice {
    pub invoice_id: InvoiceId,
}
