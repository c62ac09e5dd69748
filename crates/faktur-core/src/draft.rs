//! # Invoice Draft
//!
//! The in-memory, not-yet-committed invoice being edited. A draft owns
//! its line sequence exclusively; catalog items are referenced by
//! identifier only. The draft is mutated entirely client-side through
//! explicit edit operations and discarded on cancel or successful save.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::line::{LineField, LineItem};
use crate::totals::Totals;

/// Maximum length of the customer name and city fields.
pub const MAX_NAME_LEN: usize = 50;

/// Maximum length of the address and notes fields.
pub const MAX_TEXT_LEN: usize = 500;

/// A unique identifier for a persisted invoice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InvoiceId(Uuid);

impl InvoiceId {
    /// Create a new random invoice identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create an invoice identifier from an existing UUID.
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for InvoiceId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for InvoiceId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for InvoiceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for InvoiceId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::from_str(s).map(Self)
    }
}

/// Whether submission creates a new invoice or updates an existing one.
///
/// `Edit` carries the identifier of the persisted record; together with
/// the concurrency token it is round-tripped on update so the server can
/// detect lost updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DraftMode {
    Add,
    Edit { invoice_id: InvoiceId },
}

/// Header fields plus the ordered row sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceDraft {
    /// System-assigned, read-only once initialized.
    pub invoice_number: u32,
    /// Required for submission; `None` when the user has cleared the
    /// date input.
    pub invoice_date: Option<NaiveDate>,
    pub customer_name: String,
    pub city: String,
    pub address: String,
    pub notes: String,
    /// Tax percentage as typed. No validated range.
    pub tax_percent: crate::line::NumericInput,
    pub lines: Vec<LineItem>,
    /// Opaque version tag (`updatedOn`) from a loaded record; never
    /// interpreted, only round-tripped on update.
    pub concurrency_token: Option<String>,
    pub mode: DraftMode,
}

impl InvoiceDraft {
    /// A fresh draft in `Add` mode with a single blank row.
    pub fn new_add(invoice_number: u32, today: NaiveDate) -> Self {
        Self {
            invoice_number,
            invoice_date: Some(today),
            customer_name: String::new(),
            city: String::new(),
            address: String::new(),
            notes: String::new(),
            tax_percent: crate::line::NumericInput::zero(),
            lines: vec![LineItem::blank()],
            concurrency_token: None,
            mode: DraftMode::Add,
        }
    }

    /// Append a blank row. Its row number is its position, count + 1.
    pub fn push_blank_line(&mut self) {
        self.lines.push(LineItem::blank());
    }

    /// Remove the row at `index`, if it exists.
    ///
    /// Removal is lenient: the last row may be removed, leaving an empty
    /// sequence that submission-time validation rejects.
    pub fn remove_line(&mut self, index: usize) {
        if index < self.lines.len() {
            self.lines.remove(index);
        }
    }

    /// Set a field on the row at `index` from raw user text.
    /// Out-of-range indexes are ignored.
    pub fn set_line_field(&mut self, index: usize, field: LineField, raw: &str) {
        if let Some(line) = self.lines.get_mut(index) {
            line.set_field(field, raw);
        }
    }

    pub fn set_customer_name(&mut self, raw: &str) {
        self.customer_name = clamp_len(raw, MAX_NAME_LEN);
    }

    pub fn set_city(&mut self, raw: &str) {
        self.city = clamp_len(raw, MAX_NAME_LEN);
    }

    pub fn set_address(&mut self, raw: &str) {
        self.address = clamp_len(raw, MAX_TEXT_LEN);
    }

    pub fn set_notes(&mut self, raw: &str) {
        self.notes = clamp_len(raw, MAX_TEXT_LEN);
    }

    pub fn set_invoice_date(&mut self, date: Option<NaiveDate>) {
        self.invoice_date = date;
    }

    pub fn set_tax_percent(&mut self, raw: &str) {
        self.tax_percent = crate::line::NumericInput::from_raw(raw);
    }

    /// Current aggregate figures, recomputed from scratch.
    pub fn totals(&self) -> Totals {
        Totals::compute(&self.lines, self.tax_percent.value())
    }
}

fn clamp_len(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}
