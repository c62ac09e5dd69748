//! # faktur-core — Invoice Computation & Validation Engine
//!
//! Pure, I/O-free core of the Faktur invoicing engine: the line-item
//! model with its derived amount, the totals calculator, the invoice
//! draft value type, and the pre-submission validator.
//!
//! ## Numeric Model
//!
//! User-entered numbers are kept as raw strings ([`line::NumericInput`])
//! and parsed on read: non-numeric or empty input evaluates to `0.0` for
//! calculation, while the raw text survives so input mid-typing is not
//! destroyed. All arithmetic is `f64`; rounding happens only at display
//! time (2 decimal places), never on stored values.
//!
//! ## Validation Model
//!
//! Validation failures are *values*, not errors: [`validate::validate`]
//! returns a [`validate::ValidationReport`] the caller renders next to
//! offending fields. Nothing in this crate returns `Err` for a business
//! rule violation.

pub mod draft;
pub mod line;
pub mod totals;
pub mod validate;

pub use draft::{DraftMode, InvoiceDraft, InvoiceId};
pub use line::{ItemRef, LineField, LineItem, NumericInput};
pub use totals::{subtotal, tax_amount, total, Totals};
pub use validate::{
    validate, HeaderError, LineErrorKind, LineErrors, ValidationReport,
};
