//! # Submission Validation
//!
//! Single-pass, stateless validation gating every submission attempt.
//! The result is a [`ValidationReport`] value — field-level errors the
//! caller renders next to offending inputs, plus a single toast-level
//! summary message. Validation never returns `Err`; partial failure is
//! never silently ignored — any invalid row blocks the whole submission.
//!
//! ## The Row-0 Tie-Break
//!
//! "At least one row must have quantity > 0" is an invoice-wide rule,
//! but its error attaches to the *first* row's quantity field so the
//! user is pointed at a concrete input. This is deliberate, preserved
//! behavior — do not redistribute the error across rows.

use serde::{Deserialize, Serialize};

use crate::draft::InvoiceDraft;

/// Header-level validation failures. The `Display` text is the exact
/// user-facing message.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, thiserror::Error,
)]
pub enum HeaderError {
    /// `invoice_date` cleared by the user.
    #[error("Invoice Date is required")]
    InvoiceDateRequired,
    /// `customer_name` empty after trim.
    #[error("Customer Name is required")]
    CustomerNameRequired,
    /// The line sequence is empty.
    #[error("At least one item is required")]
    ItemsRequired,
}

/// Per-line validation failures, keyed to the offending field. The
/// `Display` text is the exact user-facing message.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, thiserror::Error,
)]
pub enum LineErrorKind {
    /// No catalog item selected.
    #[error("Item is required")]
    ItemRequired,
    /// Quantity does not parse to a number >= 0.
    #[error("Quantity must be >= 0")]
    InvalidQuantity,
    /// Rate does not parse to a number >= 0.
    #[error("Rate must be >= 0")]
    InvalidRate,
    /// Discount does not parse to a number in [0, 100].
    #[error("Disc must be 0-100")]
    InvalidDiscount,
    /// No row on the invoice has quantity > 0 (attached to row 0 only).
    #[error("Enter qty")]
    QuantityRequired,
}

/// Error state for one row, one slot per validated field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LineErrors {
    pub item: Option<LineErrorKind>,
    pub quantity: Option<LineErrorKind>,
    pub rate: Option<LineErrorKind>,
    pub discount: Option<LineErrorKind>,
}

impl LineErrors {
    /// True when no field on this row is in error.
    pub fn is_empty(&self) -> bool {
        self.item.is_none()
            && self.quantity.is_none()
            && self.rate.is_none()
            && self.discount.is_none()
    }
}

/// The full result of validating a draft.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ValidationReport {
    pub header: Vec<HeaderError>,
    /// One entry per row, index-aligned with the draft's line sequence.
    pub lines: Vec<LineErrors>,
}

impl ValidationReport {
    /// Valid iff no header errors exist and every row's error set is empty.
    pub fn is_valid(&self) -> bool {
        self.header.is_empty() && self.lines.iter().all(LineErrors::is_empty)
    }

    /// The single toast-level message, in priority order: invoice date >
    /// customer name > empty line set > generic quantity fallback.
    pub fn summary_message(&self) -> Option<String> {
        if self.is_valid() {
            return None;
        }
        for wanted in [
            HeaderError::InvoiceDateRequired,
            HeaderError::CustomerNameRequired,
            HeaderError::ItemsRequired,
        ] {
            if self.header.contains(&wanted) {
                return Some(wanted.to_string());
            }
        }
        Some("Enter quantity".to_string())
    }
}

/// Validate a draft ahead of submission.
pub fn validate(draft: &InvoiceDraft) -> ValidationReport {
    let mut report = ValidationReport::default();

    if draft.invoice_date.is_none() {
        report.header.push(HeaderError::InvoiceDateRequired);
    }
    if draft.customer_name.trim().is_empty() {
        report.header.push(HeaderError::CustomerNameRequired);
    }
    if draft.lines.is_empty() {
        report.header.push(HeaderError::ItemsRequired);
    }

    let mut has_positive_quantity = false;

    for line in &draft.lines {
        let mut errors = LineErrors::default();

        if line.item_ref.is_none() {
            errors.item = Some(LineErrorKind::ItemRequired);
        }

        match line.quantity.parse() {
            Some(q) if q >= 0.0 => {
                if q > 0.0 {
                    has_positive_quantity = true;
                }
            }
            _ => errors.quantity = Some(LineErrorKind::InvalidQuantity),
        }

        match line.rate.parse() {
            Some(r) if r >= 0.0 => {}
            _ => errors.rate = Some(LineErrorKind::InvalidRate),
        }

        match line.discount_percent.parse() {
            Some(d) if (0.0..=100.0).contains(&d) => {}
            _ => errors.discount = Some(LineErrorKind::InvalidDiscount),
        }

        report.lines.push(errors);
    }

    // Invoice-wide rule, attached to row 0's quantity field.
    if !has_positive_quantity {
        if let Some(first) = report.lines.first_mut() {
            first.quantity = Some(LineErrorKind::QuantityRequired);
        }
    }

    report
}
