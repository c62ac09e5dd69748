//! # Totals Calculator
//!
//! Stateless aggregation over the current line sequence and the header
//! tax percentage. Every change triggers a full recompute over all rows —
//! no incremental delta state is kept. O(n) per recompute is acceptable
//! because invoices have a small bounded row count, and a from-scratch
//! recompute can never disagree with itself.

use serde::{Deserialize, Serialize};

use crate::line::LineItem;

/// Sum of the derived amounts of all rows. Empty sequence → `0.0`.
pub fn subtotal(lines: &[LineItem]) -> f64 {
    lines.iter().map(|line| line.amount()).sum()
}

/// Tax on a subtotal: `subtotal * tax_percent / 100`.
pub fn tax_amount(subtotal: f64, tax_percent: f64) -> f64 {
    subtotal * (tax_percent / 100.0)
}

/// Grand total: subtotal plus tax.
pub fn total(subtotal: f64, tax: f64) -> f64 {
    subtotal + tax
}

/// Snapshot of the three aggregate figures for a draft.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Totals {
    pub subtotal: f64,
    pub tax: f64,
    pub total: f64,
}

impl Totals {
    /// Compute all three figures from scratch.
    pub fn compute(lines: &[LineItem], tax_percent: f64) -> Self {
        let subtotal = subtotal(lines);
        let tax = tax_amount(subtotal, tax_percent);
        Self {
            subtotal,
            tax,
            total: total(subtotal, tax),
        }
    }
}
