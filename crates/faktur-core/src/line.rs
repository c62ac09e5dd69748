//! # Line Items
//!
//! One invoice row: catalog item reference, free-text description, and
//! the three numeric inputs (quantity, rate, discount percent) from which
//! the row amount is derived.
//!
//! ## Derived Amount
//!
//! `amount = quantity * rate * (1 - discount_percent / 100)`
//!
//! The amount is never user-set. It is recomputed synchronously after any
//! change to a numeric field, so it can never drift from its inputs.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Maximum length of a line description. Longer input is clamped on set.
pub const MAX_DESCRIPTION_LEN: usize = 500;

/// A reference to a catalog item.
///
/// The draft never owns catalog item state — this is a weak reference,
/// resolved to description/rate/discount through the item lookup adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemRef(Uuid);

impl ItemRef {
    /// Create a new random item reference.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create an item reference from an existing UUID.
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for ItemRef {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for ItemRef {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for ItemRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for ItemRef {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::from_str(s).map(Self)
    }
}

/// A numeric field as the user typed it.
///
/// The raw string is retained for display; the numeric value is parsed on
/// read. Empty or non-numeric input evaluates to `0.0` for calculation,
/// matching lenient form-input semantics — `parse()` distinguishes the
/// two cases for the validator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumericInput(String);

impl NumericInput {
    /// An input holding the literal text `"0"`.
    pub fn zero() -> Self {
        Self("0".to_string())
    }

    /// Create an input from raw user text.
    pub fn from_raw(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Create an input from an already-known numeric value.
    pub fn from_value(value: f64) -> Self {
        Self(value.to_string())
    }

    /// The raw text as typed.
    pub fn raw(&self) -> &str {
        &self.0
    }

    /// Strict parse: `None` when the trimmed text is not a number.
    ///
    /// The empty string is *not* a number here — the validator treats it
    /// the same as garbage input.
    pub fn parse(&self) -> Option<f64> {
        self.0.trim().parse::<f64>().ok().filter(|v| v.is_finite())
    }

    /// Lenient value for calculation: unparsable input counts as `0.0`.
    pub fn value(&self) -> f64 {
        self.parse().unwrap_or(0.0)
    }
}

impl Default for NumericInput {
    fn default() -> Self {
        Self::zero()
    }
}

impl std::fmt::Display for NumericInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// The editable fields of a line item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LineField {
    Description,
    Quantity,
    Rate,
    DiscountPercent,
}

/// One invoice row. Row numbers are positional (index + 1), never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// Catalog item reference; `None` only transiently while editing.
    pub item_ref: Option<ItemRef>,
    /// Free text, from catalog lookup or manual override.
    pub description: String,
    pub quantity: NumericInput,
    pub rate: NumericInput,
    pub discount_percent: NumericInput,
    /// Derived row amount. Never set directly — see [`LineItem::recompute`].
    amount: f64,
}

impl LineItem {
    /// A blank row: all numeric fields `0`, no item selected.
    pub fn blank() -> Self {
        Self {
            item_ref: None,
            description: String::new(),
            quantity: NumericInput::zero(),
            rate: NumericInput::zero(),
            discount_percent: NumericInput::zero(),
            amount: 0.0,
        }
    }

    /// The derived amount, unrounded.
    pub fn amount(&self) -> f64 {
        self.amount
    }

    /// The derived amount formatted for display (2 decimal places).
    pub fn amount_display(&self) -> String {
        format!("{:.2}", self.amount)
    }

    /// Set an editable field from raw user text.
    ///
    /// Numeric fields trigger a synchronous recompute of the amount;
    /// setting the description does not.
    pub fn set_field(&mut self, field: LineField, raw: &str) {
        match field {
            LineField::Description => {
                self.description = clamp_len(raw, MAX_DESCRIPTION_LEN);
            }
            LineField::Quantity => {
                self.quantity = NumericInput::from_raw(raw);
                self.recompute();
            }
            LineField::Rate => {
                self.rate = NumericInput::from_raw(raw);
                self.recompute();
            }
            LineField::DiscountPercent => {
                self.discount_percent = NumericInput::from_raw(raw);
                self.recompute();
            }
        }
    }

    /// Apply resolved catalog item details (description, rate, discount)
    /// to this row and recompute the amount.
    pub fn apply_resolution(&mut self, description: &str, rate: f64, discount_percent: f64) {
        self.description = clamp_len(description, MAX_DESCRIPTION_LEN);
        self.rate = NumericInput::from_value(rate);
        self.discount_percent = NumericInput::from_value(discount_percent);
        self.recompute();
    }

    /// Recompute the derived amount from the current numeric inputs.
    ///
    /// Row amount = quantity × rate − (quantity × rate × disc% / 100).
    pub fn recompute(&mut self) {
        let base = self.quantity.value() * self.rate.value();
        let discount = base * self.discount_percent.value() / 100.0;
        self.amount = base - discount;
    }
}

impl Default for LineItem {
    fn default() -> Self {
        Self::blank()
    }
}

/// Clamp a string to `max` characters, preserving whole characters.
fn clamp_len(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}
