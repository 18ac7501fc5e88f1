//! Cart entries and checkout arithmetic.
//!
//! Money is rounded *up* to the cent: `ceil(value * 100) / 100`. Each line
//! total is rounded on its own; the checkout total adds the rounded lines as
//! whole cents so float error cannot push it up another cent.

use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::product::Product;

/// Stored cart line: a snapshot of the product at add time plus a quantity.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct CartEntry {
    pub product: Product,
    pub quantity: u32,
}

/// One checkout line with its derived total.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct CheckoutLine {
    pub product: Product,
    pub quantity: u32,
    pub item_total: f64,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct Checkout {
    pub items: Vec<CheckoutLine>,
    pub total: f64,
    /// Total number of units across all lines.
    pub item_count: u64,
}

pub fn ceil_cents(value: f64) -> f64 {
    (value * 100.0).ceil() / 100.0
}

/// Quantities arrive as signed integers so that `0` and negatives are reported
/// as validation failures instead of parse failures.
pub fn quantity(raw: i64) -> Result<u32, ModelError> {
    if raw <= 0 {
        return Err(ModelError::invalid("quantity", "must be greater than 0"));
    }
    u32::try_from(raw).map_err(|_| ModelError::invalid("quantity", "too large"))
}

impl CartEntry {
    pub fn new(product: Product, quantity: u32) -> Self {
        Self { product, quantity }
    }

    /// Add more units of the same product.
    pub fn increase(&mut self, by: u32) -> Result<(), ModelError> {
        self.quantity = self
            .quantity
            .checked_add(by)
            .ok_or_else(|| ModelError::invalid("quantity", "too large"))?;
        Ok(())
    }

    pub fn item_total(&self) -> f64 {
        ceil_cents(self.product.price * f64::from(self.quantity))
    }
}

/// Line totals are already whole cents; `round` only absorbs representation error.
fn to_cents(amount: f64) -> u64 {
    (amount * 100.0).round() as u64
}

pub fn checkout<'a, I>(entries: I) -> Checkout
where
    I: IntoIterator<Item = &'a CartEntry>,
{
    let mut items = Vec::new();
    let mut cents = 0u64;
    let mut item_count = 0u64;
    for entry in entries {
        let item_total = entry.item_total();
        cents += to_cents(item_total);
        item_count += u64::from(entry.quantity);
        items.push(CheckoutLine { product: entry.product.clone(), quantity: entry.quantity, item_total });
    }
    let total = cents as f64 / 100.0;
    Checkout { items, total, item_count }
}
