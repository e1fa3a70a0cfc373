//! Cart
//!
//! The cashier's in-memory selection. Adding the same item twice merges into
//! one line; a line whose quantity drops to zero disappears.

use rust_decimal::Decimal;
use smallvec::SmallVec;
use thiserror::Error;

use crate::{
    items::MenuItem,
    totals::{PricingPolicy, Totals},
};

/// Errors raised by cart edits.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CartError {
    /// A line index was outside the cart.
    #[error("Line {0} not found")]
    LineNotFound(usize),

    /// Cashier input could not be read as a quantity.
    #[error("Invalid quantity {0:?}")]
    InvalidQuantity(String),
}

/// One merged line of the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLine {
    item: MenuItem,
    quantity: u32,
}

impl CartLine {
    /// The item on this line.
    #[must_use]
    pub fn item(&self) -> &MenuItem {
        &self.item
    }

    /// How many of the item are on this line. Never zero.
    #[must_use]
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// `quantity * unit price`, unrounded.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.item.unit_price() * Decimal::from(self.quantity)
    }
}

/// Cart
#[derive(Debug, Clone, Default)]
pub struct Cart {
    lines: SmallVec<[CartLine; 8]>,
    policy: PricingPolicy,
}

impl Cart {
    /// Create an empty cart using the default pricing policy.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty cart that prices with `policy`.
    #[must_use]
    pub fn with_policy(policy: PricingPolicy) -> Self {
        Self {
            lines: SmallVec::new(),
            policy,
        }
    }

    /// The pricing policy in use.
    #[must_use]
    pub fn policy(&self) -> PricingPolicy {
        self.policy
    }

    /// Add one of `item`, merging with an existing line of the same identity.
    pub fn add(&mut self, item: MenuItem) {
        let existing = self
            .lines
            .iter_mut()
            .find(|line| line.item.identity() == item.identity());

        match existing {
            Some(line) => line.quantity = line.quantity.saturating_add(1),
            None => self.lines.push(CartLine { item, quantity: 1 }),
        }
    }

    /// Set the quantity of a line; zero or less removes it.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::LineNotFound`] for an unknown index, or
    /// [`CartError::InvalidQuantity`] if `quantity` does not fit a line.
    pub fn set_quantity(&mut self, index: usize, quantity: i64) -> Result<(), CartError> {
        if quantity <= 0 {
            return self.remove(index).map(|_line| ());
        }

        let quantity = u32::try_from(quantity)
            .map_err(|_overflow| CartError::InvalidQuantity(quantity.to_string()))?;

        let line = self
            .lines
            .get_mut(index)
            .ok_or(CartError::LineNotFound(index))?;

        line.quantity = quantity;

        Ok(())
    }

    /// Set the quantity of a line from cashier input such as `"3"`.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::InvalidQuantity`] if `input` is not a whole
    /// number; the cart is left untouched.
    pub fn set_quantity_input(&mut self, index: usize, input: &str) -> Result<(), CartError> {
        let quantity = input
            .trim()
            .parse::<i64>()
            .map_err(|_parse_error| CartError::InvalidQuantity(input.to_string()))?;

        self.set_quantity(index, quantity)
    }

    /// Remove a line regardless of its quantity, returning it.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::LineNotFound`] for an unknown index.
    pub fn remove(&mut self, index: usize) -> Result<CartLine, CartError> {
        if index >= self.lines.len() {
            return Err(CartError::LineNotFound(index));
        }

        Ok(self.lines.remove(index))
    }

    /// Get a line from the cart.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::LineNotFound`] for an unknown index.
    pub fn line(&self, index: usize) -> Result<&CartLine, CartError> {
        self.lines.get(index).ok_or(CartError::LineNotFound(index))
    }

    /// The cart's lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Sum of all line totals, unrounded.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Tax plus tip on the subtotal, rounded to cents.
    #[must_use]
    pub fn tax(&self) -> Decimal {
        self.policy.tax_on(self.subtotal())
    }

    /// Subtotal plus tax, rounded to cents.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.totals().total
    }

    /// Subtotal, tax and total together.
    #[must_use]
    pub fn totals(&self) -> Totals {
        self.policy.totals_for(self.subtotal())
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check if the cart is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
