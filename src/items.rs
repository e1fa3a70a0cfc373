//! Items

use rust_decimal::Decimal;
use uuid::Uuid;

/// How a menu item is recognised when merging cart lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemIdentity<'a> {
    /// A persisted item, identified by its key.
    Key(Uuid),

    /// An item that has not been saved yet, identified by its display name.
    Name(&'a str),
}

/// A sellable menu item as seen by the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    key: Option<Uuid>,
    name: String,
    category: String,
    unit_price: Decimal,
}

impl MenuItem {
    /// Creates a new menu item without a persistent key
    pub fn new(name: impl Into<String>, category: impl Into<String>, unit_price: Decimal) -> Self {
        Self {
            key: None,
            name: name.into(),
            category: category.into(),
            unit_price,
        }
    }

    /// Attach the persistent key of a saved catalog item
    #[must_use]
    pub fn with_key(mut self, key: Uuid) -> Self {
        self.key = Some(key);
        self
    }

    /// Returns the persistent key, if the item has been saved
    pub fn key(&self) -> Option<Uuid> {
        self.key
    }

    /// Returns the display name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the category label
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Returns the unit price
    pub fn unit_price(&self) -> Decimal {
        self.unit_price
    }

    /// Returns the identity used to merge cart lines: the key when present,
    /// otherwise the display name.
    pub fn identity(&self) -> ItemIdentity<'_> {
        match self.key {
            Some(key) => ItemIdentity::Key(key),
            None => ItemIdentity::Name(&self.name),
        }
    }
}
