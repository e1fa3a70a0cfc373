//! Order Models
//!
//! A [`NewOrder`] is the immutable request built from a cashier's cart. Once
//! submitted it becomes an [`OrderRecord`] with its [`OrderLineRecord`]s; those
//! rows are written once and never changed.

use jiff::Timestamp;
use rust_decimal::Decimal;
use smallvec::SmallVec;
use tally::{
    cart::Cart,
    totals::{PricingPolicy, Totals},
};

use crate::{
    domain::{
        catalog::models::CatalogItemUuid, customers::models::CustomerUuid,
        staff::models::StaffUuid,
    },
    uuids::TypedUuid,
};

/// Order UUID
pub type OrderUuid = TypedUuid<OrderRecord>;

/// Order Line UUID
pub type OrderLineUuid = TypedUuid<OrderLineRecord>;

/// One line of an order request, with the price captured at time of sale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrderLine {
    pub item: Option<CatalogItemUuid>,
    pub name: String,
    pub quantity: u32,
    pub unit_price: Decimal,
}

impl NewOrderLine {
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

/// An order request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    pub uuid: OrderUuid,
    pub placed_at: Timestamp,
    pub policy: PricingPolicy,
    pub lines: SmallVec<[NewOrderLine; 8]>,
}

impl NewOrder {
    /// Snapshot a cart into a request placed at `placed_at`.
    #[must_use]
    pub fn from_cart(cart: &Cart, placed_at: Timestamp) -> Self {
        let lines = cart
            .lines()
            .iter()
            .map(|line| NewOrderLine {
                item: line.item().key().map(CatalogItemUuid::from_uuid),
                name: line.item().name().to_string(),
                quantity: line.quantity(),
                unit_price: line.item().unit_price(),
            })
            .collect();

        Self {
            uuid: OrderUuid::new(),
            placed_at,
            policy: cart.policy(),
            lines,
        }
    }

    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.lines.iter().map(NewOrderLine::line_total).sum()
    }

    #[must_use]
    pub fn totals(&self) -> Totals {
        self.policy.totals_for(self.subtotal())
    }
}

/// A persisted order header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderRecord {
    pub uuid: OrderUuid,
    pub placed_at: Timestamp,
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
    pub staff_uuid: StaffUuid,
    pub customer_uuid: CustomerUuid,
}

/// A persisted order line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderLineRecord {
    pub uuid: OrderLineUuid,
    pub item_uuid: CatalogItemUuid,
    pub item_name: String,
    pub quantity: u32,
    pub unit_price: Decimal,
}

impl OrderLineRecord {
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

/// An order header together with its lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderDetails {
    pub order: OrderRecord,
    pub lines: Vec<OrderLineRecord>,
}

/// What the customer is handed after a successful submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt {
    pub order_uuid: OrderUuid,
    pub placed_at: Timestamp,
    pub staff_uuid: StaffUuid,
    pub customer_uuid: CustomerUuid,
    pub lines: Vec<ReceiptLine>,
    pub totals: Totals,
}

/// One printed receipt line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiptLine {
    pub name: String,
    pub quantity: u32,
    pub unit_price: Decimal,
    pub line_total: Decimal,
}

#[cfg(test)]
mod tests {
    use tally::items::MenuItem;
    use uuid::Uuid;

    use super::*;

    #[test]
    fn from_cart_snapshots_lines_and_totals() {
        let key = Uuid::now_v7();
        let mut cart = Cart::new();

        cart.add(MenuItem::new("Thai Tea", "Milk Tea", Decimal::new(500, 2)).with_key(key));
        cart.add(MenuItem::new("Thai Tea", "Milk Tea", Decimal::new(500, 2)).with_key(key));

        let order = NewOrder::from_cart(&cart, Timestamp::UNIX_EPOCH);

        assert_eq!(order.lines.len(), 1);
        assert_eq!(
            order.lines.first().and_then(|line| line.item),
            Some(CatalogItemUuid::from_uuid(key))
        );
        assert_eq!(order.totals(), cart.totals());
    }

    #[test]
    fn unkeyed_cart_item_has_no_catalog_reference() {
        let mut cart = Cart::new();

        cart.add(MenuItem::new("Off-menu Special", "Specialty", Decimal::new(700, 2)));

        let order = NewOrder::from_cart(&cart, Timestamp::UNIX_EPOCH);

        assert_eq!(order.lines.first().and_then(|line| line.item), None);
    }
}
