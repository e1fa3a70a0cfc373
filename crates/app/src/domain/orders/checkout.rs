//! Checkout
//!
//! Turns the working cart into a submitted order. The cart is emptied only
//! once the order is durably stored; a failed submit leaves it untouched so
//! the cashier can retry.

use jiff::Timestamp;
use tally::cart::Cart;
use tracing::debug;

use crate::domain::orders::{
    OrdersService,
    errors::OrdersServiceError,
    models::{NewOrder, Receipt},
};

/// Submit `cart` as an order placed at `placed_at`.
///
/// # Errors
///
/// Returns whatever [`OrdersService::submit`] returns; the cart is unchanged
/// in that case.
pub async fn checkout(
    orders: &dyn OrdersService,
    cart: &mut Cart,
    placed_at: Timestamp,
) -> Result<Receipt, OrdersServiceError> {
    let order = NewOrder::from_cart(cart, placed_at);

    debug!(order_uuid = %order.uuid, lines = order.lines.len(), "checking out cart");

    let receipt = orders.submit(order).await?;

    cart.clear();

    Ok(receipt)
}
