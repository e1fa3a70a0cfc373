//! Test Helpers

use jiff::{Timestamp, civil::Date, tz::TimeZone};
use rust_decimal::Decimal;
use tally::totals::PricingPolicy;

use crate::{
    domain::{
        catalog::{CatalogService, CatalogServiceError, models::CatalogItem},
        orders::models::{NewOrder, NewOrderLine, OrderUuid},
    },
    test::TestContext,
};

pub(crate) async fn create_item(
    ctx: &TestContext,
    name: &str,
    price: Decimal,
) -> Result<CatalogItem, CatalogServiceError> {
    ctx.catalog
        .create_item(CatalogItem::new(name, "Milk Tea", price))
        .await
}

/// An order request for saved catalog items, placed now.
pub(crate) fn order_for(items: &[(&CatalogItem, u32)], policy: PricingPolicy) -> NewOrder {
    NewOrder {
        uuid: OrderUuid::new(),
        placed_at: Timestamp::now(),
        policy,
        lines: items
            .iter()
            .map(|(item, quantity)| NewOrderLine {
                item: item.uuid,
                name: item.name.clone(),
                quantity: *quantity,
                unit_price: item.price,
            })
            .collect(),
    }
}

/// `hour:minute` on `date` in UTC.
pub(crate) fn at(date: Date, hour: i8, minute: i8) -> Result<Timestamp, jiff::Error> {
    Ok(date
        .at(hour, minute, 0, 0)
        .to_zoned(TimeZone::UTC)?
        .timestamp())
}
