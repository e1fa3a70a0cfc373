//! Orders service.

use async_trait::async_trait;
use jiff::{civil::Date, tz::TimeZone};
use mockall::automock;
use rust_decimal::Decimal;
use sqlx::{Postgres, Transaction};
use tracing::{info, warn};

use crate::{
    calendar::{self, DayWindow},
    database::Db,
    domain::{
        customers::{models::CustomerUuid, repository::PgCustomersRepository},
        orders::{
            errors::OrdersServiceError,
            models::{
                NewOrder, OrderDetails, OrderLineUuid, OrderRecord, OrderUuid, Receipt,
                ReceiptLine,
            },
            repository::{LineRow, PgOrdersRepository},
        },
        staff::{models::StaffUuid, repository::PgStaffRepository},
    },
};

#[derive(Debug, Clone)]
pub struct PgOrdersService {
    db: Db,
    time_zone: TimeZone,
    orders: PgOrdersRepository,
    staff: PgStaffRepository,
    customers: PgCustomersRepository,
}

impl PgOrdersService {
    #[must_use]
    pub fn new(db: Db, time_zone: TimeZone) -> Self {
        Self {
            db,
            time_zone,
            orders: PgOrdersRepository::new(),
            staff: PgStaffRepository::new(),
            customers: PgCustomersRepository::new(),
        }
    }

    /// The earliest-hired active staff member, or the fallback cashier.
    async fn resolve_staff(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<StaffUuid, OrdersServiceError> {
        let member = match self.staff.earliest_active_staff(tx).await? {
            Some(member) => member,
            None => {
                let hired_on = calendar::today(&self.time_zone);

                self.staff.ensure_default_staff(tx, hired_on).await?
            }
        };

        member.uuid.ok_or(OrdersServiceError::UnsavedStaff)
    }

    async fn resolve_customer(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<CustomerUuid, OrdersServiceError> {
        let customer = match self.customers.first_customer(tx).await? {
            Some(customer) => customer,
            None => self.customers.ensure_default_customer(tx).await?,
        };

        Ok(customer.uuid)
    }

    /// Write the header and every line. Nothing here commits.
    async fn write_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: &NewOrder,
        lines: &[LineRow],
    ) -> Result<Receipt, OrdersServiceError> {
        let staff = self.resolve_staff(tx).await?;
        let customer = self.resolve_customer(tx).await?;
        let totals = order.totals();

        self.orders
            .create_order(tx, order.uuid, order.placed_at, totals, staff, customer)
            .await?;

        self.orders.create_order_lines(tx, order.uuid, lines).await?;

        Ok(Receipt {
            order_uuid: order.uuid,
            placed_at: order.placed_at,
            staff_uuid: staff,
            customer_uuid: customer,
            lines: order
                .lines
                .iter()
                .map(|line| ReceiptLine {
                    name: line.name.clone(),
                    quantity: line.quantity,
                    unit_price: line.unit_price,
                    line_total: line.line_total(),
                })
                .collect(),
            totals,
        })
    }
}

/// Check an order request without touching the database and produce the
/// rows to insert.
fn validate(order: &NewOrder) -> Result<Vec<LineRow>, OrdersServiceError> {
    if order.lines.is_empty() {
        return Err(OrdersServiceError::EmptyOrder);
    }

    let total = order.totals().total;

    if total <= Decimal::ZERO {
        return Err(OrdersServiceError::NonPositiveTotal(total));
    }

    order
        .lines
        .iter()
        .map(|line| {
            let quantity = i32::try_from(line.quantity)
                .ok()
                .filter(|quantity| *quantity > 0)
                .ok_or_else(|| OrdersServiceError::InvalidQuantity {
                    item: line.name.clone(),
                    quantity: line.quantity,
                })?;

            let item = line
                .item
                .ok_or_else(|| OrdersServiceError::UnresolvedItem(line.name.clone()))?;

            Ok(LineRow {
                uuid: OrderLineUuid::new(),
                item,
                quantity,
                unit_price: line.unit_price,
            })
        })
        .collect()
}

#[async_trait]
impl OrdersService for PgOrdersService {
    #[tracing::instrument(
        name = "orders.service.submit",
        skip(self, order),
        fields(order_uuid = %order.uuid, line_count = order.lines.len()),
        err
    )]
    async fn submit(&self, order: NewOrder) -> Result<Receipt, OrdersServiceError> {
        let lines = validate(&order)?;

        let (tx, receipt) = self
            .db
            .bounded(async {
                let mut tx = self.db.begin().await?;

                match self.write_order(&mut tx, &order, &lines).await {
                    Ok(receipt) => Ok::<_, OrdersServiceError>((tx, receipt)),
                    Err(error) => {
                        if let Err(rollback) = tx.rollback().await {
                            warn!(error = %rollback, "order rollback failed");
                        }

                        Err(error)
                    }
                }
            })
            .await?;

        // Outside the deadline: a Timeout always means nothing was stored.
        tx.commit().await?;

        info!(
            order_uuid = %receipt.order_uuid,
            total = %receipt.totals.total,
            "order submitted"
        );

        Ok(receipt)
    }

    #[tracing::instrument(name = "orders.service.get_order", skip(self), err)]
    async fn get_order(&self, order: OrderUuid) -> Result<OrderDetails, OrdersServiceError> {
        self.db
            .bounded(async {
                let mut tx = self.db.begin().await?;

                let record = self.orders.get_order(&mut tx, order).await?;
                let lines = self.orders.list_order_lines(&mut tx, order).await?;

                tx.commit().await?;

                Ok::<_, OrdersServiceError>(OrderDetails {
                    order: record,
                    lines,
                })
            })
            .await
    }

    #[tracing::instrument(name = "orders.service.list_orders", skip(self), err)]
    async fn list_orders(&self, date: Date) -> Result<Vec<OrderRecord>, OrdersServiceError> {
        let window = DayWindow::for_date(date, &self.time_zone)?;

        self.db
            .bounded(async {
                let mut tx = self.db.begin().await?;

                let orders = self
                    .orders
                    .list_orders_between(&mut tx, window.start, window.end)
                    .await?;

                tx.commit().await?;

                Ok::<_, OrdersServiceError>(orders)
            })
            .await
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Persists an order and all of its lines in one unit of work, attributing
    /// it to the earliest active staff member and the first customer on file.
    /// Nothing is written unless every line is.
    ///
    /// The unit-of-work deadline covers everything up to the commit. A
    /// [`OrdersServiceError::Timeout`] therefore means the order was not
    /// stored; the commit itself is never cut short.
    async fn submit(&self, order: NewOrder) -> Result<Receipt, OrdersServiceError>;

    /// Retrieves a saved order with its lines in entry order.
    async fn get_order(&self, order: OrderUuid) -> Result<OrderDetails, OrdersServiceError>;

    /// Retrieves the orders placed on a local calendar date.
    async fn list_orders(&self, date: Date) -> Result<Vec<OrderRecord>, OrdersServiceError>;
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use jiff::{Timestamp, civil::date};
    use smallvec::smallvec;
    use sqlx::postgres::PgPoolOptions;
    use tally::{money::Rate, totals::PricingPolicy};
    use testresult::TestResult;

    use crate::{
        domain::{
            catalog::{CatalogService, CatalogServiceError, models::CatalogItemUuid},
            customers::{CustomersService, models::DEFAULT_CUSTOMER_NAME},
            orders::models::NewOrderLine,
            staff::{
                StaffService, StaffServiceError,
                models::{DEFAULT_STAFF_NAME, StaffMember},
            },
        },
        test::{TestContext, helpers},
    };

    use super::*;

    fn lazy_service() -> TestResult<(sqlx::PgPool, PgOrdersService)> {
        let pool = PgPoolOptions::new().connect_lazy("postgres://localhost/unreachable")?;
        let db = Db::new(pool.clone(), Duration::from_secs(1));

        Ok((pool, PgOrdersService::new(db, TimeZone::UTC)))
    }

    fn order_with(lines: Vec<NewOrderLine>, policy: PricingPolicy) -> NewOrder {
        NewOrder {
            uuid: OrderUuid::new(),
            placed_at: Timestamp::now(),
            policy,
            lines: lines.into_iter().collect(),
        }
    }

    #[tokio::test]
    async fn empty_order_is_rejected_before_any_io() -> TestResult {
        let (pool, service) = lazy_service()?;

        let result = service
            .submit(order_with(vec![], PricingPolicy::default()))
            .await;

        assert!(matches!(result, Err(OrdersServiceError::EmptyOrder)));
        assert_eq!(pool.size(), 0);

        Ok(())
    }

    #[tokio::test]
    async fn zero_total_is_rejected() -> TestResult {
        let (pool, service) = lazy_service()?;
        let policy = PricingPolicy::new(Rate::ZERO, Rate::ZERO);

        let result = service
            .submit(order_with(
                vec![NewOrderLine {
                    item: Some(CatalogItemUuid::new()),
                    name: "Water Cup".to_string(),
                    quantity: 1,
                    unit_price: Decimal::ZERO,
                }],
                policy,
            ))
            .await;

        assert!(matches!(
            result,
            Err(OrdersServiceError::NonPositiveTotal(total)) if total == Decimal::ZERO
        ));
        assert_eq!(pool.size(), 0);

        Ok(())
    }

    #[tokio::test]
    async fn zero_quantity_line_is_rejected() -> TestResult {
        let (_pool, service) = lazy_service()?;

        let result = service
            .submit(NewOrder {
                lines: smallvec![
                    NewOrderLine {
                        item: Some(CatalogItemUuid::new()),
                        name: "Thai Tea".to_string(),
                        quantity: 1,
                        unit_price: Decimal::new(500, 2),
                    },
                    NewOrderLine {
                        item: Some(CatalogItemUuid::new()),
                        name: "Taro Slush".to_string(),
                        quantity: 0,
                        unit_price: Decimal::new(550, 2),
                    },
                ],
                ..order_with(vec![], PricingPolicy::default())
            })
            .await;

        assert!(matches!(
            result,
            Err(OrdersServiceError::InvalidQuantity { quantity: 0, .. })
        ));

        Ok(())
    }

    #[tokio::test]
    async fn unsaved_item_is_unresolved() -> TestResult {
        let (_pool, service) = lazy_service()?;

        let result = service
            .submit(order_with(
                vec![NewOrderLine {
                    item: None,
                    name: "Off-menu Special".to_string(),
                    quantity: 1,
                    unit_price: Decimal::new(700, 2),
                }],
                PricingPolicy::default(),
            ))
            .await;

        assert!(matches!(
            result,
            Err(OrdersServiceError::UnresolvedItem(name)) if name == "Off-menu Special"
        ));

        Ok(())
    }

    #[tokio::test]
    async fn submit_persists_order_and_lines() -> TestResult {
        let ctx = TestContext::new().await;

        let tea = helpers::create_item(&ctx, "Thai Tea", Decimal::new(500, 2)).await?;
        let slush = helpers::create_item(&ctx, "Taro Slush", Decimal::new(700, 2)).await?;

        let order = helpers::order_for(&[(&tea, 2), (&slush, 1)], PricingPolicy::default());
        let receipt = ctx.orders.submit(order.clone()).await?;

        assert_eq!(receipt.order_uuid, order.uuid);
        assert_eq!(receipt.totals.subtotal, Decimal::new(1700, 2));
        assert_eq!(receipt.totals.tax, Decimal::new(136, 2));
        assert_eq!(receipt.totals.total, Decimal::new(1836, 2));

        let details = ctx.orders.get_order(order.uuid).await?;

        assert_eq!(details.order.total, Decimal::new(1836, 2));
        assert_eq!(details.order.staff_uuid, receipt.staff_uuid);
        assert_eq!(details.order.customer_uuid, receipt.customer_uuid);

        let names: Vec<&str> = details
            .lines
            .iter()
            .map(|line| line.item_name.as_str())
            .collect();

        assert_eq!(names, vec!["Thai Tea", "Taro Slush"]);
        assert_eq!(details.lines.first().map(|line| line.quantity), Some(2));

        Ok(())
    }

    #[tokio::test]
    async fn submit_creates_default_staff_and_customer_on_first_use() -> TestResult {
        let ctx = TestContext::new().await;

        let tea = helpers::create_item(&ctx, "Thai Tea", Decimal::new(500, 2)).await?;

        ctx.orders
            .submit(helpers::order_for(&[(&tea, 1)], PricingPolicy::default()))
            .await?;

        let staff = ctx.staff.list_staff().await?;
        let customers = ctx.customers.list_customers().await?;

        assert_eq!(staff.len(), 1);
        assert_eq!(staff.first().map(|m| m.name.as_str()), Some(DEFAULT_STAFF_NAME));
        assert_eq!(customers.len(), 1);
        assert_eq!(
            customers.first().map(|c| c.name.as_str()),
            Some(DEFAULT_CUSTOMER_NAME)
        );

        Ok(())
    }

    #[tokio::test]
    async fn submit_attributes_earliest_active_staff() -> TestResult {
        let ctx = TestContext::new().await;

        let tea = helpers::create_item(&ctx, "Thai Tea", Decimal::new(500, 2)).await?;

        let mut veteran = StaffMember::new("Bea", "Manager", date(2019, 2, 1));
        veteran.work_history.active = false;

        ctx.staff.create_staff(veteran).await?;

        let lead = ctx
            .staff
            .create_staff(StaffMember::new("Ana", "Shift Lead", date(2021, 6, 1)))
            .await?;

        ctx.staff
            .create_staff(StaffMember::new("Cal", "Cashier", date(2024, 1, 15)))
            .await?;

        let receipt = ctx
            .orders
            .submit(helpers::order_for(&[(&tea, 1)], PricingPolicy::default()))
            .await?;

        assert_eq!(Some(receipt.staff_uuid), lead.uuid);

        Ok(())
    }

    #[tokio::test]
    async fn deactivated_default_cashier_is_reactivated_for_sale() -> TestResult {
        let ctx = TestContext::new().await;

        let tea = helpers::create_item(&ctx, "Thai Tea", Decimal::new(500, 2)).await?;

        let mut cashier = ctx.staff.ensure_default_staff().await?;
        cashier.work_history.active = false;

        ctx.staff.update_staff(cashier).await?;

        let receipt = ctx
            .orders
            .submit(helpers::order_for(&[(&tea, 1)], PricingPolicy::default()))
            .await?;

        let staff = ctx.staff.list_staff().await?;
        let attributed = staff
            .iter()
            .find(|member| member.uuid == Some(receipt.staff_uuid))
            .ok_or("expected the order's staff member to exist")?;

        assert_eq!(staff.len(), 1);
        assert_eq!(attributed.name, DEFAULT_STAFF_NAME);
        assert!(attributed.is_active());

        Ok(())
    }

    #[tokio::test]
    async fn timed_out_submit_writes_nothing() -> TestResult {
        let ctx = TestContext::new().await;

        let tea = helpers::create_item(&ctx, "Thai Tea", Decimal::new(500, 2)).await?;
        let impatient = PgOrdersService::new(
            Db::new(ctx.db.pool().clone(), Duration::ZERO),
            TimeZone::UTC,
        );

        let order = helpers::order_for(&[(&tea, 1)], PricingPolicy::default());
        let result = impatient.submit(order.clone()).await;

        assert!(matches!(result, Err(OrdersServiceError::Timeout(_))));
        assert!(matches!(
            ctx.orders.get_order(order.uuid).await,
            Err(OrdersServiceError::NotFound)
        ));

        Ok(())
    }

    #[tokio::test]
    async fn failed_line_insert_leaves_no_order() -> TestResult {
        let ctx = TestContext::new().await;

        let tea = helpers::create_item(&ctx, "Thai Tea", Decimal::new(500, 2)).await?;

        let order = order_with(
            vec![
                NewOrderLine {
                    item: tea.uuid,
                    name: tea.name.clone(),
                    quantity: 1,
                    unit_price: tea.price,
                },
                NewOrderLine {
                    item: Some(CatalogItemUuid::new()),
                    name: "Ghost Drink".to_string(),
                    quantity: 1,
                    unit_price: Decimal::new(400, 2),
                },
            ],
            PricingPolicy::default(),
        );

        let error = ctx
            .orders
            .submit(order.clone())
            .await
            .err()
            .ok_or("expected the line insert to fail")?;

        assert!(matches!(error, OrdersServiceError::UnknownItem(_)));
        assert!(std::error::Error::source(&error).is_some());
        assert!(matches!(
            ctx.orders.get_order(order.uuid).await,
            Err(OrdersServiceError::NotFound)
        ));
        assert!(
            ctx.orders
                .list_orders(calendar::today(&TimeZone::UTC))
                .await?
                .is_empty()
        );

        Ok(())
    }

    #[tokio::test]
    async fn ordered_item_cannot_be_deleted() -> TestResult {
        let ctx = TestContext::new().await;

        let tea = helpers::create_item(&ctx, "Thai Tea", Decimal::new(500, 2)).await?;

        ctx.orders
            .submit(helpers::order_for(&[(&tea, 1)], PricingPolicy::default()))
            .await?;

        let result = ctx.catalog.delete_item(&tea).await;

        assert!(matches!(result, Err(CatalogServiceError::ReferencedByOrder)));
        assert_eq!(
            ctx.catalog.list_items().await?.first().map(|item| item.uuid),
            Some(tea.uuid)
        );

        Ok(())
    }

    #[tokio::test]
    async fn staff_with_orders_cannot_be_deleted() -> TestResult {
        let ctx = TestContext::new().await;

        let tea = helpers::create_item(&ctx, "Thai Tea", Decimal::new(500, 2)).await?;
        let ana = ctx
            .staff
            .create_staff(StaffMember::new("Ana", "Cashier", date(2023, 5, 1)))
            .await?;

        ctx.orders
            .submit(helpers::order_for(&[(&tea, 1)], PricingPolicy::default()))
            .await?;

        let result = ctx.staff.delete_staff(&ana).await;

        assert!(matches!(result, Err(StaffServiceError::ReferencedByOrder)));

        Ok(())
    }

    #[tokio::test]
    async fn list_orders_excludes_other_days() -> TestResult {
        let ctx = TestContext::new().await;

        let tea = helpers::create_item(&ctx, "Thai Tea", Decimal::new(500, 2)).await?;

        let day = date(2026, 3, 14);
        let mut inside = helpers::order_for(&[(&tea, 1)], PricingPolicy::default());
        let mut next_day = helpers::order_for(&[(&tea, 1)], PricingPolicy::default());

        inside.placed_at = day.at(23, 59, 59, 0).to_zoned(TimeZone::UTC)?.timestamp();
        next_day.placed_at = day.tomorrow()?.to_zoned(TimeZone::UTC)?.timestamp();

        ctx.orders.submit(inside.clone()).await?;
        ctx.orders.submit(next_day).await?;

        let listed = ctx.orders.list_orders(day).await?;

        assert_eq!(listed.len(), 1);
        assert_eq!(listed.first().map(|order| order.uuid), Some(inside.uuid));

        Ok(())
    }
}
