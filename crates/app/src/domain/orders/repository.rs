//! Orders Repository

use jiff::Timestamp;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use rust_decimal::Decimal;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};
use tally::totals::Totals;
use tracing::debug;
use uuid::Uuid;

use crate::domain::{
    catalog::models::CatalogItemUuid,
    customers::models::CustomerUuid,
    orders::models::{OrderLineRecord, OrderLineUuid, OrderRecord, OrderUuid},
    staff::models::StaffUuid,
};

const CREATE_ORDER_SQL: &str = include_str!("sql/create_order.sql");
const CREATE_ORDER_LINES_SQL: &str = include_str!("sql/create_order_lines.sql");
const GET_ORDER_SQL: &str = include_str!("sql/get_order.sql");
const LIST_ORDER_LINES_SQL: &str = include_str!("sql/list_order_lines.sql");
const LIST_ORDERS_BETWEEN_SQL: &str = include_str!("sql/list_orders_between.sql");

/// A validated line ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct LineRow {
    pub uuid: OrderLineUuid,
    pub item: CatalogItemUuid,
    pub quantity: i32,
    pub unit_price: Decimal,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOrdersRepository;

impl PgOrdersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    #[tracing::instrument(
        name = "orders.repository.create_order",
        skip(self, tx, totals),
        fields(order_uuid = %order, total = %totals.total),
        err
    )]
    pub(crate) async fn create_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        placed_at: Timestamp,
        totals: Totals,
        staff: StaffUuid,
        customer: CustomerUuid,
    ) -> Result<(), sqlx::Error> {
        query(CREATE_ORDER_SQL)
            .bind(order.into_uuid())
            .bind(SqlxTimestamp::from(placed_at))
            .bind(totals.subtotal)
            .bind(totals.tax)
            .bind(totals.total)
            .bind(staff.into_uuid())
            .bind(customer.into_uuid())
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    #[tracing::instrument(
        name = "orders.repository.create_order_lines",
        skip(self, tx, lines),
        fields(order_uuid = %order, line_count = lines.len()),
        err
    )]
    pub(crate) async fn create_order_lines(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        lines: &[LineRow],
    ) -> Result<u64, sqlx::Error> {
        let uuids: Vec<Uuid> = lines.iter().map(|line| line.uuid.into_uuid()).collect();
        let items: Vec<Uuid> = lines.iter().map(|line| line.item.into_uuid()).collect();
        let quantities: Vec<i32> = lines.iter().map(|line| line.quantity).collect();
        let unit_prices: Vec<Decimal> = lines.iter().map(|line| line.unit_price).collect();

        let positions: Vec<i32> = (1..).take(lines.len()).collect();

        let inserted = query(CREATE_ORDER_LINES_SQL)
            .bind(order.into_uuid())
            .bind(&uuids)
            .bind(&positions)
            .bind(&items)
            .bind(&quantities)
            .bind(&unit_prices)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        debug!(inserted, "inserted order lines");

        Ok(inserted)
    }

    pub(crate) async fn get_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
    ) -> Result<OrderRecord, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(GET_ORDER_SQL)
            .bind(order.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_order_lines(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
    ) -> Result<Vec<OrderLineRecord>, sqlx::Error> {
        query_as::<Postgres, OrderLineRecord>(LIST_ORDER_LINES_SQL)
            .bind(order.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn list_orders_between(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        start: Timestamp,
        end: Timestamp,
    ) -> Result<Vec<OrderRecord>, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(LIST_ORDERS_BETWEEN_SQL)
            .bind(SqlxTimestamp::from(start))
            .bind(SqlxTimestamp::from(end))
            .fetch_all(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for OrderRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: OrderUuid::from_uuid(row.try_get("uuid")?),
            placed_at: row.try_get::<SqlxTimestamp, _>("placed_at")?.to_jiff(),
            subtotal: row.try_get("subtotal")?,
            tax: row.try_get("tax")?,
            total: row.try_get("total")?,
            staff_uuid: StaffUuid::from_uuid(row.try_get("employee_uuid")?),
            customer_uuid: CustomerUuid::from_uuid(row.try_get("customer_uuid")?),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for OrderLineRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let quantity: i32 = row.try_get("quantity")?;

        let quantity = u32::try_from(quantity).map_err(|e| sqlx::Error::ColumnDecode {
            index: "quantity".to_string(),
            source: Box::new(e),
        })?;

        Ok(Self {
            uuid: OrderLineUuid::from_uuid(row.try_get("uuid")?),
            item_uuid: CatalogItemUuid::from_uuid(row.try_get("item_uuid")?),
            item_name: row.try_get("item_name")?,
            quantity,
            unit_price: row.try_get("unit_price")?,
        })
    }
}
