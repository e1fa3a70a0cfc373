//! Reports Repository

use jiff::Timestamp;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use rust_decimal::Decimal;
use sqlx::{Postgres, Row, Transaction, query, query_scalar};

const TOTAL_SALES_BETWEEN_SQL: &str = include_str!("sql/total_sales_between.sql");
const ORDER_COUNT_BETWEEN_SQL: &str = include_str!("sql/order_count_between.sql");
const LINE_TOTALS_BETWEEN_SQL: &str = include_str!("sql/line_totals_between.sql");

/// Line aggregates over a window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct LineTotals {
    pub net_sales: Decimal,
    pub items_sold: i64,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PgReportsRepository;

impl PgReportsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn total_sales_between(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        start: Timestamp,
        end: Timestamp,
    ) -> Result<Decimal, sqlx::Error> {
        query_scalar::<Postgres, Decimal>(TOTAL_SALES_BETWEEN_SQL)
            .bind(SqlxTimestamp::from(start))
            .bind(SqlxTimestamp::from(end))
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn order_count_between(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        start: Timestamp,
        end: Timestamp,
    ) -> Result<i64, sqlx::Error> {
        query_scalar::<Postgres, i64>(ORDER_COUNT_BETWEEN_SQL)
            .bind(SqlxTimestamp::from(start))
            .bind(SqlxTimestamp::from(end))
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn line_totals_between(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        start: Timestamp,
        end: Timestamp,
    ) -> Result<LineTotals, sqlx::Error> {
        let row = query(LINE_TOTALS_BETWEEN_SQL)
            .bind(SqlxTimestamp::from(start))
            .bind(SqlxTimestamp::from(end))
            .fetch_one(&mut **tx)
            .await?;

        Ok(LineTotals {
            net_sales: row.try_get("net_sales")?,
            items_sold: row.try_get("items_sold")?,
        })
    }
}
