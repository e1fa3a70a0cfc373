//! Inventory Repository

use jiff::civil::Date;
use jiff_sqlx::Date as SqlxDate;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::domain::{
    catalog::models::CatalogItemUuid,
    inventory::models::{InventoryRecord, InventoryUuid, StockLevels},
};

const LIST_RECORDS_SQL: &str = include_str!("sql/list_records.sql");
const GET_RECORD_SQL: &str = include_str!("sql/get_record.sql");
const CREATE_RECORD_SQL: &str = include_str!("sql/create_record.sql");
const LINK_ITEM_SQL: &str = include_str!("sql/link_item.sql");
const UPDATE_RECORD_SQL: &str = include_str!("sql/update_record.sql");
const RESTOCK_RECORD_SQL: &str = include_str!("sql/restock_record.sql");
const DELETE_RECORD_SQL: &str = include_str!("sql/delete_record.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgInventoryRepository;

impl PgInventoryRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_records(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<InventoryRecord>, sqlx::Error> {
        query_as::<Postgres, InventoryRecord>(LIST_RECORDS_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_record(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        record: InventoryUuid,
    ) -> Result<InventoryRecord, sqlx::Error> {
        query_as::<Postgres, InventoryRecord>(GET_RECORD_SQL)
            .bind(record.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    #[tracing::instrument(
        name = "inventory.repository.create_record",
        skip(self, tx, unit),
        fields(inventory_uuid = %record, item_uuid = %item),
        err
    )]
    pub(crate) async fn create_record(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        record: InventoryUuid,
        item: CatalogItemUuid,
        levels: StockLevels,
        unit: &str,
        counted_on: Date,
    ) -> Result<(), sqlx::Error> {
        query(CREATE_RECORD_SQL)
            .bind(record.into_uuid())
            .bind(levels.quantity)
            .bind(unit)
            .bind(levels.par_level)
            .bind(levels.reorder_point)
            .bind(SqlxDate::from(counted_on))
            .execute(&mut **tx)
            .await?;

        query(LINK_ITEM_SQL)
            .bind(item.into_uuid())
            .bind(record.into_uuid())
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    pub(crate) async fn update_record(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        record: InventoryUuid,
        levels: StockLevels,
        unit: &str,
        counted_on: Date,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(UPDATE_RECORD_SQL)
            .bind(record.into_uuid())
            .bind(levels.quantity)
            .bind(unit)
            .bind(levels.par_level)
            .bind(levels.reorder_point)
            .bind(SqlxDate::from(counted_on))
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn restock_record(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        record: InventoryUuid,
        amount: i32,
        restocked_on: Date,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(RESTOCK_RECORD_SQL)
            .bind(record.into_uuid())
            .bind(amount)
            .bind(SqlxDate::from(restocked_on))
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn delete_record(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        record: InventoryUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_RECORD_SQL)
            .bind(record.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

fn count_column(row: &PgRow, column: &str) -> sqlx::Result<u32> {
    let value: i32 = row.try_get(column)?;

    u32::try_from(value).map_err(|e| sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: Box::new(e),
    })
}

impl<'r> FromRow<'r, PgRow> for InventoryRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: Some(InventoryUuid::from_uuid(row.try_get("uuid")?)),
            item_uuid: Some(CatalogItemUuid::from_uuid(row.try_get("item_uuid")?)),
            item_name: row.try_get("item_name")?,
            quantity: count_column(row, "quantity")?,
            unit: row.try_get("unit")?,
            par_level: count_column(row, "par_level")?,
            reorder_point: count_column(row, "reorder_point")?,
            last_restocked: row
                .try_get::<Option<SqlxDate>, _>("last_restocked")?
                .map(SqlxDate::to_jiff),
            last_counted: row
                .try_get::<Option<SqlxDate>, _>("last_counted")?
                .map(SqlxDate::to_jiff),
        })
    }
}
