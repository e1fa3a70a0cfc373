//! Catalog Repository

use rust_decimal::Decimal;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};
use tracing::debug;
use uuid::Uuid;

use crate::domain::catalog::models::{CatalogItem, CatalogItemUuid};

const LIST_ITEMS_SQL: &str = include_str!("sql/list_items.sql");
const GET_ITEM_SQL: &str = include_str!("sql/get_item.sql");
const FIND_ITEM_BY_NAME_SQL: &str = include_str!("sql/find_item_by_name.sql");
const CREATE_ITEM_SQL: &str = include_str!("sql/create_item.sql");
const UPDATE_ITEM_SQL: &str = include_str!("sql/update_item.sql");
const DELETE_ITEM_SQL: &str = include_str!("sql/delete_item.sql");
const SEED_ITEMS_SQL: &str = include_str!("sql/seed_items.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCatalogRepository;

impl PgCatalogRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<CatalogItem>, sqlx::Error> {
        query_as::<Postgres, CatalogItem>(LIST_ITEMS_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        item: CatalogItemUuid,
    ) -> Result<CatalogItem, sqlx::Error> {
        query_as::<Postgres, CatalogItem>(GET_ITEM_SQL)
            .bind(item.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn find_item_by_name(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        name: &str,
    ) -> Result<Option<CatalogItem>, sqlx::Error> {
        query_as::<Postgres, CatalogItem>(FIND_ITEM_BY_NAME_SQL)
            .bind(name)
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn create_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        uuid: CatalogItemUuid,
        item: &CatalogItem,
    ) -> Result<CatalogItem, sqlx::Error> {
        query_as::<Postgres, CatalogItem>(CREATE_ITEM_SQL)
            .bind(uuid.into_uuid())
            .bind(&item.name)
            .bind(&item.category)
            .bind(item.price)
            .bind(item.active)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        uuid: CatalogItemUuid,
        item: &CatalogItem,
    ) -> Result<CatalogItem, sqlx::Error> {
        query_as::<Postgres, CatalogItem>(UPDATE_ITEM_SQL)
            .bind(uuid.into_uuid())
            .bind(&item.name)
            .bind(&item.category)
            .bind(item.price)
            .bind(item.active)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        item: CatalogItemUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_ITEM_SQL)
            .bind(item.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    #[tracing::instrument(
        name = "catalog.repository.seed_items",
        skip(self, tx, items),
        fields(item_count = items.len()),
        err
    )]
    pub(crate) async fn seed_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        items: &[CatalogItem],
    ) -> Result<u64, sqlx::Error> {
        if items.is_empty() {
            return Ok(0);
        }

        let uuids: Vec<Uuid> = items
            .iter()
            .map(|item| item.uuid.unwrap_or_else(CatalogItemUuid::new).into_uuid())
            .collect();

        let names: Vec<String> = items.iter().map(|item| item.name.clone()).collect();
        let categories: Vec<String> = items.iter().map(|item| item.category.clone()).collect();
        let prices: Vec<Decimal> = items.iter().map(|item| item.price).collect();
        let active: Vec<bool> = items.iter().map(|item| item.active).collect();

        let inserted = query(SEED_ITEMS_SQL)
            .bind(&uuids)
            .bind(&names)
            .bind(&categories)
            .bind(&prices)
            .bind(&active)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        debug!(inserted, "seeded catalog items");

        Ok(inserted)
    }
}

impl<'r> FromRow<'r, PgRow> for CatalogItem {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: Some(CatalogItemUuid::from_uuid(row.try_get("uuid")?)),
            name: row.try_get("name")?,
            category: row.try_get("category")?,
            price: row.try_get("price")?,
            active: row.try_get("active")?,
        })
    }
}
