//! Inventory service.

use async_trait::async_trait;
use jiff::tz::TimeZone;
use mockall::automock;
use tracing::{info, warn};

use crate::{
    calendar,
    database::Db,
    domain::{
        catalog::repository::PgCatalogRepository,
        inventory::{
            errors::InventoryServiceError,
            models::{InventoryRecord, InventoryUuid, StockLevels},
            repository::PgInventoryRepository,
        },
    },
};

#[derive(Debug, Clone)]
pub struct PgInventoryService {
    db: Db,
    time_zone: TimeZone,
    inventory: PgInventoryRepository,
    catalog: PgCatalogRepository,
}

impl PgInventoryService {
    #[must_use]
    pub fn new(db: Db, time_zone: TimeZone) -> Self {
        Self {
            db,
            time_zone,
            inventory: PgInventoryRepository::new(),
            catalog: PgCatalogRepository::new(),
        }
    }
}

#[async_trait]
impl InventoryService for PgInventoryService {
    #[tracing::instrument(name = "inventory.service.list_records", skip(self), err)]
    async fn list_records(&self) -> Result<Vec<InventoryRecord>, InventoryServiceError> {
        self.db
            .bounded(async {
                let mut tx = self.db.begin().await?;

                let records = self.inventory.list_records(&mut tx).await?;

                tx.commit().await?;

                Ok::<_, InventoryServiceError>(records)
            })
            .await
    }

    #[tracing::instrument(
        name = "inventory.service.get_record",
        skip(self),
        fields(inventory_uuid = %record),
        err
    )]
    async fn get_record(
        &self,
        record: InventoryUuid,
    ) -> Result<InventoryRecord, InventoryServiceError> {
        self.db
            .bounded(async {
                let mut tx = self.db.begin().await?;

                let record = self.inventory.get_record(&mut tx, record).await?;

                tx.commit().await?;

                Ok::<_, InventoryServiceError>(record)
            })
            .await
    }

    #[tracing::instrument(
        name = "inventory.service.create_record",
        skip(self, record),
        fields(item_name = %record.item_name),
        err
    )]
    async fn create_record(
        &self,
        record: InventoryRecord,
    ) -> Result<InventoryRecord, InventoryServiceError> {
        let uuid = record.uuid.unwrap_or_else(InventoryUuid::new);
        let levels = StockLevels::try_from(&record)?;
        let counted_on = record
            .last_counted
            .unwrap_or_else(|| calendar::today(&self.time_zone));

        let created = self
            .db
            .bounded(async {
                let mut tx = self.db.begin().await?;

                let item = self
                    .catalog
                    .find_item_by_name(&mut tx, &record.item_name)
                    .await?
                    .and_then(|item| item.uuid)
                    .ok_or_else(|| {
                        InventoryServiceError::CatalogItemNotFound(record.item_name.clone())
                    })?;

                self.inventory
                    .create_record(&mut tx, uuid, item, levels, &record.unit, counted_on)
                    .await?;

                let created = self.inventory.get_record(&mut tx, uuid).await?;

                tx.commit().await?;

                Ok::<_, InventoryServiceError>(created)
            })
            .await?;

        info!(inventory_uuid = %uuid, "created inventory record");

        Ok(created)
    }

    #[tracing::instrument(name = "inventory.service.update_record", skip(self, record), err)]
    async fn update_record(
        &self,
        record: InventoryRecord,
    ) -> Result<Option<InventoryRecord>, InventoryServiceError> {
        let Some(uuid) = record.uuid else {
            return Ok(None);
        };

        let levels = StockLevels::try_from(&record)?;
        let counted_on = calendar::today(&self.time_zone);

        self.db
            .bounded(async {
                let mut tx = self.db.begin().await?;

                let rows_affected = self
                    .inventory
                    .update_record(&mut tx, uuid, levels, &record.unit, counted_on)
                    .await?;

                if rows_affected == 0 {
                    return Err(InventoryServiceError::NotFound);
                }

                let updated = self.inventory.get_record(&mut tx, uuid).await?;

                tx.commit().await?;

                Ok(Some(updated))
            })
            .await
    }

    #[tracing::instrument(
        name = "inventory.service.restock",
        skip(self, record),
        fields(inventory_uuid = tracing::field::Empty),
        err
    )]
    async fn restock(
        &self,
        record: &InventoryRecord,
        amount: u32,
    ) -> Result<InventoryRecord, InventoryServiceError> {
        let uuid = record.uuid.ok_or(InventoryServiceError::NotPersisted)?;

        tracing::Span::current().record("inventory_uuid", tracing::field::display(uuid));

        let amount = i32::try_from(amount)?;
        let restocked_on = calendar::today(&self.time_zone);

        let restocked = self
            .db
            .bounded(async {
                let mut tx = self.db.begin().await?;

                let rows_affected = self
                    .inventory
                    .restock_record(&mut tx, uuid, amount, restocked_on)
                    .await?;

                if rows_affected == 0 {
                    return Err(InventoryServiceError::NotFound);
                }

                let restocked = self.inventory.get_record(&mut tx, uuid).await?;

                tx.commit().await?;

                Ok(restocked)
            })
            .await?;

        if restocked.needs_restock() {
            warn!(
                inventory_uuid = %uuid,
                quantity = restocked.quantity,
                reorder_point = restocked.reorder_point,
                "stock still at or below reorder point after restock"
            );
        }

        Ok(restocked)
    }

    #[tracing::instrument(name = "inventory.service.delete_record", skip(self, record), err)]
    async fn delete_record(&self, record: &InventoryRecord) -> Result<(), InventoryServiceError> {
        let uuid = record.uuid.ok_or(InventoryServiceError::NotPersisted)?;

        self.db
            .bounded(async {
                let mut tx = self.db.begin().await?;

                let rows_affected = self.inventory.delete_record(&mut tx, uuid).await?;

                if rows_affected == 0 {
                    return Err(InventoryServiceError::NotFound);
                }

                tx.commit().await?;

                Ok(())
            })
            .await?;

        info!(inventory_uuid = %uuid, "deleted inventory record");

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait InventoryService: Send + Sync {
    /// Retrieves every inventory record with its catalog item name.
    async fn list_records(&self) -> Result<Vec<InventoryRecord>, InventoryServiceError>;

    /// Retrieve a single inventory record.
    async fn get_record(
        &self,
        record: InventoryUuid,
    ) -> Result<InventoryRecord, InventoryServiceError>;

    /// Saves a new record for the catalog item named in `record.item_name`.
    async fn create_record(
        &self,
        record: InventoryRecord,
    ) -> Result<InventoryRecord, InventoryServiceError>;

    /// Overwrites a saved record's counts and stamps today as the last count.
    /// Unsaved records are left alone and `None` is returned.
    async fn update_record(
        &self,
        record: InventoryRecord,
    ) -> Result<Option<InventoryRecord>, InventoryServiceError>;

    /// Adds `amount` to a saved record and stamps today as the last restock.
    async fn restock(
        &self,
        record: &InventoryRecord,
        amount: u32,
    ) -> Result<InventoryRecord, InventoryServiceError>;

    /// Deletes a saved record and its catalog link.
    async fn delete_record(&self, record: &InventoryRecord) -> Result<(), InventoryServiceError>;
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;
    use rust_decimal::Decimal;
    use testresult::TestResult;

    use crate::{
        domain::catalog::{CatalogService, CatalogServiceError, models::CatalogItem},
        test::TestContext,
    };

    use super::*;

    async fn with_item(ctx: &TestContext, name: &str) -> TestResult<CatalogItem> {
        Ok(ctx
            .catalog
            .create_item(CatalogItem::new(name, "Toppings", Decimal::new(75, 2)))
            .await?)
    }

    #[tokio::test]
    async fn create_record_links_named_item() -> TestResult {
        let ctx = TestContext::new().await;
        let item = with_item(&ctx, "Tapioca Pearls").await?;

        let created = ctx
            .inventory
            .create_record(InventoryRecord::new("Tapioca Pearls", 40).with_levels(60, 15))
            .await?;

        assert!(created.uuid.is_some());
        assert_eq!(created.item_uuid, item.uuid);
        assert_eq!(created.quantity, 40);
        assert_eq!(created.par_level, 60);
        assert!(created.last_counted.is_some());

        Ok(())
    }

    #[tokio::test]
    async fn create_record_requires_catalog_item() -> TestResult {
        let ctx = TestContext::new().await;

        let result = ctx
            .inventory
            .create_record(InventoryRecord::new("Grass Jelly", 5))
            .await;

        assert!(matches!(
            result,
            Err(InventoryServiceError::CatalogItemNotFound(name)) if name == "Grass Jelly"
        ));
        assert!(ctx.inventory.list_records().await?.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn second_record_for_item_already_exists() -> TestResult {
        let ctx = TestContext::new().await;
        with_item(&ctx, "Tapioca Pearls").await?;

        ctx.inventory
            .create_record(InventoryRecord::new("Tapioca Pearls", 40))
            .await?;

        let result = ctx
            .inventory
            .create_record(InventoryRecord::new("Tapioca Pearls", 10))
            .await;

        assert!(matches!(result, Err(InventoryServiceError::AlreadyExists)));

        Ok(())
    }

    #[tokio::test]
    async fn update_record_stamps_last_counted() -> TestResult {
        let ctx = TestContext::new().await;
        with_item(&ctx, "Tapioca Pearls").await?;

        let created = ctx
            .inventory
            .create_record(InventoryRecord {
                last_counted: Some(date(2024, 1, 2)),
                ..InventoryRecord::new("Tapioca Pearls", 40)
            })
            .await?;

        let updated = ctx
            .inventory
            .update_record(InventoryRecord {
                quantity: 12,
                ..created.clone()
            })
            .await?
            .ok_or("expected an update")?;

        assert_eq!(created.last_counted, Some(date(2024, 1, 2)));
        assert_eq!(updated.quantity, 12);
        assert_eq!(updated.last_counted, Some(calendar::today(&TimeZone::UTC)));

        Ok(())
    }

    #[tokio::test]
    async fn update_record_without_key_is_noop() -> TestResult {
        let ctx = TestContext::new().await;

        let updated = ctx
            .inventory
            .update_record(InventoryRecord::new("Tapioca Pearls", 1))
            .await?;

        assert_eq!(updated, None);

        Ok(())
    }

    #[tokio::test]
    async fn restock_adds_stock() -> TestResult {
        let ctx = TestContext::new().await;
        with_item(&ctx, "Tapioca Pearls").await?;

        let created = ctx
            .inventory
            .create_record(InventoryRecord::new("Tapioca Pearls", 5).with_levels(60, 15))
            .await?;

        assert!(created.needs_restock());

        let restocked = ctx.inventory.restock(&created, 50).await?;

        assert_eq!(restocked.quantity, 55);
        assert!(!restocked.needs_restock());
        assert_eq!(restocked.last_restocked, Some(calendar::today(&TimeZone::UTC)));

        Ok(())
    }

    #[tokio::test]
    async fn restock_unsaved_record_is_not_persisted() -> TestResult {
        let ctx = TestContext::new().await;

        let result = ctx
            .inventory
            .restock(&InventoryRecord::new("Tapioca Pearls", 5), 1)
            .await;

        assert!(matches!(result, Err(InventoryServiceError::NotPersisted)));

        Ok(())
    }

    #[tokio::test]
    async fn linked_item_cannot_be_deleted_until_record_is() -> TestResult {
        let ctx = TestContext::new().await;
        let item = with_item(&ctx, "Tapioca Pearls").await?;

        let record = ctx
            .inventory
            .create_record(InventoryRecord::new("Tapioca Pearls", 5))
            .await?;

        let blocked = ctx.catalog.delete_item(&item).await;

        assert!(matches!(blocked, Err(CatalogServiceError::ReferencedByInventory)));
        assert_eq!(ctx.catalog.list_items().await?.len(), 1);

        ctx.inventory.delete_record(&record).await?;
        ctx.catalog.delete_item(&item).await?;

        assert!(ctx.catalog.list_items().await?.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn delete_missing_record_is_not_found() -> TestResult {
        let ctx = TestContext::new().await;

        let result = ctx
            .inventory
            .delete_record(&InventoryRecord {
                uuid: Some(InventoryUuid::new()),
                ..InventoryRecord::new("Tapioca Pearls", 5)
            })
            .await;

        assert!(matches!(result, Err(InventoryServiceError::NotFound)));

        Ok(())
    }
}
