//! Catalog service.

use async_trait::async_trait;
use mockall::automock;
use tracing::info;

use crate::{
    database::Db,
    domain::catalog::{
        errors::CatalogServiceError,
        models::{CatalogItem, CatalogItemUuid},
        repository::PgCatalogRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgCatalogService {
    db: Db,
    repository: PgCatalogRepository,
}

impl PgCatalogService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgCatalogRepository::new(),
        }
    }
}

#[async_trait]
impl CatalogService for PgCatalogService {
    #[tracing::instrument(name = "catalog.service.list_items", skip(self), err)]
    async fn list_items(&self) -> Result<Vec<CatalogItem>, CatalogServiceError> {
        self.db
            .bounded(async {
                let mut tx = self.db.begin().await?;

                let items = self.repository.list_items(&mut tx).await?;

                tx.commit().await?;

                Ok::<_, CatalogServiceError>(items)
            })
            .await
    }

    #[tracing::instrument(
        name = "catalog.service.get_item",
        skip(self),
        fields(item_uuid = %item),
        err
    )]
    async fn get_item(&self, item: CatalogItemUuid) -> Result<CatalogItem, CatalogServiceError> {
        self.db
            .bounded(async {
                let mut tx = self.db.begin().await?;

                let item = self.repository.get_item(&mut tx, item).await?;

                tx.commit().await?;

                Ok::<_, CatalogServiceError>(item)
            })
            .await
    }

    #[tracing::instrument(name = "catalog.service.find_item_by_name", skip(self), err)]
    async fn find_item_by_name(&self, name: &str) -> Result<CatalogItem, CatalogServiceError> {
        self.db
            .bounded(async {
                let mut tx = self.db.begin().await?;

                let item = self
                    .repository
                    .find_item_by_name(&mut tx, name)
                    .await?
                    .ok_or(CatalogServiceError::NotFound)?;

                tx.commit().await?;

                Ok::<_, CatalogServiceError>(item)
            })
            .await
    }

    #[tracing::instrument(
        name = "catalog.service.create_item",
        skip(self, item),
        fields(item_uuid = tracing::field::Empty, name = %item.name),
        err
    )]
    async fn create_item(&self, item: CatalogItem) -> Result<CatalogItem, CatalogServiceError> {
        let uuid = item.uuid.unwrap_or_else(CatalogItemUuid::new);

        tracing::Span::current().record("item_uuid", tracing::field::display(uuid));

        let created = self
            .db
            .bounded(async {
                let mut tx = self.db.begin().await?;

                let created = self.repository.create_item(&mut tx, uuid, &item).await?;

                tx.commit().await?;

                Ok::<_, CatalogServiceError>(created)
            })
            .await?;

        info!(item_uuid = %uuid, "created catalog item");

        Ok(created)
    }

    #[tracing::instrument(name = "catalog.service.update_item", skip(self, item), err)]
    async fn update_item(
        &self,
        item: CatalogItem,
    ) -> Result<Option<CatalogItem>, CatalogServiceError> {
        let Some(uuid) = item.uuid else {
            return Ok(None);
        };

        self.db
            .bounded(async {
                let mut tx = self.db.begin().await?;

                let updated = self.repository.update_item(&mut tx, uuid, &item).await?;

                tx.commit().await?;

                Ok::<_, CatalogServiceError>(Some(updated))
            })
            .await
    }

    #[tracing::instrument(name = "catalog.service.delete_item", skip(self, item), err)]
    async fn delete_item(&self, item: &CatalogItem) -> Result<(), CatalogServiceError> {
        let uuid = item.uuid.ok_or(CatalogServiceError::NotPersisted)?;

        self.db
            .bounded(async {
                let mut tx = self.db.begin().await?;

                let rows_affected = self.repository.delete_item(&mut tx, uuid).await?;

                if rows_affected == 0 {
                    return Err(CatalogServiceError::NotFound);
                }

                tx.commit().await?;

                Ok(())
            })
            .await?;

        info!(item_uuid = %uuid, "deleted catalog item");

        Ok(())
    }

    #[tracing::instrument(
        name = "catalog.service.seed_menu",
        skip(self, items),
        fields(item_count = items.len()),
        err
    )]
    async fn seed_menu(&self, items: Vec<CatalogItem>) -> Result<u64, CatalogServiceError> {
        let inserted = self
            .db
            .bounded(async {
                let mut tx = self.db.begin().await?;

                let inserted = self.repository.seed_items(&mut tx, &items).await?;

                tx.commit().await?;

                Ok::<_, CatalogServiceError>(inserted)
            })
            .await?;

        let skipped = u64::try_from(items.len())
            .unwrap_or(u64::MAX)
            .saturating_sub(inserted);

        info!(inserted, skipped, "seeded menu");

        Ok(inserted)
    }
}

#[automock]
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// Retrieves every catalog item, active or not.
    async fn list_items(&self) -> Result<Vec<CatalogItem>, CatalogServiceError>;

    /// Retrieve a single catalog item.
    async fn get_item(&self, item: CatalogItemUuid) -> Result<CatalogItem, CatalogServiceError>;

    /// Retrieve a catalog item by its exact display name.
    async fn find_item_by_name(&self, name: &str) -> Result<CatalogItem, CatalogServiceError>;

    /// Saves a new item, generating a key if it has none.
    async fn create_item(&self, item: CatalogItem) -> Result<CatalogItem, CatalogServiceError>;

    /// Overwrites a saved item. Unsaved items are left alone and `None` is returned.
    async fn update_item(
        &self,
        item: CatalogItem,
    ) -> Result<Option<CatalogItem>, CatalogServiceError>;

    /// Deletes a saved item.
    ///
    /// Items still referenced by past orders or by an inventory record are
    /// kept and a `ReferencedBy*` error is returned.
    async fn delete_item(&self, item: &CatalogItem) -> Result<(), CatalogServiceError>;

    /// Inserts `items`, skipping any whose name is already in the catalog.
    /// Returns the number of rows inserted.
    async fn seed_menu(&self, items: Vec<CatalogItem>) -> Result<u64, CatalogServiceError>;
}
