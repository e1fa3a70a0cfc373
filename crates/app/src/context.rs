//! App Context

use std::sync::Arc;

use thiserror::Error;

use crate::{
    config::{db::DatabaseConfig, store::StoreSettings},
    database::{self, Db},
    domain::{
        catalog::{CatalogService, PgCatalogService},
        customers::{CustomersService, PgCustomersService},
        inventory::{InventoryService, PgInventoryService},
        orders::{OrdersService, PgOrdersService},
        reports::{PgReportsService, ReportsService},
        staff::{PgStaffService, StaffService},
    },
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),
}

/// Every service a terminal needs, built once at startup.
#[derive(Clone)]
pub struct AppContext {
    pub catalog: Arc<dyn CatalogService>,
    pub inventory: Arc<dyn InventoryService>,
    pub staff: Arc<dyn StaffService>,
    pub customers: Arc<dyn CustomersService>,
    pub orders: Arc<dyn OrdersService>,
    pub reports: Arc<dyn ReportsService>,
    pub settings: StoreSettings,
}

impl AppContext {
    /// Build application context from database settings.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection fails.
    pub async fn from_config(
        config: &DatabaseConfig,
        settings: StoreSettings,
    ) -> Result<Self, AppInitError> {
        let pool = database::connect(config)
            .await
            .map_err(AppInitError::Database)?;

        Ok(Self::from_db(
            Db::new(pool, config.unit_of_work_timeout()),
            settings,
        ))
    }

    /// Build application context over an existing pool.
    #[must_use]
    pub fn from_db(db: Db, settings: StoreSettings) -> Self {
        let time_zone = settings.time_zone.clone();

        Self {
            catalog: Arc::new(PgCatalogService::new(db.clone())),
            inventory: Arc::new(PgInventoryService::new(db.clone(), time_zone.clone())),
            staff: Arc::new(PgStaffService::new(db.clone(), time_zone.clone())),
            customers: Arc::new(PgCustomersService::new(db.clone())),
            orders: Arc::new(PgOrdersService::new(db.clone(), time_zone.clone())),
            reports: Arc::new(PgReportsService::new(db, time_zone)),
            settings,
        }
    }
}
