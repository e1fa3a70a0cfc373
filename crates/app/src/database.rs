//! Database connection management

use std::time::Duration;

use sqlx::{
    PgPool, Postgres, Transaction,
    error::{DatabaseError, ErrorKind},
    migrate::MigrateError,
    postgres::PgPoolOptions,
};
use thiserror::Error;
use tracing::info;

use crate::config::db::DatabaseConfig;

/// Foreign keys that point at catalog items or staff from past orders.
const ORDER_CONSTRAINTS: [&str; 3] = [
    "fk_order_item_item",
    "fk_order_employee",
    "fk_order_customer",
];

/// Foreign key that links a catalog item to its inventory record.
const INVENTORY_CONSTRAINT: &str = "fk_item_inventory_item";

/// A unit of work ran past its deadline; the transaction was dropped and
/// rolled back.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("unit of work exceeded {0:?}")]
pub struct UnitOfWorkTimeout(pub Duration);

/// The kind of row that still references something being deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Referrer {
    Order,
    Inventory,
}

/// Classify a foreign key violation by the constraint that raised it.
pub(crate) fn referrer(error: &sqlx::Error) -> Option<Referrer> {
    let db_error = error.as_database_error()?;

    if db_error.kind() != ErrorKind::ForeignKeyViolation {
        return None;
    }

    match db_error.constraint() {
        Some(name) if ORDER_CONSTRAINTS.contains(&name) => Some(Referrer::Order),
        Some(INVENTORY_CONSTRAINT) => Some(Referrer::Inventory),
        _ => None,
    }
}

/// The name of the constraint behind a database error, if any.
pub(crate) fn constraint(error: &sqlx::Error) -> Option<&str> {
    error.as_database_error().and_then(DatabaseError::constraint)
}

#[derive(Debug, Clone)]
pub struct Db {
    pool: PgPool,
    timeout: Duration,
}

impl Db {
    #[must_use]
    pub fn new(pool: PgPool, timeout: Duration) -> Self {
        Self { pool, timeout }
    }

    /// Begin a transaction.
    ///
    /// # Errors
    ///
    /// Returns an error when a connection cannot be acquired or `BEGIN` fails.
    pub async fn begin(&self) -> Result<Transaction<'static, Postgres>, sqlx::Error> {
        self.pool.begin().await
    }

    /// Run `work` under the configured unit-of-work deadline.
    ///
    /// A transaction still open inside `work` when the deadline passes is
    /// dropped, which rolls it back.
    ///
    /// # Errors
    ///
    /// Returns whatever `work` returns, or [`UnitOfWorkTimeout`] converted
    /// into the caller's error type.
    pub async fn bounded<T, E, F>(&self, work: F) -> Result<T, E>
    where
        F: Future<Output = Result<T, E>>,
        E: From<UnitOfWorkTimeout>,
    {
        match tokio::time::timeout(self.timeout, work).await {
            Ok(result) => result,
            Err(_elapsed) => Err(UnitOfWorkTimeout(self.timeout).into()),
        }
    }

    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

/// Connect to `PostgreSQL`.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.database_url)
        .await
}

/// Apply pending schema migrations.
///
/// # Errors
///
/// Returns an error if a migration fails to apply.
pub async fn migrate(pool: &PgPool) -> Result<(), MigrateError> {
    sqlx::migrate!("../../migrations").run(pool).await?;

    info!("database migrations applied");

    Ok(())
}
