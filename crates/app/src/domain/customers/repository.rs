//! Customers Repository

use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};

use crate::domain::customers::models::{Customer, CustomerUuid, DEFAULT_CUSTOMER_NAME};

const LIST_CUSTOMERS_SQL: &str = include_str!("sql/list_customers.sql");
const FIRST_CUSTOMER_SQL: &str = include_str!("sql/first_customer.sql");
const ENSURE_DEFAULT_CUSTOMER_SQL: &str = include_str!("sql/ensure_default_customer.sql");

/// Unique marker of the walk-up customer row.
const DEFAULT_CUSTOMER_KEY: &str = "walk-up";

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCustomersRepository;

impl PgCustomersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_customers(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<Customer>, sqlx::Error> {
        query_as::<Postgres, Customer>(LIST_CUSTOMERS_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    /// The customer with the lowest key, if any exist.
    pub(crate) async fn first_customer(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Option<Customer>, sqlx::Error> {
        query_as::<Postgres, Customer>(FIRST_CUSTOMER_SQL)
            .fetch_optional(&mut **tx)
            .await
    }

    #[tracing::instrument(
        name = "customers.repository.ensure_default_customer",
        skip(self, tx),
        err
    )]
    pub(crate) async fn ensure_default_customer(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Customer, sqlx::Error> {
        query_as::<Postgres, Customer>(ENSURE_DEFAULT_CUSTOMER_SQL)
            .bind(CustomerUuid::new().into_uuid())
            .bind(DEFAULT_CUSTOMER_NAME)
            .bind(DEFAULT_CUSTOMER_KEY)
            .fetch_one(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for Customer {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let points: i32 = row.try_get("loyalty_points")?;

        let loyalty_points = u32::try_from(points).map_err(|e| sqlx::Error::ColumnDecode {
            index: "loyalty_points".to_string(),
            source: Box::new(e),
        })?;

        Ok(Self {
            uuid: CustomerUuid::from_uuid(row.try_get("uuid")?),
            name: row.try_get("name")?,
            phone: row.try_get("phone")?,
            email: row.try_get("email")?,
            loyalty_points,
        })
    }
}
