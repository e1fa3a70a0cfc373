//! Customers service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::customers::{
        errors::CustomersServiceError, models::Customer, repository::PgCustomersRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgCustomersService {
    db: Db,
    repository: PgCustomersRepository,
}

impl PgCustomersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgCustomersRepository::new(),
        }
    }
}

#[async_trait]
impl CustomersService for PgCustomersService {
    #[tracing::instrument(name = "customers.service.list_customers", skip(self), err)]
    async fn list_customers(&self) -> Result<Vec<Customer>, CustomersServiceError> {
        self.db
            .bounded(async {
                let mut tx = self.db.begin().await?;

                let customers = self.repository.list_customers(&mut tx).await?;

                tx.commit().await?;

                Ok::<_, CustomersServiceError>(customers)
            })
            .await
    }

    #[tracing::instrument(name = "customers.service.ensure_default_customer", skip(self), err)]
    async fn ensure_default_customer(&self) -> Result<Customer, CustomersServiceError> {
        self.db
            .bounded(async {
                let mut tx = self.db.begin().await?;

                let customer = self.repository.ensure_default_customer(&mut tx).await?;

                tx.commit().await?;

                Ok::<_, CustomersServiceError>(customer)
            })
            .await
    }
}

#[automock]
#[async_trait]
pub trait CustomersService: Send + Sync {
    /// Retrieves every customer.
    async fn list_customers(&self) -> Result<Vec<Customer>, CustomersServiceError>;

    /// Returns the walk-up customer, creating it on first use.
    async fn ensure_default_customer(&self) -> Result<Customer, CustomersServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{domain::customers::models::DEFAULT_CUSTOMER_NAME, test::TestContext};

    use super::*;

    #[tokio::test]
    async fn ensure_default_customer_is_idempotent() -> TestResult {
        let ctx = TestContext::new().await;

        let first = ctx.customers.ensure_default_customer().await?;
        let second = ctx.customers.ensure_default_customer().await?;

        assert_eq!(first.uuid, second.uuid);
        assert_eq!(first.name, DEFAULT_CUSTOMER_NAME);
        assert_eq!(first.loyalty_points, 0);
        assert_eq!(ctx.customers.list_customers().await?.len(), 1);

        Ok(())
    }
}
