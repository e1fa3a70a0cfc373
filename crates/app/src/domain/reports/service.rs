//! Reports service.

use async_trait::async_trait;
use jiff::{civil::Date, tz::TimeZone};
use mockall::automock;
use rust_decimal::Decimal;

use crate::{
    calendar::DayWindow,
    database::Db,
    domain::reports::{
        errors::ReportsServiceError, models::DailySummary, repository::PgReportsRepository,
    },
};

fn to_count(count: i64) -> Result<u64, ReportsServiceError> {
    u64::try_from(count).map_err(|_| ReportsServiceError::CountOutOfRange(count))
}

#[derive(Debug, Clone)]
pub struct PgReportsService {
    db: Db,
    time_zone: TimeZone,
    repository: PgReportsRepository,
}

impl PgReportsService {
    #[must_use]
    pub fn new(db: Db, time_zone: TimeZone) -> Self {
        Self {
            db,
            time_zone,
            repository: PgReportsRepository::new(),
        }
    }
}

#[async_trait]
impl ReportsService for PgReportsService {
    #[tracing::instrument(name = "reports.service.total_sales_for", skip(self), err)]
    async fn total_sales_for(&self, date: Date) -> Result<Decimal, ReportsServiceError> {
        let window = DayWindow::for_date(date, &self.time_zone)?;

        self.db
            .bounded(async {
                let mut tx = self.db.begin().await?;

                let total = self
                    .repository
                    .total_sales_between(&mut tx, window.start, window.end)
                    .await?;

                tx.commit().await?;

                Ok::<_, ReportsServiceError>(total)
            })
            .await
    }

    #[tracing::instrument(name = "reports.service.order_count_for", skip(self), err)]
    async fn order_count_for(&self, date: Date) -> Result<u64, ReportsServiceError> {
        let window = DayWindow::for_date(date, &self.time_zone)?;

        let count = self
            .db
            .bounded(async {
                let mut tx = self.db.begin().await?;

                let count = self
                    .repository
                    .order_count_between(&mut tx, window.start, window.end)
                    .await?;

                tx.commit().await?;

                Ok::<_, ReportsServiceError>(count)
            })
            .await?;

        to_count(count)
    }

    #[tracing::instrument(name = "reports.service.daily_summary", skip(self), err)]
    async fn daily_summary(&self, date: Date) -> Result<DailySummary, ReportsServiceError> {
        let window = DayWindow::for_date(date, &self.time_zone)?;

        let (count, gross_sales, lines) = self
            .db
            .bounded(async {
                let mut tx = self.db.begin().await?;

                let count = self
                    .repository
                    .order_count_between(&mut tx, window.start, window.end)
                    .await?;

                let gross_sales = self
                    .repository
                    .total_sales_between(&mut tx, window.start, window.end)
                    .await?;

                let lines = self
                    .repository
                    .line_totals_between(&mut tx, window.start, window.end)
                    .await?;

                tx.commit().await?;

                Ok::<_, ReportsServiceError>((count, gross_sales, lines))
            })
            .await?;

        Ok(DailySummary {
            date,
            order_count: to_count(count)?,
            gross_sales,
            net_sales: lines.net_sales,
            items_sold: to_count(lines.items_sold)?,
        })
    }
}

#[automock]
#[async_trait]
pub trait ReportsService: Send + Sync {
    /// Sum of order totals placed on `date` in the store's time zone.
    async fn total_sales_for(&self, date: Date) -> Result<Decimal, ReportsServiceError>;

    /// Number of orders placed on `date` in the store's time zone.
    async fn order_count_for(&self, date: Date) -> Result<u64, ReportsServiceError>;

    /// Count, gross and net sales, and items sold for `date`.
    async fn daily_summary(&self, date: Date) -> Result<DailySummary, ReportsServiceError>;
}
