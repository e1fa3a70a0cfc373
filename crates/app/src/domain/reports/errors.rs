//! Reports service errors.

use std::time::Duration;

use thiserror::Error;

use crate::database::UnitOfWorkTimeout;

#[derive(Debug, Error)]
pub enum ReportsServiceError {
    #[error("invalid calendar date")]
    InvalidDate(#[from] jiff::Error),

    #[error("stored count {0} is out of range")]
    CountOutOfRange(i64),

    #[error("report timed out after {0:?}")]
    Timeout(Duration),

    #[error("report could not be read")]
    Sql(#[from] sqlx::Error),
}

impl From<UnitOfWorkTimeout> for ReportsServiceError {
    fn from(UnitOfWorkTimeout(after): UnitOfWorkTimeout) -> Self {
        Self::Timeout(after)
    }
}
