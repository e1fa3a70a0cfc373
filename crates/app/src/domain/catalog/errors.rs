//! Catalog service errors.

use std::time::Duration;

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::database::{Referrer, UnitOfWorkTimeout, referrer};

#[derive(Debug, Error)]
pub enum CatalogServiceError {
    #[error("catalog item already exists")]
    AlreadyExists,

    #[error("catalog item not found")]
    NotFound,

    #[error("catalog item has not been saved yet")]
    NotPersisted,

    #[error("cannot delete catalog item, it is still referenced by past orders")]
    ReferencedByOrder,

    #[error("cannot delete catalog item, it is still referenced by an inventory record")]
    ReferencedByInventory,

    #[error("missing required data")]
    MissingRequiredData,

    #[error("invalid data")]
    InvalidData,

    #[error("catalog operation timed out after {0:?}")]
    Timeout(Duration),

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for CatalogServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match referrer(&error) {
            Some(Referrer::Order) => return Self::ReferencedByOrder,
            Some(Referrer::Inventory) => return Self::ReferencedByInventory,
            None => {}
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            Some(ErrorKind::NotNullViolation) => Self::MissingRequiredData,
            Some(ErrorKind::CheckViolation) => Self::InvalidData,
            _ => Self::Sql(error),
        }
    }
}

impl From<UnitOfWorkTimeout> for CatalogServiceError {
    fn from(UnitOfWorkTimeout(after): UnitOfWorkTimeout) -> Self {
        Self::Timeout(after)
    }
}
