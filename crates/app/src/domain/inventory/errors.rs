//! Inventory service errors.

use std::{num::TryFromIntError, time::Duration};

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::database::UnitOfWorkTimeout;

#[derive(Debug, Error)]
pub enum InventoryServiceError {
    #[error("catalog item already has an inventory record")]
    AlreadyExists,

    #[error("inventory record not found")]
    NotFound,

    #[error("inventory record has not been saved yet")]
    NotPersisted,

    #[error("no catalog item named {0:?}")]
    CatalogItemNotFound(String),

    #[error("stock quantity out of range")]
    QuantityOutOfRange(#[from] TryFromIntError),

    #[error("related resource not found")]
    InvalidReference,

    #[error("missing required data")]
    MissingRequiredData,

    #[error("invalid data")]
    InvalidData,

    #[error("inventory operation timed out after {0:?}")]
    Timeout(Duration),

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for InventoryServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            Some(ErrorKind::ForeignKeyViolation) => Self::InvalidReference,
            Some(ErrorKind::NotNullViolation) => Self::MissingRequiredData,
            Some(ErrorKind::CheckViolation) => Self::InvalidData,
            _ => Self::Sql(error),
        }
    }
}

impl From<UnitOfWorkTimeout> for InventoryServiceError {
    fn from(UnitOfWorkTimeout(after): UnitOfWorkTimeout) -> Self {
        Self::Timeout(after)
    }
}
