//! Orders service errors.

use std::time::Duration;

use rust_decimal::Decimal;
use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::database::{UnitOfWorkTimeout, constraint};

/// Foreign key from an order line to its catalog item.
const LINE_ITEM_CONSTRAINT: &str = "fk_order_item_item";

#[derive(Debug, Error)]
pub enum OrdersServiceError {
    #[error("order has no lines")]
    EmptyOrder,

    #[error("order total {0} must be greater than zero")]
    NonPositiveTotal(Decimal),

    #[error("invalid quantity {quantity} for {item:?}")]
    InvalidQuantity { item: String, quantity: u32 },

    #[error("{0:?} is not a saved catalog item")]
    UnresolvedItem(String),

    #[error("order refers to a catalog item that no longer exists")]
    UnknownItem(#[source] Error),

    #[error("order already exists")]
    AlreadyExists(#[source] Error),

    #[error("order not found")]
    NotFound,

    #[error("missing required data")]
    MissingRequiredData(#[source] Error),

    #[error("invalid data")]
    InvalidData(#[source] Error),

    #[error("resolved staff member has no key")]
    UnsavedStaff,

    #[error("invalid calendar date")]
    InvalidDate(#[from] jiff::Error),

    #[error("order processing timed out after {0:?}")]
    Timeout(Duration),

    #[error("order could not be persisted")]
    Sql(#[source] Error),
}

impl From<Error> for OrdersServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::ForeignKeyViolation)
                if constraint(&error) == Some(LINE_ITEM_CONSTRAINT) =>
            {
                Self::UnknownItem(error)
            }
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists(error),
            Some(ErrorKind::NotNullViolation) => Self::MissingRequiredData(error),
            Some(ErrorKind::CheckViolation) => Self::InvalidData(error),
            _ => Self::Sql(error),
        }
    }
}

impl From<UnitOfWorkTimeout> for OrdersServiceError {
    fn from(UnitOfWorkTimeout(after): UnitOfWorkTimeout) -> Self {
        Self::Timeout(after)
    }
}
