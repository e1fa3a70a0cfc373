//! Staff service errors.

use std::time::Duration;

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::database::{Referrer, UnitOfWorkTimeout, referrer};

#[derive(Debug, Error)]
pub enum StaffServiceError {
    #[error("staff member already exists")]
    AlreadyExists,

    #[error("staff member not found")]
    NotFound,

    #[error("staff member has not been saved yet")]
    NotPersisted,

    #[error("cannot delete staff member, they are still referenced by past orders")]
    ReferencedByOrder,

    #[error("missing required data")]
    MissingRequiredData,

    #[error("invalid data")]
    InvalidData,

    #[error("staff operation timed out after {0:?}")]
    Timeout(Duration),

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for StaffServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        if referrer(&error) == Some(Referrer::Order) {
            return Self::ReferencedByOrder;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            Some(ErrorKind::NotNullViolation) => Self::MissingRequiredData,
            Some(ErrorKind::CheckViolation) => Self::InvalidData,
            _ => Self::Sql(error),
        }
    }
}

impl From<UnitOfWorkTimeout> for StaffServiceError {
    fn from(UnitOfWorkTimeout(after): UnitOfWorkTimeout) -> Self {
        Self::Timeout(after)
    }
}
