//! Buses service errors.

use std::num::TryFromIntError;

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::validation::ValidationErrors;

const BUS_NUMBER_CONSTRAINT: &str = "buses_bus_number_key";

#[derive(Debug, Error)]
pub enum BusesServiceError {
    #[error("invalid bus data")]
    Validation(#[from] ValidationErrors),

    #[error("bus with this number already exists")]
    DuplicateBusNumber,

    #[error("bus already exists")]
    AlreadyExists,

    #[error("bus not found")]
    NotFound,

    #[error("related resource not found")]
    InvalidReference,

    #[error("missing required data")]
    MissingRequiredData,

    #[error("invalid data")]
    InvalidData,

    #[error("storage error")]
    Sql(#[source] Error),

    #[error("invalid count value")]
    InvalidCount(#[from] TryFromIntError),
}

impl From<Error> for BusesServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        let constraint = error
            .as_database_error()
            .and_then(DatabaseError::constraint)
            .map(str::to_owned);

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => match constraint.as_deref() {
                Some(BUS_NUMBER_CONSTRAINT) => Self::DuplicateBusNumber,
                _ => Self::AlreadyExists,
            },
            Some(ErrorKind::ForeignKeyViolation) => Self::InvalidReference,
            Some(ErrorKind::NotNullViolation) => Self::MissingRequiredData,
            Some(ErrorKind::CheckViolation) => Self::InvalidData,
            Some(ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}
