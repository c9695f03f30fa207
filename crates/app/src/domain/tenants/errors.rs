//! Tenants service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::{auth::passwords::PasswordError, validation::ValidationErrors};

const NAME_LOCATION_CONSTRAINT: &str = "tenants_name_location_key";
const EMAIL_CONSTRAINT: &str = "tenants_email_key";

#[derive(Debug, Error)]
pub enum TenantsServiceError {
    #[error("invalid tenant data")]
    Validation(#[from] ValidationErrors),

    #[error("tenant with this name and location already exists")]
    DuplicateTenant,

    #[error("email already in use")]
    DuplicateEmail,

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("tenant not found")]
    NotFound,

    #[error("invalid data")]
    InvalidData,

    #[error("password processing error")]
    Password(#[from] PasswordError),

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for TenantsServiceError {
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
                Some(EMAIL_CONSTRAINT) => Self::DuplicateEmail,
                Some(NAME_LOCATION_CONSTRAINT) => Self::DuplicateTenant,
                _ => Self::Sql(error),
            },
            Some(ErrorKind::NotNullViolation | ErrorKind::CheckViolation) => Self::InvalidData,
            Some(ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_not_found_maps_to_not_found() {
        let error = TenantsServiceError::from(Error::RowNotFound);

        assert!(
            matches!(error, TenantsServiceError::NotFound),
            "expected NotFound, got {error:?}"
        );
    }

    #[test]
    fn pool_errors_stay_storage_errors() {
        let error = TenantsServiceError::from(Error::PoolTimedOut);

        assert!(
            matches!(error, TenantsServiceError::Sql(_)),
            "expected Sql, got {error:?}"
        );
    }
}
