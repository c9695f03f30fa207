//! Tenant Errors

use fleet_app::{auth::AuthServiceError, domain::tenants::TenantsServiceError};

use crate::errors::ApiError;

pub(crate) fn from_tenants_error(error: TenantsServiceError) -> ApiError {
    match error {
        TenantsServiceError::Validation(errors) => ApiError::validation(errors),
        TenantsServiceError::DuplicateTenant => {
            ApiError::bad_request("Depot with this name and location already exists")
        }
        TenantsServiceError::DuplicateEmail => ApiError::bad_request("Email already registered"),
        TenantsServiceError::InvalidCredentials => ApiError::unauthorized("Invalid credentials"),
        TenantsServiceError::NotFound => ApiError::not_found("Depot not found"),
        other => ApiError::internal("tenant operation failed", &other),
    }
}

pub(crate) fn from_auth_error(error: AuthServiceError) -> ApiError {
    match error {
        AuthServiceError::InvalidCredentials => ApiError::unauthorized("Invalid credentials"),
        AuthServiceError::Tenants(source) => from_tenants_error(source),
        other => ApiError::internal("failed to start session", &other),
    }
}
