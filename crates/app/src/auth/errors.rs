//! Auth service errors.

use thiserror::Error;

use crate::{auth::token::TokenError, domain::tenants::TenantsServiceError};

#[derive(Debug, Error)]
pub enum AuthServiceError {
    #[error("bearer token rejected")]
    InvalidToken(#[source] TokenError),

    #[error("tenant is missing or inactive")]
    TenantInactive,

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("failed to issue token")]
    Issue(#[source] TokenError),

    #[error("tenant lookup failed")]
    Tenants(#[source] TenantsServiceError),
}

impl From<TenantsServiceError> for AuthServiceError {
    fn from(error: TenantsServiceError) -> Self {
        match error {
            TenantsServiceError::InvalidCredentials => Self::InvalidCredentials,
            other => Self::Tenants(other),
        }
    }
}
