//! Depot helper extensions.

use std::any::{Any, type_name};

use salvo::prelude::Depot;
use tracing::error;

use fleet_app::domain::tenants::records::TenantRecord;

use crate::errors::ApiError;

/// Helpers for reading request-scoped values out of the depot.
pub(crate) trait DepotExt {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, ApiError>;

    /// Bind the authenticated tenant to the request.
    fn insert_tenant(&mut self, tenant: TenantRecord);

    /// The tenant bound by the auth middleware.
    fn tenant_or_401(&self) -> Result<TenantRecord, ApiError>;
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, ApiError> {
        self.obtain::<T>().map_err(|_missing| {
            error!(
                "depot is missing {} (was the state injected?)",
                type_name::<T>()
            );

            ApiError::server_error()
        })
    }

    fn insert_tenant(&mut self, tenant: TenantRecord) {
        self.inject(tenant);
    }

    fn tenant_or_401(&self) -> Result<TenantRecord, ApiError> {
        self.obtain::<TenantRecord>()
            .cloned()
            .map_err(|_missing| ApiError::unauthorized("No token provided, access denied"))
    }
}
