//! Tenants service.

use async_trait::async_trait;
use mockall::automock;
use sqlx::PgPool;

use crate::{
    auth::passwords::{self, Password},
    domain::tenants::{
        data::{self, NewTenant, ProfileUpdate, TenantCredentials},
        errors::TenantsServiceError,
        records::{TenantRecord, TenantUuid},
        repository::PgTenantsRepository,
    },
    validation::ValidationErrors,
};

#[derive(Debug, Clone)]
pub struct PgTenantsService {
    repository: PgTenantsRepository,
}

impl PgTenantsService {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: PgTenantsRepository::new(pool),
        }
    }
}

#[async_trait]
impl TenantsService for PgTenantsService {
    async fn register_tenant(&self, tenant: NewTenant) -> Result<TenantRecord, TenantsServiceError> {
        let tenant = tenant.validate()?;
        let password_hash = passwords::hash_password_blocking(tenant.password.clone()).await?;

        let created = self
            .repository
            .create_tenant(&tenant, &password_hash)
            .await?;

        tracing::info!(tenant_uuid = %created.uuid, "registered tenant");

        Ok(created)
    }

    async fn find_by_credentials(
        &self,
        credentials: TenantCredentials,
    ) -> Result<TenantRecord, TenantsServiceError> {
        let credentials = credentials.validate()?;

        let Some(stored) = self
            .repository
            .find_active_credentials(&credentials.name, &credentials.location)
            .await?
        else {
            passwords::verify_dummy_blocking(credentials.password).await?;

            return Err(TenantsServiceError::InvalidCredentials);
        };

        let matches =
            passwords::verify_password_blocking(credentials.password, stored.password_hash)
                .await?;

        if !matches {
            return Err(TenantsServiceError::InvalidCredentials);
        }

        Ok(stored.tenant)
    }

    async fn find_tenant(
        &self,
        tenant: TenantUuid,
    ) -> Result<Option<TenantRecord>, TenantsServiceError> {
        self.repository
            .find_tenant(tenant)
            .await
            .map_err(Into::into)
    }

    async fn update_profile(
        &self,
        tenant: TenantUuid,
        update: ProfileUpdate,
    ) -> Result<TenantRecord, TenantsServiceError> {
        let update = update.validate()?;

        self.repository
            .update_profile(tenant, &update)
            .await
            .map_err(Into::into)
    }

    async fn set_password(
        &self,
        tenant: TenantUuid,
        password: Password,
    ) -> Result<(), TenantsServiceError> {
        let mut errors = ValidationErrors::new();

        data::check_password(&mut errors, &password);
        errors.finish(())?;

        let password_hash = passwords::hash_password_blocking(password).await?;

        let rows_affected = self
            .repository
            .set_password(tenant, &password_hash)
            .await?;

        if rows_affected == 0 {
            return Err(TenantsServiceError::NotFound);
        }

        tracing::info!(tenant_uuid = %tenant, "tenant password changed");

        Ok(())
    }

    async fn set_active(
        &self,
        tenant: TenantUuid,
        active: bool,
    ) -> Result<TenantRecord, TenantsServiceError> {
        let updated = self.repository.set_active(tenant, active).await?;

        tracing::info!(tenant_uuid = %tenant, active, "tenant status changed");

        Ok(updated)
    }
}

#[automock]
#[async_trait]
/// Tenant credential store.
pub trait TenantsService: Send + Sync {
    /// Validate, hash the password and persist a new tenant.
    async fn register_tenant(&self, tenant: NewTenant) -> Result<TenantRecord, TenantsServiceError>;

    /// Resolve an active tenant by name, location and password.
    ///
    /// Unknown, inactive and wrong-password cases all fail with
    /// [`TenantsServiceError::InvalidCredentials`].
    async fn find_by_credentials(
        &self,
        credentials: TenantCredentials,
    ) -> Result<TenantRecord, TenantsServiceError>;

    /// Look up a tenant by id, active or not.
    async fn find_tenant(
        &self,
        tenant: TenantUuid,
    ) -> Result<Option<TenantRecord>, TenantsServiceError>;

    /// Change contact phone and/or email.
    async fn update_profile(
        &self,
        tenant: TenantUuid,
        update: ProfileUpdate,
    ) -> Result<TenantRecord, TenantsServiceError>;

    /// Replace the stored credential with a hash of `password`.
    async fn set_password(
        &self,
        tenant: TenantUuid,
        password: Password,
    ) -> Result<(), TenantsServiceError>;

    /// Soft-activate or deactivate a tenant.
    async fn set_active(
        &self,
        tenant: TenantUuid,
        active: bool,
    ) -> Result<TenantRecord, TenantsServiceError>;
}
