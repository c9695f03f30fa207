//! Auth service.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;

use crate::{
    auth::{
        AuthServiceError,
        token::{IssuedToken, TokenService},
    },
    domain::tenants::{
        TenantsService,
        data::{NewTenant, TenantCredentials},
        records::TenantRecord,
    },
};

/// An authenticated tenant and the bearer token issued to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub tenant: TenantRecord,
    pub token: IssuedToken,
}

#[derive(Clone)]
pub struct TokenAuthService {
    tenants: Arc<dyn TenantsService>,
    tokens: TokenService,
}

impl TokenAuthService {
    #[must_use]
    pub fn new(tenants: Arc<dyn TenantsService>, tokens: TokenService) -> Self {
        Self { tenants, tokens }
    }

    fn session(&self, tenant: TenantRecord) -> Result<Session, AuthServiceError> {
        let token = self
            .tokens
            .issue(tenant.uuid)
            .map_err(AuthServiceError::Issue)?;

        Ok(Session { tenant, token })
    }
}

#[async_trait]
impl AuthService for TokenAuthService {
    async fn register(&self, tenant: NewTenant) -> Result<Session, AuthServiceError> {
        let tenant = self.tenants.register_tenant(tenant).await?;

        self.session(tenant)
    }

    async fn login(&self, credentials: TenantCredentials) -> Result<Session, AuthServiceError> {
        let tenant = self.tenants.find_by_credentials(credentials).await?;

        tracing::info!(tenant_uuid = %tenant.uuid, "tenant logged in");

        self.session(tenant)
    }

    async fn authenticate_bearer(
        &self,
        bearer_token: &str,
    ) -> Result<TenantRecord, AuthServiceError> {
        let tenant_uuid = self
            .tokens
            .verify(bearer_token)
            .map_err(AuthServiceError::InvalidToken)?;

        match self.tenants.find_tenant(tenant_uuid).await? {
            Some(tenant) if tenant.is_active => Ok(tenant),
            Some(_) | None => Err(AuthServiceError::TenantInactive),
        }
    }
}

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Create a tenant and sign it in.
    async fn register(&self, tenant: NewTenant) -> Result<Session, AuthServiceError>;

    /// Exchange name, location and password for a fresh token.
    async fn login(&self, credentials: TenantCredentials) -> Result<Session, AuthServiceError>;

    /// Resolve a bearer token to its active tenant.
    async fn authenticate_bearer(&self, bearer_token: &str)
    -> Result<TenantRecord, AuthServiceError>;
}
