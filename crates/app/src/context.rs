//! App Context

use std::sync::Arc;

use thiserror::Error;

use crate::{
    auth::{
        AuthService, TokenAuthService,
        token::{TokenSecret, TokenService},
    },
    database::{self, Db, RoleCheckError},
    domain::{
        buses::{BusesService, PgBusesService},
        tenants::{PgTenantsService, TenantsService},
    },
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    #[error("database role check failed")]
    Role(#[from] RoleCheckError),
}

#[derive(Clone)]
pub struct AppContext {
    pub tenants: Arc<dyn TenantsService>,
    pub buses: Arc<dyn BusesService>,
    pub auth: Arc<dyn AuthService>,
}

impl AppContext {
    /// Build application context from a database URL and token secret.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection fails or the
    /// connecting role would bypass row-level security.
    pub async fn from_database_url(url: &str, secret: &TokenSecret) -> Result<Self, AppInitError> {
        let pool = database::connect(url)
            .await
            .map_err(AppInitError::Database)?;

        database::ensure_rls_enforced_role(&pool).await?;

        let tenants: Arc<dyn TenantsService> = Arc::new(PgTenantsService::new(pool.clone()));

        Ok(Self {
            buses: Arc::new(PgBusesService::new(Db::new(pool))),
            auth: Arc::new(TokenAuthService::new(
                tenants.clone(),
                TokenService::new(secret),
            )),
            tenants,
        })
    }
}
