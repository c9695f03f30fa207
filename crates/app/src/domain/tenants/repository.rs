//! Tenants Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, PgPool, Postgres, Row, postgres::PgRow, query, query_as};

use crate::domain::tenants::{
    data::{NewTenant, ProfileUpdate},
    records::{TenantRecord, TenantUuid},
};

const CREATE_TENANT_SQL: &str = include_str!("sql/create_tenant.sql");
const FIND_TENANT_SQL: &str = include_str!("sql/find_tenant.sql");
const FIND_ACTIVE_CREDENTIALS_SQL: &str = include_str!("sql/find_active_credentials.sql");
const UPDATE_PROFILE_SQL: &str = include_str!("sql/update_profile.sql");
const SET_PASSWORD_SQL: &str = include_str!("sql/set_password.sql");
const SET_ACTIVE_SQL: &str = include_str!("sql/set_active.sql");

/// A tenant row together with its stored password hash.
pub(crate) struct StoredCredentials {
    pub(crate) tenant: TenantRecord,
    pub(crate) password_hash: String,
}

#[derive(Debug, Clone)]
/// PostgreSQL-backed tenants repository.
pub(crate) struct PgTenantsRepository {
    pool: PgPool,
}

impl PgTenantsRepository {
    /// Creates a new repository instance.
    #[must_use]
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub(crate) async fn create_tenant(
        &self,
        tenant: &NewTenant,
        password_hash: &str,
    ) -> Result<TenantRecord, sqlx::Error> {
        query_as::<Postgres, TenantRecord>(CREATE_TENANT_SQL)
            .bind(tenant.uuid.into_uuid())
            .bind(&tenant.name)
            .bind(&tenant.location)
            .bind(&tenant.phone_number)
            .bind(&tenant.email)
            .bind(password_hash)
            .fetch_one(&self.pool)
            .await
    }

    pub(crate) async fn find_tenant(
        &self,
        tenant: TenantUuid,
    ) -> Result<Option<TenantRecord>, sqlx::Error> {
        query_as::<Postgres, TenantRecord>(FIND_TENANT_SQL)
            .bind(tenant.into_uuid())
            .fetch_optional(&self.pool)
            .await
    }

    pub(crate) async fn find_active_credentials(
        &self,
        name: &str,
        location: &str,
    ) -> Result<Option<StoredCredentials>, sqlx::Error> {
        query_as::<Postgres, StoredCredentials>(FIND_ACTIVE_CREDENTIALS_SQL)
            .bind(name)
            .bind(location)
            .fetch_optional(&self.pool)
            .await
    }

    pub(crate) async fn update_profile(
        &self,
        tenant: TenantUuid,
        update: &ProfileUpdate,
    ) -> Result<TenantRecord, sqlx::Error> {
        query_as::<Postgres, TenantRecord>(UPDATE_PROFILE_SQL)
            .bind(tenant.into_uuid())
            .bind(update.phone_number.as_deref())
            .bind(update.email.as_deref())
            .fetch_one(&self.pool)
            .await
    }

    pub(crate) async fn set_password(
        &self,
        tenant: TenantUuid,
        password_hash: &str,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(SET_PASSWORD_SQL)
            .bind(tenant.into_uuid())
            .bind(password_hash)
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn set_active(
        &self,
        tenant: TenantUuid,
        active: bool,
    ) -> Result<TenantRecord, sqlx::Error> {
        query_as::<Postgres, TenantRecord>(SET_ACTIVE_SQL)
            .bind(tenant.into_uuid())
            .bind(active)
            .fetch_one(&self.pool)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for TenantRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: TenantUuid::from_uuid(row.try_get("uuid")?),
            name: row.try_get("name")?,
            location: row.try_get("location")?,
            phone_number: row.try_get("phone_number")?,
            email: row.try_get("email")?,
            is_active: row.try_get("is_active")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for StoredCredentials {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            tenant: TenantRecord::from_row(row)?,
            password_hash: row.try_get("password_hash")?,
        })
    }
}
