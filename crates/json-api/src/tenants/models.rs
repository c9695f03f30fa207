//! Tenant Models

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use fleet_app::{
    auth::Session,
    domain::tenants::records::TenantRecord,
};

/// Public view of a depot. Never carries credential material.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TenantResponse {
    pub id: Uuid,
    pub name: String,
    pub location: String,
    pub phone_number: String,
    pub email: String,
    pub is_active: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl From<TenantRecord> for TenantResponse {
    fn from(tenant: TenantRecord) -> Self {
        Self {
            id: tenant.uuid.into(),
            name: tenant.name,
            location: tenant.location,
            phone_number: tenant.phone_number,
            email: tenant.email,
            is_active: tenant.is_active,
            created_at: tenant.created_at.to_string(),
            updated_at: tenant.updated_at.to_string(),
        }
    }
}

/// Register and login payload.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SessionData {
    pub tenant: TenantResponse,

    /// Bearer token for the `Authorization` header.
    pub token: String,

    pub expires_at: String,
}

impl From<Session> for SessionData {
    fn from(session: Session) -> Self {
        Self {
            tenant: session.tenant.into(),
            token: session.token.token,
            expires_at: session.token.expires_at.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProfileData {
    pub tenant: TenantResponse,
}
