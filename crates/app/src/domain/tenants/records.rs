//! Tenant Records

use jiff::Timestamp;

use crate::uuids::TypedUuid;

/// Tenant UUID
pub type TenantUuid = TypedUuid<TenantRecord>;

/// Tenant (depot) record.
///
/// The password hash is never loaded into this type; it only exists inside
/// the repository while credentials are checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TenantRecord {
    /// Unique tenant identifier.
    pub uuid: TenantUuid,

    /// Display name, unique together with `location`.
    pub name: String,

    pub location: String,

    /// Ten-digit contact number.
    pub phone_number: String,

    /// Lowercased contact email, unique across tenants.
    pub email: String,

    /// Inactive tenants cannot log in or use existing tokens.
    pub is_active: bool,

    pub created_at: Timestamp,

    pub updated_at: Timestamp,
}
