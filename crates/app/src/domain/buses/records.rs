//! Bus Records

use jiff::Timestamp;

use crate::{
    domain::{
        buses::{
            data::{Driver, Stoppage},
            pagination::PageInfo,
        },
        tenants::records::TenantUuid,
    },
    uuids::TypedUuid,
};

pub type BusUuid = TypedUuid<BusRecord>;

/// Bus Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusRecord {
    pub uuid: BusUuid,
    pub tenant_uuid: TenantUuid,
    pub bus_number: String,
    pub route: String,
    pub stoppages: Vec<Stoppage>,
    pub driver: Driver,
    pub capacity: u32,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// One page of a tenant's buses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusPage {
    pub buses: Vec<BusRecord>,
    pub pagination: PageInfo,
}

/// Fleet totals for one tenant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BusStats {
    pub total_buses: u64,
    pub active_buses: u64,
    pub inactive_buses: u64,

    /// Distinct route strings.
    pub total_routes: u64,
}
