//! Bus Models

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use fleet_app::domain::{
    buses::{
        data::{BusUpdate, Driver, NewBus, Stoppage},
        pagination::PageInfo,
        records::{BusRecord, BusStats, BusUuid},
    },
    tenants::records::TenantRecord,
};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub(crate) struct StoppageBody {
    pub name: String,

    /// `HH:MM`, 24-hour.
    pub arrival_time: String,

    /// `HH:MM`, 24-hour.
    pub departure_time: String,
}

impl From<StoppageBody> for Stoppage {
    fn from(body: StoppageBody) -> Self {
        Stoppage {
            name: body.name,
            arrival_time: body.arrival_time,
            departure_time: body.departure_time,
        }
    }
}

impl From<Stoppage> for StoppageBody {
    fn from(stoppage: Stoppage) -> Self {
        Self {
            name: stoppage.name,
            arrival_time: stoppage.arrival_time,
            departure_time: stoppage.departure_time,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub(crate) struct DriverBody {
    pub name: String,

    /// Ten digits.
    pub phone_number: String,
}

impl From<DriverBody> for Driver {
    fn from(body: DriverBody) -> Self {
        Driver {
            name: body.name,
            phone_number: body.phone_number,
        }
    }
}

impl From<Driver> for DriverBody {
    fn from(driver: Driver) -> Self {
        Self {
            name: driver.name,
            phone_number: driver.phone_number,
        }
    }
}

/// Create and update payload.
///
/// Missing fields deserialize empty and surface as validation errors.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub(crate) struct BusRequest {
    pub bus_number: String,
    pub route: String,
    pub stoppages: Vec<StoppageBody>,
    pub driver: DriverBody,

    /// Defaults to 40 on create; unchanged on update when omitted.
    pub capacity: Option<i32>,

    /// Only honoured on update.
    pub is_active: Option<bool>,
}

impl BusRequest {
    pub(crate) fn into_new_bus(self) -> NewBus {
        NewBus {
            uuid: BusUuid::new(),
            bus_number: self.bus_number,
            route: self.route,
            stoppages: self.stoppages.into_iter().map(Into::into).collect(),
            driver: self.driver.into(),
            capacity: self.capacity,
        }
    }

    pub(crate) fn into_update(self) -> BusUpdate {
        BusUpdate {
            bus_number: self.bus_number,
            route: self.route,
            stoppages: self.stoppages.into_iter().map(Into::into).collect(),
            driver: self.driver.into(),
            capacity: self.capacity,
            is_active: self.is_active,
        }
    }
}

/// The depot owning a bus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub(crate) struct DepotSummary {
    pub id: Uuid,
    pub name: String,
    pub location: String,
}

impl From<&TenantRecord> for DepotSummary {
    fn from(tenant: &TenantRecord) -> Self {
        Self {
            id: tenant.uuid.into(),
            name: tenant.name.clone(),
            location: tenant.location.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct BusResponse {
    pub id: Uuid,

    /// Uppercased, unique across all depots.
    pub bus_number: String,

    pub route: String,
    pub stoppages: Vec<StoppageBody>,
    pub driver: DriverBody,
    pub capacity: u32,
    pub is_active: bool,
    pub depot: DepotSummary,
    pub created_at: String,
    pub updated_at: String,
}

impl BusResponse {
    /// Render `bus` as owned by `tenant`.
    pub(crate) fn new(bus: BusRecord, tenant: &TenantRecord) -> Self {
        Self {
            id: bus.uuid.into(),
            bus_number: bus.bus_number,
            route: bus.route,
            stoppages: bus.stoppages.into_iter().map(Into::into).collect(),
            driver: bus.driver.into(),
            capacity: bus.capacity,
            is_active: bus.is_active,
            depot: tenant.into(),
            created_at: bus.created_at.to_string(),
            updated_at: bus.updated_at.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct BusData {
    pub bus: BusResponse,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PaginationBody {
    pub current_page: u32,
    pub total_pages: u64,
    pub total_buses: u64,
    pub has_next: bool,
    pub has_prev: bool,
}

impl From<PageInfo> for PaginationBody {
    fn from(page: PageInfo) -> Self {
        Self {
            current_page: page.current_page,
            total_pages: page.total_pages,
            total_buses: page.total_items,
            has_next: page.has_next,
            has_prev: page.has_prev,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct BusListData {
    pub buses: Vec<BusResponse>,
    pub pagination: PaginationBody,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct StatsData {
    pub total_buses: u64,
    pub active_buses: u64,
    pub inactive_buses: u64,

    /// Distinct route names.
    pub total_routes: u64,

    /// Name of the depot the counts belong to.
    pub depot: String,
}

impl StatsData {
    pub(crate) fn new(stats: BusStats, tenant: &TenantRecord) -> Self {
        Self {
            total_buses: stats.total_buses,
            active_buses: stats.active_buses,
            inactive_buses: stats.inactive_buses,
            total_routes: stats.total_routes,
            depot: tenant.name.clone(),
        }
    }
}
