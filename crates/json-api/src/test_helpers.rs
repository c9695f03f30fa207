//! Test helpers.

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{affix_state::inject, catcher::Catcher, prelude::*};
use uuid::Uuid;

use fleet_app::{
    auth::MockAuthService,
    context::AppContext,
    domain::{
        buses::{
            MockBusesService,
            data::{Driver, Stoppage},
            records::{BusRecord, BusUuid},
        },
        tenants::{
            MockTenantsService,
            records::{TenantRecord, TenantUuid},
        },
    },
};

use crate::{errors::render_status, extensions::*, state::State};

pub(crate) const TEST_TENANT_UUID: TenantUuid = TenantUuid::from_uuid(Uuid::nil());

pub(crate) fn test_tenant() -> TenantRecord {
    TenantRecord {
        uuid: TEST_TENANT_UUID,
        name: "Central Depot".to_string(),
        location: "Pune".to_string(),
        phone_number: "9876543210".to_string(),
        email: "central@fleet.com".to_string(),
        is_active: true,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_bus(uuid: BusUuid) -> BusRecord {
    BusRecord {
        uuid,
        tenant_uuid: TEST_TENANT_UUID,
        bus_number: "MH12AB1234".to_string(),
        route: "Station - Airport".to_string(),
        stoppages: vec![Stoppage {
            name: "Station".to_string(),
            arrival_time: "09:00".to_string(),
            departure_time: "09:05".to_string(),
        }],
        driver: Driver {
            name: "Ravi Patil".to_string(),
            phone_number: "9123456789".to_string(),
        },
        capacity: 40,
        is_active: true,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

#[salvo::handler]
pub(crate) async fn inject_tenant(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_tenant(test_tenant());
    ctrl.call_next(req, depot, res).await;
}

fn strict_tenants_mock() -> MockTenantsService {
    let mut tenants = MockTenantsService::new();

    tenants.expect_register_tenant().never();
    tenants.expect_find_by_credentials().never();
    tenants.expect_find_tenant().never();
    tenants.expect_update_profile().never();
    tenants.expect_set_password().never();
    tenants.expect_set_active().never();

    tenants
}

fn strict_buses_mock() -> MockBusesService {
    let mut buses = MockBusesService::new();

    buses.expect_create_bus().never();
    buses.expect_list_buses().never();
    buses.expect_get_bus().never();
    buses.expect_update_bus().never();
    buses.expect_delete_bus().never();
    buses.expect_toggle_bus_status().never();
    buses.expect_bus_stats().never();

    buses
}

fn strict_auth_mock() -> MockAuthService {
    let mut auth = MockAuthService::new();

    auth.expect_register().never();
    auth.expect_login().never();
    auth.expect_authenticate_bearer().never();

    auth
}

fn state(
    tenants: MockTenantsService,
    buses: MockBusesService,
    auth: MockAuthService,
) -> Arc<State> {
    State::shared(AppContext {
        tenants: Arc::new(tenants),
        buses: Arc::new(buses),
        auth: Arc::new(auth),
    })
}

pub(crate) fn state_with_auth(auth: MockAuthService) -> Arc<State> {
    state(strict_tenants_mock(), strict_buses_mock(), auth)
}

fn service(state: Arc<State>, route: Router) -> Service {
    Service::new(Router::new().hoop(inject(state)).push(route))
        .catcher(Catcher::default().hoop(render_status))
}

fn authenticated_service(state: Arc<State>, route: Router) -> Service {
    service(state, Router::new().hoop(inject_tenant).push(route))
}

/// Unauthenticated routes backed by `auth`.
pub(crate) fn auth_service(auth: MockAuthService, route: Router) -> Service {
    service(state_with_auth(auth), route)
}

/// Routes running as [`test_tenant`] backed by `tenants`.
pub(crate) fn tenants_service(tenants: MockTenantsService, route: Router) -> Service {
    authenticated_service(
        state(tenants, strict_buses_mock(), strict_auth_mock()),
        route,
    )
}

/// Routes running as [`test_tenant`] backed by `buses`.
pub(crate) fn buses_service(buses: MockBusesService, route: Router) -> Service {
    authenticated_service(
        state(strict_tenants_mock(), buses, strict_auth_mock()),
        route,
    )
}
