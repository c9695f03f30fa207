//! Test Helpers

use crate::{
    auth::passwords::Password,
    domain::{
        buses::{
            data::{Driver, NewBus, Stoppage},
            records::BusUuid,
        },
        tenants::{data::NewTenant, records::TenantUuid},
    },
};

/// A valid registration whose email is derived from `name`.
pub(crate) fn new_tenant(name: &str) -> NewTenant {
    let slug = name.trim().to_lowercase().replace(' ', "-");

    NewTenant {
        uuid: TenantUuid::new(),
        name: name.to_string(),
        location: "Pune".to_string(),
        phone_number: "9876543210".to_string(),
        email: format!("{slug}@fleet.com"),
        password: Password::new("password123"),
    }
}

/// A valid bus with two stoppages and no explicit capacity.
pub(crate) fn new_bus(bus_number: &str) -> NewBus {
    NewBus {
        uuid: BusUuid::new(),
        bus_number: bus_number.to_string(),
        route: "Station - Airport".to_string(),
        stoppages: vec![
            Stoppage {
                name: "Station".to_string(),
                arrival_time: "09:30".to_string(),
                departure_time: "09:35".to_string(),
            },
            Stoppage {
                name: "Airport".to_string(),
                arrival_time: "10:15".to_string(),
                departure_time: "10:20".to_string(),
            },
        ],
        driver: Driver {
            name: "Ravi Patil".to_string(),
            phone_number: "9123456789".to_string(),
        },
        capacity: None,
    }
}
