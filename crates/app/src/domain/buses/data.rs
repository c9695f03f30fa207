//! Bus Data

use serde::{Deserialize, Serialize};

use crate::{
    domain::buses::{pagination::PageRequest, records::BusUuid},
    validation::{self, ValidationErrors},
};

/// Capacity used when a new bus does not state one.
pub const DEFAULT_CAPACITY: i32 = 40;

/// A scheduled stop. Times are 24-hour `H:MM`/`HH:MM` strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stoppage {
    pub name: String,
    pub arrival_time: String,
    pub departure_time: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Driver {
    pub name: String,
    pub phone_number: String,
}

/// New Bus Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBus {
    pub uuid: BusUuid,
    pub bus_number: String,
    pub route: String,
    pub stoppages: Vec<Stoppage>,
    pub driver: Driver,
    pub capacity: Option<i32>,
}

impl NewBus {
    /// Normalise and check every field.
    ///
    /// # Errors
    ///
    /// Returns every failing field at once.
    pub fn validate(mut self) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        check_bus_fields(
            &mut errors,
            &mut self.bus_number,
            &mut self.route,
            &mut self.stoppages,
            &mut self.driver,
            self.capacity,
        );

        errors.finish(self)
    }
}

/// Full replacement of a bus's editable fields.
///
/// `capacity` and `is_active` keep their stored values when `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusUpdate {
    pub bus_number: String,
    pub route: String,
    pub stoppages: Vec<Stoppage>,
    pub driver: Driver,
    pub capacity: Option<i32>,
    pub is_active: Option<bool>,
}

impl BusUpdate {
    /// Normalise and check every field.
    ///
    /// # Errors
    ///
    /// Returns every failing field at once.
    pub fn validate(mut self) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        check_bus_fields(
            &mut errors,
            &mut self.bus_number,
            &mut self.route,
            &mut self.stoppages,
            &mut self.driver,
            self.capacity,
        );

        errors.finish(self)
    }
}

/// Filters for listing a tenant's buses.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BusQuery {
    pub page: PageRequest,

    /// Case-insensitive substring of bus number, route or driver name.
    pub search: Option<String>,

    pub is_active: Option<bool>,
}

impl BusQuery {
    /// Trim the search term, treating a blank term as no filter.
    #[must_use]
    pub fn new(page: PageRequest, search: Option<String>, is_active: Option<bool>) -> Self {
        let search = search
            .map(|term| term.trim().to_owned())
            .filter(|term| !term.is_empty());

        Self {
            page,
            search,
            is_active,
        }
    }

    /// `ILIKE` pattern for the search term, with wildcards in the term escaped.
    #[must_use]
    pub fn search_pattern(&self) -> Option<String> {
        self.search
            .as_deref()
            .map(|term| format!("%{}%", escape_like(term)))
    }
}

fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());

    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }

        escaped.push(c);
    }

    escaped
}

fn check_bus_fields(
    errors: &mut ValidationErrors,
    bus_number: &mut String,
    route: &mut String,
    stoppages: &mut [Stoppage],
    driver: &mut Driver,
    capacity: Option<i32>,
) {
    *bus_number = bus_number.trim().to_uppercase();

    if bus_number.is_empty() {
        errors.push("busNumber", "Bus number is required");
    }

    validation::required(errors, "route", route, "Route is required");

    if stoppages.is_empty() {
        errors.push("stoppages", "At least one stoppage is required");
    }

    for (index, stoppage) in stoppages.iter_mut().enumerate() {
        validation::required(
            errors,
            &format!("stoppages[{index}].name"),
            &mut stoppage.name,
            "Stoppage name is required",
        );

        check_time(
            errors,
            &format!("stoppages[{index}].arrivalTime"),
            &mut stoppage.arrival_time,
            "Arrival time must be in HH:MM format",
        );

        check_time(
            errors,
            &format!("stoppages[{index}].departureTime"),
            &mut stoppage.departure_time,
            "Departure time must be in HH:MM format",
        );
    }

    validation::required(
        errors,
        "driver.name",
        &mut driver.name,
        "Driver name is required",
    );

    validation::trim_in_place(&mut driver.phone_number);

    if !validation::is_phone_number(&driver.phone_number) {
        errors.push(
            "driver.phoneNumber",
            "Driver phone number must be 10 digits",
        );
    }

    if capacity.is_some_and(|capacity| capacity < 1) {
        errors.push("capacity", "Capacity must be at least 1");
    }
}

fn check_time(errors: &mut ValidationErrors, field: &str, time: &mut String, message: &str) {
    validation::trim_in_place(time);

    if !validation::is_clock_time(time) {
        errors.push(field, message);
    }
}
