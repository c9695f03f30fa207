//! Bus Handlers

use uuid::Uuid;

use fleet_app::domain::buses::records::BusUuid;

use crate::errors::ApiError;

pub(crate) mod create;
pub(crate) mod delete;
pub(crate) mod get;
pub(crate) mod index;
pub(crate) mod stats;
pub(crate) mod toggle_status;
pub(crate) mod update;

/// Malformed ids are reported the same way as ids of other depots' buses.
fn parse_bus_uuid(raw: &str) -> Result<BusUuid, ApiError> {
    Uuid::try_parse(raw.trim())
        .map(BusUuid::from_uuid)
        .map_err(|_invalid| ApiError::not_found("Bus not found"))
}
