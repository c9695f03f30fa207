//! Toggle Bus Status Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};

use crate::{
    buses::{
        errors::into_api_error,
        handlers::parse_bus_uuid,
        models::{BusData, BusResponse},
    },
    envelope::Envelope,
    errors::ApiError,
    extensions::*,
    state::State,
};

/// Toggle Bus Status Handler
///
/// Flips `isActive` and returns the bus as stored afterwards.
#[endpoint(
    tags("buses"),
    summary = "Toggle Bus Status",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    id: PathParam<String>,
    depot: &mut Depot,
) -> Result<Json<Envelope<BusData>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let tenant = depot.tenant_or_401()?;
    let uuid = parse_bus_uuid(&id.into_inner())?;

    let bus = state
        .app
        .buses
        .toggle_bus_status(tenant.uuid, uuid)
        .await
        .map_err(into_api_error)?;

    let message = if bus.is_active {
        "Bus activated successfully"
    } else {
        "Bus deactivated successfully"
    };

    Ok(Json(Envelope::with_message(
        message,
        BusData {
            bus: BusResponse::new(bus, &tenant),
        },
    )))
}
