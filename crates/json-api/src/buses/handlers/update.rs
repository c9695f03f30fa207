//! Update Bus Handler

use std::sync::Arc;

use salvo::{
    oapi::extract::{JsonBody, PathParam},
    prelude::*,
};

use crate::{
    buses::{
        errors::into_api_error,
        handlers::parse_bus_uuid,
        models::{BusData, BusRequest, BusResponse},
    },
    envelope::Envelope,
    errors::ApiError,
    extensions::*,
    state::State,
};

/// Update Bus Handler
///
/// Replaces the bus fields. Capacity and status are kept when omitted.
#[endpoint(
    tags("buses"),
    summary = "Update Bus",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    id: PathParam<String>,
    json: JsonBody<BusRequest>,
    depot: &mut Depot,
) -> Result<Json<Envelope<BusData>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let tenant = depot.tenant_or_401()?;
    let uuid = parse_bus_uuid(&id.into_inner())?;

    let bus = state
        .app
        .buses
        .update_bus(tenant.uuid, uuid, json.into_inner().into_update())
        .await
        .map_err(into_api_error)?;

    Ok(Json(Envelope::with_message(
        "Bus updated successfully",
        BusData {
            bus: BusResponse::new(bus, &tenant),
        },
    )))
}
