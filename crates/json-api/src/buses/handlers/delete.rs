//! Delete Bus Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};

use crate::{
    buses::{errors::into_api_error, handlers::parse_bus_uuid},
    envelope::MessageEnvelope,
    errors::ApiError,
    extensions::*,
    state::State,
};

/// Delete Bus Handler
#[endpoint(
    tags("buses"),
    summary = "Delete Bus",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    id: PathParam<String>,
    depot: &mut Depot,
) -> Result<Json<MessageEnvelope>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let tenant = depot.tenant_or_401()?;
    let uuid = parse_bus_uuid(&id.into_inner())?;

    state
        .app
        .buses
        .delete_bus(tenant.uuid, uuid)
        .await
        .map_err(into_api_error)?;

    Ok(Json(MessageEnvelope::new("Bus deleted successfully")))
}
