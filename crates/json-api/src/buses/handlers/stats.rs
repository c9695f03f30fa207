//! Bus Stats Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    buses::{errors::into_api_error, models::StatsData},
    envelope::Envelope,
    errors::ApiError,
    extensions::*,
    state::State,
};

/// Bus Stats Handler
///
/// Fleet totals for the authenticated depot.
#[endpoint(
    tags("buses"),
    summary = "Fleet Overview",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<Envelope<StatsData>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let tenant = depot.tenant_or_401()?;

    let stats = state
        .app
        .buses
        .bus_stats(tenant.uuid)
        .await
        .map_err(into_api_error)?;

    Ok(Json(Envelope::data(StatsData::new(stats, &tenant))))
}
