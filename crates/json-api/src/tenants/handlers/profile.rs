//! Get Profile Handler

use salvo::prelude::*;

use crate::{
    envelope::Envelope, errors::ApiError, extensions::*, tenants::models::ProfileData,
};

/// Get Profile Handler
///
/// Returns the authenticated depot as resolved by the auth middleware.
#[endpoint(
    tags("tenants"),
    summary = "Get Depot Profile",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<Envelope<ProfileData>>, ApiError> {
    let tenant = depot.tenant_or_401()?;

    Ok(Json(Envelope::data(ProfileData {
        tenant: tenant.into(),
    })))
}
