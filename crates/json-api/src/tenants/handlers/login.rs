//! Login Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use fleet_app::{auth::passwords::Password, domain::tenants::data::TenantCredentials};

use crate::{
    envelope::Envelope,
    errors::ApiError,
    extensions::*,
    state::State,
    tenants::{errors::from_auth_error, models::SessionData},
};

/// Login Request
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub(crate) struct LoginRequest {
    pub name: String,
    pub location: String,
    pub password: String,
}

impl From<LoginRequest> for TenantCredentials {
    fn from(request: LoginRequest) -> Self {
        TenantCredentials {
            name: request.name,
            location: request.location,
            password: Password::new(request.password),
        }
    }
}

/// Login Handler
///
/// Exchanges depot name, location and password for a bearer token.
#[endpoint(tags("tenants"), summary = "Login")]
pub(crate) async fn handler(
    json: JsonBody<LoginRequest>,
    depot: &mut Depot,
) -> Result<Json<Envelope<SessionData>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let session = state
        .app
        .auth
        .login(json.into_inner().into())
        .await
        .map_err(from_auth_error)?;

    Ok(Json(Envelope::with_message(
        "Login successful",
        session.into(),
    )))
}
