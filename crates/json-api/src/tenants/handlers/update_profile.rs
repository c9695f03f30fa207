//! Update Profile Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use fleet_app::domain::tenants::{TenantsServiceError, data::ProfileUpdate};

use crate::{
    envelope::Envelope,
    errors::ApiError,
    extensions::*,
    state::State,
    tenants::{errors::from_tenants_error, models::ProfileData},
};

/// Update Profile Request
///
/// Omitted fields are left unchanged.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub(crate) struct UpdateProfileRequest {
    pub phone_number: Option<String>,
    pub email: Option<String>,
}

impl From<UpdateProfileRequest> for ProfileUpdate {
    fn from(request: UpdateProfileRequest) -> Self {
        ProfileUpdate {
            phone_number: request.phone_number,
            email: request.email,
        }
    }
}

/// Update Profile Handler
#[endpoint(
    tags("tenants"),
    summary = "Update Depot Profile",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    json: JsonBody<UpdateProfileRequest>,
    depot: &mut Depot,
) -> Result<Json<Envelope<ProfileData>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let tenant = depot.tenant_or_401()?;

    let updated = state
        .app
        .tenants
        .update_profile(tenant.uuid, json.into_inner().into())
        .await
        .map_err(|error| match error {
            TenantsServiceError::DuplicateEmail => ApiError::bad_request("Email already in use"),
            other => from_tenants_error(other),
        })?;

    Ok(Json(Envelope::with_message(
        "Profile updated successfully",
        ProfileData {
            tenant: updated.into(),
        },
    )))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::{Value, json};
    use testresult::TestResult;

    use fleet_app::domain::tenants::{MockTenantsService, records::TenantRecord};

    use crate::test_helpers::{TEST_TENANT_UUID, tenants_service, test_tenant};

    use super::*;

    fn make_service(tenants: MockTenantsService) -> Service {
        tenants_service(tenants, Router::with_path("tenant/profile").put(handler))
    }

    #[tokio::test]
    async fn test_update_profile_returns_updated_tenant() -> TestResult {
        let mut tenants = MockTenantsService::new();

        tenants
            .expect_update_profile()
            .once()
            .withf(|tenant, update| {
                *tenant == TEST_TENANT_UUID
                    && *update
                        == ProfileUpdate {
                            phone_number: None,
                            email: Some("new@fleet.com".to_string()),
                        }
            })
            .return_once(|_, _| {
                Ok(TenantRecord {
                    email: "new@fleet.com".to_string(),
                    ..test_tenant()
                })
            });

        let mut res = TestClient::put("http://example.com/tenant/profile")
            .json(&json!({ "email": "new@fleet.com" }))
            .send(&make_service(tenants))
            .await;

        let body: Value = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body["message"], "Profile updated successfully");
        assert_eq!(body["data"]["tenant"]["email"], "new@fleet.com");

        Ok(())
    }

    #[tokio::test]
    async fn test_update_profile_taken_email_returns_400() -> TestResult {
        let mut tenants = MockTenantsService::new();

        tenants
            .expect_update_profile()
            .once()
            .return_once(|_, _| Err(TenantsServiceError::DuplicateEmail));

        let mut res = TestClient::put("http://example.com/tenant/profile")
            .json(&json!({ "email": "taken@fleet.com" }))
            .send(&make_service(tenants))
            .await;

        let body: Value = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
        assert_eq!(body["message"], "Email already in use");

        Ok(())
    }
}
