//! Register Depot Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use fleet_app::{
    auth::passwords::Password,
    domain::tenants::{data::NewTenant, records::TenantUuid},
};

use crate::{
    envelope::Envelope,
    errors::ApiError,
    extensions::*,
    state::State,
    tenants::{errors::from_auth_error, models::SessionData},
};

/// Register Depot Request
///
/// Missing fields deserialize as empty strings and are reported as
/// validation errors.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub(crate) struct RegisterRequest {
    pub name: String,
    pub location: String,

    /// Ten digits.
    pub phone_number: String,

    pub email: String,

    /// At least six characters.
    pub password: String,
}

impl From<RegisterRequest> for NewTenant {
    fn from(request: RegisterRequest) -> Self {
        NewTenant {
            uuid: TenantUuid::new(),
            name: request.name,
            location: request.location,
            phone_number: request.phone_number,
            email: request.email,
            password: Password::new(request.password),
        }
    }
}

/// Register Depot Handler
#[endpoint(
    tags("tenants"),
    summary = "Register Depot",
    responses(
        (status_code = StatusCode::CREATED, description = "Depot registered"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<RegisterRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<Envelope<SessionData>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let session = state
        .app
        .auth
        .register(json.into_inner().into())
        .await
        .map_err(from_auth_error)?;

    res.status_code(StatusCode::CREATED);

    Ok(Json(Envelope::with_message(
        "Depot registered successfully",
        session.into(),
    )))
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::{Value, json};
    use testresult::TestResult;

    use fleet_app::{
        auth::{AuthServiceError, MockAuthService, Session, token::IssuedToken},
        domain::tenants::TenantsServiceError,
        validation::ValidationErrors,
    };

    use crate::test_helpers::{auth_service, test_tenant};

    use super::*;

    fn make_service(auth: MockAuthService) -> Service {
        auth_service(auth, Router::with_path("tenant/register").post(handler))
    }

    fn body() -> Value {
        json!({
            "name": "Central Depot",
            "location": "Pune",
            "phoneNumber": "9876543210",
            "email": "central@fleet.com",
            "password": "password123"
        })
    }

    #[tokio::test]
    async fn test_register_returns_201_with_token() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_register()
            .once()
            .withf(|tenant| {
                tenant.name == "Central Depot"
                    && tenant.email == "central@fleet.com"
                    && tenant.password.expose() == "password123"
            })
            .return_once(|_| {
                Ok(Session {
                    tenant: test_tenant(),
                    token: IssuedToken {
                        token: "signed.jwt.token".to_string(),
                        expires_at: Timestamp::UNIX_EPOCH,
                    },
                })
            });

        let mut res = TestClient::post("http://example.com/tenant/register")
            .json(&body())
            .send(&make_service(auth))
            .await;

        let body: Value = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(body["success"], true);
        assert_eq!(body["message"], "Depot registered successfully");
        assert_eq!(body["data"]["token"], "signed.jwt.token");
        assert_eq!(body["data"]["tenant"]["name"], "Central Depot");
        assert!(
            body["data"]["tenant"].get("password").is_none(),
            "password must not be serialized"
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_register_duplicate_depot_returns_400() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_register()
            .once()
            .return_once(|_| Err(AuthServiceError::Tenants(TenantsServiceError::DuplicateTenant)));

        let mut res = TestClient::post("http://example.com/tenant/register")
            .json(&body())
            .send(&make_service(auth))
            .await;

        let body: Value = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
        assert_eq!(
            body["message"],
            "Depot with this name and location already exists"
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_register_duplicate_email_returns_400() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_register()
            .once()
            .return_once(|_| Err(AuthServiceError::Tenants(TenantsServiceError::DuplicateEmail)));

        let mut res = TestClient::post("http://example.com/tenant/register")
            .json(&body())
            .send(&make_service(auth))
            .await;

        let body: Value = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
        assert_eq!(body["message"], "Email already registered");

        Ok(())
    }

    #[tokio::test]
    async fn test_register_validation_errors_are_listed() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_register().once().return_once(|_| {
            let mut errors = ValidationErrors::new();

            errors.push("email", "Please provide valid email");

            Err(AuthServiceError::Tenants(TenantsServiceError::Validation(errors)))
        });

        let mut res = TestClient::post("http://example.com/tenant/register")
            .json(&json!({ "name": "Central Depot" }))
            .send(&make_service(auth))
            .await;

        let body: Value = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
        assert_eq!(body["message"], "Validation errors");
        assert_eq!(body["errors"][0]["field"], "email");

        Ok(())
    }
}
