//! Add Bus Handler

use std::sync::Arc;

use salvo::{http::header::LOCATION, oapi::extract::JsonBody, prelude::*};

use crate::{
    buses::{
        errors::into_api_error,
        models::{BusData, BusRequest, BusResponse},
    },
    envelope::Envelope,
    errors::ApiError,
    extensions::*,
    state::State,
};

/// Add Bus Handler
#[endpoint(
    tags("buses"),
    summary = "Add Bus",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Bus added"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<BusRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<Envelope<BusData>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let tenant = depot.tenant_or_401()?;

    let bus = state
        .app
        .buses
        .create_bus(tenant.uuid, json.into_inner().into_new_bus())
        .await
        .map_err(into_api_error)?;

    res.add_header(LOCATION, format!("/bus/{}", bus.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(Envelope::with_message(
        "Bus added successfully",
        BusData {
            bus: BusResponse::new(bus, &tenant),
        },
    )))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::{Value, json};
    use testresult::TestResult;

    use fleet_app::{
        domain::buses::{BusesServiceError, MockBusesService, records::BusUuid},
        validation::ValidationErrors,
    };

    use crate::test_helpers::{TEST_TENANT_UUID, buses_service, make_bus};

    use super::*;

    fn make_service(buses: MockBusesService) -> Service {
        buses_service(buses, Router::with_path("bus/add").post(handler))
    }

    fn body() -> Value {
        json!({
            "busNumber": "mh12ab1234",
            "route": "Station - Airport",
            "stoppages": [
                { "name": "Station", "arrivalTime": "09:00", "departureTime": "09:05" }
            ],
            "driver": { "name": "Ravi Patil", "phoneNumber": "9123456789" }
        })
    }

    #[tokio::test]
    async fn test_add_bus_returns_201() -> TestResult {
        let uuid = BusUuid::new();

        let mut buses = MockBusesService::new();

        buses
            .expect_create_bus()
            .once()
            .withf(|tenant, bus| {
                *tenant == TEST_TENANT_UUID
                    && bus.bus_number == "mh12ab1234"
                    && bus.stoppages.len() == 1
                    && bus.driver.phone_number == "9123456789"
                    && bus.capacity.is_none()
            })
            .return_once(move |_, _| Ok(make_bus(uuid)));

        let mut res = TestClient::post("http://example.com/bus/add")
            .json(&body())
            .send(&make_service(buses))
            .await;

        let body: Value = res.take_json().await?;
        let location = res.headers().get("location").and_then(|v| v.to_str().ok());

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(location, Some(format!("/bus/{uuid}").as_str()));
        assert_eq!(body["message"], "Bus added successfully");
        assert_eq!(body["data"]["bus"]["id"], uuid.to_string());
        assert_eq!(body["data"]["bus"]["busNumber"], "MH12AB1234");
        assert_eq!(body["data"]["bus"]["depot"]["name"], "Central Depot");

        Ok(())
    }

    #[tokio::test]
    async fn test_add_bus_duplicate_number_returns_400() -> TestResult {
        let mut buses = MockBusesService::new();

        buses
            .expect_create_bus()
            .once()
            .return_once(|_, _| Err(BusesServiceError::DuplicateBusNumber));

        let mut res = TestClient::post("http://example.com/bus/add")
            .json(&body())
            .send(&make_service(buses))
            .await;

        let body: Value = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Bus number already exists");

        Ok(())
    }

    #[tokio::test]
    async fn test_add_bus_invalid_time_returns_400() -> TestResult {
        let mut buses = MockBusesService::new();

        buses.expect_create_bus().once().return_once(|_, _| {
            let mut errors = ValidationErrors::new();

            errors.push(
                "stoppages[0].arrivalTime",
                "Arrival time must be in HH:MM format",
            );

            Err(BusesServiceError::Validation(errors))
        });

        let mut res = TestClient::post("http://example.com/bus/add")
            .json(&body())
            .send(&make_service(buses))
            .await;

        let body: Value = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
        assert_eq!(body["message"], "Validation errors");
        assert_eq!(body["errors"][0]["field"], "stoppages[0].arrivalTime");

        Ok(())
    }
}
