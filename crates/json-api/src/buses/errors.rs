//! Bus Errors

use fleet_app::domain::buses::BusesServiceError;

use crate::errors::ApiError;

pub(crate) fn into_api_error(error: BusesServiceError) -> ApiError {
    match error {
        BusesServiceError::Validation(errors) => ApiError::validation(errors),
        BusesServiceError::DuplicateBusNumber => ApiError::bad_request("Bus number already exists"),
        BusesServiceError::NotFound => ApiError::not_found("Bus not found"),
        other => ApiError::internal("bus operation failed", &other),
    }
}
