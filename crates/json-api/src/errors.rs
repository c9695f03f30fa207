//! HTTP error rendering.

use std::{error::Error as StdError, fmt::Write as _};

use salvo::{
    http::ResBody,
    oapi::{self, Components, EndpointOutRegister, Operation, ToSchema},
    prelude::*,
};
use thiserror::Error;
use tracing::error;

use fleet_app::validation::ValidationErrors;

use crate::{
    envelope::{ErrorEnvelope, FieldErrorBody},
    observability::settings,
};

const INTERNAL_MESSAGE: &str = "Something went wrong!";

/// An error response rendered as the failure envelope.
#[derive(Debug, Error)]
#[error("{message}")]
pub(crate) struct ApiError {
    status: StatusCode,
    message: String,
    errors: Vec<FieldErrorBody>,
    detail: Option<String>,
}

impl ApiError {
    pub(crate) fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            errors: Vec::new(),
            detail: None,
        }
    }

    pub(crate) fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub(crate) fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }

    pub(crate) fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    /// 500 with no detail attached.
    pub(crate) fn server_error() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_MESSAGE)
    }

    /// 400 listing every rejected field.
    pub(crate) fn validation(errors: ValidationErrors) -> Self {
        Self {
            errors: errors.into_iter().map(FieldErrorBody::from).collect(),
            ..Self::bad_request("Validation errors")
        }
    }

    /// Log `error` with its source chain and hide it from the caller
    /// unless error details are exposed.
    pub(crate) fn internal(context: &str, error: &(dyn StdError + 'static)) -> Self {
        Self::internal_with_detail(context, error, settings::expose_error_details())
    }

    fn internal_with_detail(
        context: &str,
        error: &(dyn StdError + 'static),
        expose_detail: bool,
    ) -> Self {
        let report = report(error);

        error!("{context}: {report}");

        Self {
            detail: expose_detail.then_some(report),
            ..Self::server_error()
        }
    }

    pub(crate) fn status(&self) -> StatusCode {
        self.status
    }

    #[cfg(test)]
    pub(crate) fn field_errors(&self) -> &[FieldErrorBody] {
        &self.errors
    }

    fn into_envelope(self) -> ErrorEnvelope {
        ErrorEnvelope {
            errors: self.errors,
            error: self.detail,
            ..ErrorEnvelope::new(self.message)
        }
    }
}

fn report(error: &(dyn StdError + 'static)) -> String {
    let mut report = error.to_string();
    let mut source = error.source();

    while let Some(cause) = source {
        let _ignored = write!(report, ": {cause}");
        source = cause.source();
    }

    report
}

impl Scribe for ApiError {
    fn render(self, res: &mut Response) {
        res.status_code(self.status);
        res.render(Json(self.into_envelope()));
    }
}

impl EndpointOutRegister for ApiError {
    fn register(components: &mut Components, operation: &mut Operation) {
        for (status, description) in [
            (StatusCode::BAD_REQUEST, "Validation failed"),
            (StatusCode::UNAUTHORIZED, "Missing or rejected bearer token"),
            (StatusCode::NOT_FOUND, "Not found"),
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error"),
        ] {
            operation.responses.insert(
                status.as_str(),
                oapi::Response::new(description)
                    .add_content("application/json", ErrorEnvelope::to_schema(components)),
            );
        }
    }
}

/// Catcher hoop rendering bodiless error statuses as failure envelopes.
#[handler]
pub(crate) async fn render_status(res: &mut Response, ctrl: &mut FlowCtrl) {
    let status = res
        .status_code
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    let message = match status {
        StatusCode::NOT_FOUND => "Route not found",
        StatusCode::METHOD_NOT_ALLOWED => "Method not allowed",
        StatusCode::UNAUTHORIZED => "Unauthorized",
        StatusCode::PAYLOAD_TOO_LARGE => "Request body too large",
        status if status.is_client_error() => "Invalid request",
        _ => INTERNAL_MESSAGE,
    };

    res.body(ResBody::None);
    res.status_code(status);
    res.render(Json(ErrorEnvelope::new(message)));

    ctrl.skip_rest();
}
