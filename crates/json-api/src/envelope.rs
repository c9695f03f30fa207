//! Uniform response envelopes.

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};

use fleet_app::validation::FieldError;

/// Successful response carrying `data`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Envelope<T: ToSchema + 'static> {
    pub success: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    pub data: T,
}

impl<T: ToSchema + 'static> Envelope<T> {
    pub(crate) fn data(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data,
        }
    }

    pub(crate) fn with_message(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data,
        }
    }
}

/// Successful response with nothing but a message.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct MessageEnvelope {
    pub success: bool,
    pub message: String,
}

impl MessageEnvelope {
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

/// A rejected input field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub(crate) struct FieldErrorBody {
    /// Wire name of the field, e.g. `driver.phoneNumber`.
    pub field: String,
    pub message: String,
}

impl From<FieldError> for FieldErrorBody {
    fn from(error: FieldError) -> Self {
        Self {
            field: error.field,
            message: error.message,
        }
    }
}

/// Failure response.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ErrorEnvelope {
    pub success: bool,
    pub message: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<FieldErrorBody>,

    /// Internal error detail, only present in development.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ErrorEnvelope {
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            errors: Vec::new(),
            error: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{json, to_value};
    use testresult::TestResult;

    use super::*;

    #[derive(Debug, Serialize, Deserialize, ToSchema)]
    struct Probe {
        a: u8,
    }

    #[test]
    fn message_is_omitted_when_absent() -> TestResult {
        let value = to_value(Envelope::data(Probe { a: 1 }))?;

        assert_eq!(value, json!({ "success": true, "data": { "a": 1 } }));

        Ok(())
    }

    #[test]
    fn error_envelope_skips_empty_parts() -> TestResult {
        let value = to_value(ErrorEnvelope::new("Bus not found"))?;

        assert_eq!(value, json!({ "success": false, "message": "Bus not found" }));

        Ok(())
    }
}
