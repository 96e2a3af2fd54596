//! JSON response envelopes.
//!
//! Every body the API emits is wrapped: successes as `{"data": ...}` and
//! failures as `{"error": {...}}`. Handlers build the success side; the error
//! side is only ever built by the [`ResponseError`](actix_web::ResponseError)
//! impl so each failure is rendered exactly once.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Error, ErrorCode, ErrorDetail, RequestId};

/// Successful response wrapper.
///
/// # Examples
/// ```
/// use backend::inbound::http::envelope::SuccessResponse;
///
/// let body = serde_json::to_value(SuccessResponse::new("ok")).expect("serialise");
/// assert_eq!(body, serde_json::json!({"data": "ok"}));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SuccessResponse<T> {
    /// Response payload.
    pub data: T,
}

impl<T> SuccessResponse<T> {
    /// Wrap `data`.
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// Error payload nested under `error`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    /// Stable machine-readable error code.
    pub code: ErrorCode,
    /// Client-facing description.
    #[schema(example = "Resource not found")]
    pub message: String,
    /// HTTP status mirrored from the response line.
    #[schema(example = 404)]
    pub http_status: u16,
    /// Field-level or general remarks, in the order they were recorded.
    pub details: Vec<ErrorDetail>,
    /// Correlation identifier, also sent in the `X-Request-ID` header.
    #[schema(example = "5f1c3f0e-2d4b-4a9e-9c1d-7e0b6a4f2c11")]
    pub request_id: String,
}

/// Failure response wrapper.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error payload.
    pub error: ErrorBody,
}

impl ErrorResponse {
    /// Build the envelope for `error`, stamped with `request_id`.
    pub fn from_error(error: &Error, request_id: &RequestId) -> Self {
        Self {
            error: ErrorBody {
                code: error.code(),
                message: error.message().to_owned(),
                http_status: error.http_status(),
                details: error.details().to_vec(),
                request_id: request_id.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    fn error_envelope_wire_shape() {
        let request_id = RequestId::parse("abc").expect("valid request id");
        let error = Error::validation("")
            .with_detail(ErrorDetail::field("email", "Field required"))
            .with_detail(ErrorDetail::general("body is not an object"));

        let body = serde_json::to_value(ErrorResponse::from_error(&error, &request_id))
            .expect("serialise envelope");

        assert_eq!(
            body,
            json!({
                "error": {
                    "code": "VALIDATION_FAILED",
                    "message": "Invalid request parameters",
                    "http_status": 422,
                    "details": [
                        {"field": "email", "message": "Field required"},
                        {"field": null, "message": "body is not an object"}
                    ],
                    "request_id": "abc"
                }
            })
        );
    }

    #[rstest]
    fn unexpected_errors_render_without_diagnostics() {
        let request_id = RequestId::generate();
        let error = Error::unexpected("password authentication failed for user app");

        let body = serde_json::to_string(&ErrorResponse::from_error(&error, &request_id))
            .expect("serialise envelope");

        assert!(!body.contains("password authentication"));
        assert!(body.contains("INTERNAL_SERVER_ERROR"));
    }
}
