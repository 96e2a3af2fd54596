//! Tests for the error taxonomy and its constructors.

use super::*;
use crate::domain::RequestId;
use rstest::{fixture, rstest};

const REQUEST_ID: &str = "req-123456789";

#[fixture]
fn expected_request_id() -> RequestId {
    REQUEST_ID.parse().expect("fixture request id is valid")
}

#[rstest]
#[case(Error::validation(""), ErrorCode::ValidationFailed, 422)]
#[case(Error::authentication(""), ErrorCode::AuthInvalid, 401)]
#[case(Error::authorization(""), ErrorCode::Forbidden, 403)]
#[case(Error::not_found(""), ErrorCode::ResourceNotFound, 404)]
#[case(Error::conflict(""), ErrorCode::ResourceConflict, 409)]
#[case(Error::business_logic(""), ErrorCode::BusinessLogicError, 422)]
#[case(Error::internal(""), ErrorCode::InternalServerError, 500)]
#[case(Error::service_unavailable(""), ErrorCode::ServiceUnavailable, 503)]
fn named_constructors_fix_code_and_status(
    #[case] error: Error,
    #[case] code: ErrorCode,
    #[case] status: u16,
) {
    assert_eq!(error.code(), code);
    assert_eq!(error.http_status(), status);
    assert_eq!(error.message(), code.default_message());
    assert!(error.details().is_empty());
}

#[rstest]
fn explicit_message_overrides_default() {
    let error = Error::not_found("user 42 does not exist");
    assert_eq!(error.message(), "user 42 does not exist");
    assert_eq!(error.http_status(), 404);
}

#[rstest]
fn status_override_is_applied_within_error_range() {
    let error = Error::business_logic("quota exceeded").with_status(409);
    assert_eq!(error.http_status(), 409);
    assert_eq!(error.code(), ErrorCode::BusinessLogicError);
}

#[rstest]
#[case(200)]
#[case(302)]
#[case(600)]
fn status_override_outside_error_range_is_ignored(#[case] status: u16) {
    let error = Error::conflict("taken").with_status(status);
    assert_eq!(error.http_status(), 409);
}

#[rstest]
fn try_new_rejects_empty_messages() {
    let result = Error::try_new(ErrorCode::InvalidRequest, "   ", 400);
    assert_eq!(result, Err(ErrorValidationError::EmptyMessage));
}

#[rstest]
fn try_new_rejects_success_statuses() {
    let result = Error::try_new(ErrorCode::InvalidRequest, "bad", 204);
    assert_eq!(result, Err(ErrorValidationError::InvalidStatus(204)));
}

#[rstest]
fn details_keep_insertion_order() {
    let error = Error::validation("bad input")
        .with_detail(ErrorDetail::field("email", "Invalid email format"))
        .with_detail(ErrorDetail::general("check the form"));
    let fields: Vec<_> = error.details().iter().map(|d| d.field.as_deref()).collect();
    assert_eq!(fields, vec![Some("email"), None]);
}

#[rstest]
fn unexpected_errors_hide_their_source() {
    let error = Error::unexpected("connection reset by peer");
    assert_eq!(error.code(), ErrorCode::InternalServerError);
    assert_eq!(error.message(), "Internal server error");
    assert!(error.details().is_empty());
    assert_eq!(error.diagnostic(), Some("connection reset by peer"));
}

#[rstest]
fn new_returns_no_request_id_out_of_scope() {
    assert!(Error::internal("boom").request_id().is_none());
}

#[rstest]
#[tokio::test]
async fn new_captures_request_id_in_scope(expected_request_id: RequestId) {
    let scoped = expected_request_id.clone();
    let error = RequestId::scope(scoped, async { Error::conflict("taken") }).await;
    assert_eq!(error.request_id(), Some(&expected_request_id));
}

#[rstest]
fn codes_serialise_in_screaming_snake_case() {
    let encoded = serde_json::to_string(&ErrorCode::BusinessLogicError).expect("serialise code");
    assert_eq!(encoded, "\"BUSINESS_LOGIC_ERROR\"");
    let decoded: ErrorCode =
        serde_json::from_str("\"SERVICE_UNAVAILABLE\"").expect("deserialise code");
    assert_eq!(decoded, ErrorCode::ServiceUnavailable);
}

#[rstest]
fn error_detail_serialises_missing_field_as_null() {
    let encoded = serde_json::to_value(ErrorDetail::general("oops")).expect("serialise detail");
    assert_eq!(encoded, serde_json::json!({"field": null, "message": "oops"}));
}
