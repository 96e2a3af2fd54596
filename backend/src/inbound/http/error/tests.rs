//! Tests for HTTP error mapping.

use super::*;
use crate::domain::ErrorDetail;
use crate::inbound::http::envelope::ErrorBody;
use actix_web::body::to_bytes;
use rstest::{fixture, rstest};

const REQUEST_ID: &str = "req-123456789";

#[fixture]
fn request_id() -> RequestId {
    RequestId::parse(REQUEST_ID).expect("valid request id")
}

async fn render(error: &Error) -> (StatusCode, Option<String>, ErrorBody) {
    let response = ResponseError::error_response(error);
    let status = response.status();
    let header = response
        .headers()
        .get(REQUEST_ID_HEADER)
        .map(|value| value.to_str().expect("header is ascii").to_owned());
    let bytes = to_bytes(response.into_body())
        .await
        .expect("reading response body succeeds");
    let envelope: ErrorResponse =
        serde_json::from_slice(&bytes).expect("error envelope deserialises");
    (status, header, envelope.error)
}

#[rstest]
#[case(Error::validation(""), StatusCode::UNPROCESSABLE_ENTITY)]
#[case(Error::authentication(""), StatusCode::UNAUTHORIZED)]
#[case(Error::authorization(""), StatusCode::FORBIDDEN)]
#[case(Error::not_found(""), StatusCode::NOT_FOUND)]
#[case(Error::conflict(""), StatusCode::CONFLICT)]
#[case(Error::business_logic(""), StatusCode::UNPROCESSABLE_ENTITY)]
#[case(Error::internal(""), StatusCode::INTERNAL_SERVER_ERROR)]
#[case(Error::service_unavailable(""), StatusCode::SERVICE_UNAVAILABLE)]
fn status_code_matches_error(#[case] err: Error, #[case] status: StatusCode) {
    assert_eq!(ResponseError::status_code(&err), status);
}

#[rstest]
#[actix_web::test]
async fn renders_captured_request_id(request_id: RequestId) {
    let error = Error::not_found("user 42 does not exist")
        .with_request_id(request_id)
        .with_detail(ErrorDetail::field("id", "unknown user"));

    let (status, header, body) = render(&error).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(header.as_deref(), Some(REQUEST_ID));
    assert_eq!(body.request_id, REQUEST_ID);
    assert_eq!(body.code, ErrorCode::ResourceNotFound);
    assert_eq!(body.http_status, 404);
    assert_eq!(body.message, "user 42 does not exist");
    assert_eq!(body.details, vec![ErrorDetail::field("id", "unknown user")]);
}

#[rstest]
#[actix_web::test]
async fn falls_back_to_scoped_request_id(request_id: RequestId) {
    let error = Error::conflict("");

    let (_, header, body) = RequestId::scope(request_id, render(&error)).await;

    assert_eq!(header.as_deref(), Some(REQUEST_ID));
    assert_eq!(body.request_id, REQUEST_ID);
}

#[rstest]
#[actix_web::test]
async fn generates_request_id_out_of_scope() {
    let error = Error::conflict("");

    let (_, header, body) = render(&error).await;

    assert!(!body.request_id.is_empty());
    assert_eq!(header.as_deref(), Some(body.request_id.as_str()));
}

#[rstest]
#[actix_web::test]
async fn unexpected_errors_are_redacted() {
    let error = Error::unexpected("relation \"users\" does not exist");

    let (status, _, body) = render(&error).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body.code, ErrorCode::InternalServerError);
    assert_eq!(body.message, "Internal server error");
    assert!(body.details.is_empty());
}

#[rstest]
#[case(PoolError::checkout("timed out"), ErrorCode::ServiceUnavailable)]
#[case(PoolError::Closed, ErrorCode::ServiceUnavailable)]
#[case(PoolError::NotReady, ErrorCode::ServiceUnavailable)]
#[case(PoolError::query("syntax error"), ErrorCode::InternalServerError)]
#[case(PoolError::build("bad dsn"), ErrorCode::InternalServerError)]
fn pool_errors_map_to_codes(#[case] err: PoolError, #[case] code: ErrorCode) {
    let mapped = Error::from(err);
    assert_eq!(mapped.code(), code);
    assert!(!mapped.message().contains("syntax"));
}

#[rstest]
fn actix_errors_become_unexpected() {
    let err = actix_web::error::ErrorBadGateway("upstream exploded");

    let mapped = Error::from(err);

    assert_eq!(mapped.code(), ErrorCode::InternalServerError);
    assert_eq!(mapped.diagnostic(), Some("upstream exploded"));
}
