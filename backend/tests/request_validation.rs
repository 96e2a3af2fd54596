//! Behavioural tests for extractor validation failures.

#[path = "support_http/mod.rs"]
mod support_http;

use actix_web::http::{StatusCode, header};
use actix_web::test::{self, TestRequest};
use backend::domain::{ErrorCode, ErrorDetail};
use backend::inbound::http::HttpState;
use backend::inbound::http::envelope::ErrorResponse;
use rstest::rstest;
use serde_json::json;
use support_http::{PROJECT_NAME, init_app, request_id_header};

const LOGIN: &str = "/api/v1/login/access-token";

async fn post_login(req: TestRequest) -> (StatusCode, String, ErrorResponse) {
    let app = init_app(HttpState::new(PROJECT_NAME)).await;
    let res = test::call_service(&app, req.uri(LOGIN).to_request()).await;
    let status = res.status();
    let header = request_id_header(&res);
    let body: ErrorResponse = test::read_body_json(res).await;
    (status, header, body)
}

#[rstest]
#[case(json!({"username": "admin"}), "password")]
#[case(json!({"password": "secret"}), "username")]
#[actix_web::test]
async fn missing_field_names_the_field(
    #[case] payload: serde_json::Value,
    #[case] missing: &str,
) {
    let (status, header, body) = post_login(TestRequest::post().set_json(payload)).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body.error.code, ErrorCode::ValidationFailed);
    assert_eq!(body.error.http_status, 422);
    assert_eq!(
        body.error.details,
        vec![ErrorDetail::field(missing, "Field required")]
    );
    assert_eq!(body.error.request_id, header);
}

#[rstest]
#[actix_web::test]
async fn unknown_field_is_reported() {
    let payload = json!({"username": "admin", "password": "pw", "admin": true});

    let (status, _, body) = post_login(TestRequest::post().set_json(payload)).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body.error.details.len(), 1);
    assert_eq!(body.error.details[0].field.as_deref(), Some("admin"));
}

#[rstest]
#[actix_web::test]
async fn malformed_json_is_a_general_violation() {
    let req = TestRequest::post()
        .insert_header((header::CONTENT_TYPE, "application/json"))
        .set_payload("{\"username\":");

    let (status, _, body) = post_login(req).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body.error.code, ErrorCode::ValidationFailed);
    assert_eq!(body.error.details.len(), 1);
    assert!(body.error.details[0].field.is_none());
    assert!(!body.error.details[0].message.contains("at line"));
}

#[rstest]
#[actix_web::test]
async fn wrong_content_type_is_rejected() {
    let req = TestRequest::post()
        .insert_header((header::CONTENT_TYPE, "text/plain"))
        .set_payload("username=admin");

    let (status, _, body) = post_login(req).await;

    assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert_eq!(body.error.code, ErrorCode::InvalidRequest);
}
