//! Shared helpers for HTTP behaviour tests.

#![allow(dead_code, reason = "each test crate uses a subset of the helpers")]

use std::sync::Arc;

use actix_http::Request;
use actix_web::body::{BoxBody, EitherBody};
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{test, web};
use backend::domain::Database;
use backend::inbound::http::{HttpState, build_app};
use backend::test_support::InMemoryPool;

pub const PROJECT_NAME: &str = "permit-test";

/// Initialise the full application around `state`.
pub async fn init_app(
    state: HttpState,
) -> impl Service<Request, Response = ServiceResponse<EitherBody<BoxBody>>, Error = actix_web::Error>
{
    test::init_service(build_app(web::Data::new(state))).await
}

/// Start a database over `pool` and wrap it in HTTP state.
pub async fn started_state(pool: &InMemoryPool) -> (HttpState, Database) {
    let database = Database::new(Arc::new(pool.clone()));
    database.start().await.expect("in-memory pool starts");
    let state = HttpState::new(PROJECT_NAME).with_database(database.clone());
    (state, database)
}

/// Read the `X-Request-ID` response header.
pub fn request_id_header<B>(res: &ServiceResponse<B>) -> String {
    res.headers()
        .get("x-request-id")
        .expect("request id header")
        .to_str()
        .expect("header is ascii")
        .to_owned()
}
