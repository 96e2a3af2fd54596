//! Application composition shared by the server binary and HTTP tests.

use actix_web::body::{BoxBody, EitherBody};
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};

use super::state::HttpState;
use super::{ApiResult, health, login, openapi, validation};
use crate::domain::Error;
use crate::middleware::RequestIdLayer;

/// Register the `/api/v1` routes and extractor configuration.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(validation::json_config())
        .app_data(validation::query_config())
        .app_data(validation::path_config())
        .service(
            web::scope("/api/v1")
                .service(health::health)
                .service(health::ready)
                .service(login::access_token)
                .service(openapi::openapi_json),
        );
}

/// Fallback for requests no route matches.
pub async fn not_found() -> ApiResult<actix_web::HttpResponse> {
    Err(Error::not_found(""))
}

/// Build the application with request-id middleware, routes and the
/// not-found fallback.
///
/// # Examples
/// ```
/// use actix_web::web;
/// use backend::inbound::http::{HttpState, build_app};
///
/// let _app = build_app(web::Data::new(HttpState::new("permit")));
/// ```
pub fn build_app(
    state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<EitherBody<BoxBody>>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(state)
        .wrap(RequestIdLayer)
        .configure(configure)
        .default_service(web::to(not_found))
}
