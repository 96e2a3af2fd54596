//! Serves the generated OpenAPI document.

use actix_web::{HttpResponse, get, web};
use utoipa::OpenApi;

use super::state::HttpState;
use crate::doc::ApiDoc;

/// `GET /api/v1/openapi.json`, titled with the configured project name.
#[get("/openapi.json")]
pub async fn openapi_json(state: web::Data<HttpState>) -> HttpResponse {
    let mut document = ApiDoc::openapi();
    state.project_name().clone_into(&mut document.info.title);
    HttpResponse::Ok().json(document)
}
