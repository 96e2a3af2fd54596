//! Health endpoints: a liveness heartbeat and a database-backed readiness
//! probe for orchestration and load balancers.
//!
//! ```text
//! GET /api/v1/health        {"data":{"status":"ok","timestamp":"..."}}
//! GET /api/v1/health/ready  {"data":{"status":"ready"}}
//! ```

use actix_web::{HttpResponse, get, http::header, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::ApiResult;
use super::envelope::{ErrorResponse, SuccessResponse};
use super::state::HttpState;
use crate::domain::CONNECTIVITY_PROBE;

/// Liveness payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HealthStatus {
    /// Always `ok` while the process serves requests.
    #[schema(example = "ok")]
    pub status: String,
    /// Server time when the response was produced.
    pub timestamp: DateTime<Utc>,
}

/// Readiness payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ReadinessStatus {
    /// Always `ready` when returned.
    #[schema(example = "ready")]
    pub status: String,
}

fn no_store() -> actix_web::HttpResponseBuilder {
    let mut builder = HttpResponse::Ok();
    builder.insert_header((header::CACHE_CONTROL, "no-store"));
    builder
}

/// Liveness heartbeat. Never touches the database.
#[utoipa::path(
    get,
    path = "/api/v1/health",
    tags = ["health"],
    responses(
        (status = 200, description = "Service is alive", body = SuccessResponse<HealthStatus>)
    )
)]
#[get("/health")]
pub async fn health(state: web::Data<HttpState>) -> HttpResponse {
    no_store().json(SuccessResponse::new(HealthStatus {
        status: "ok".to_owned(),
        timestamp: state.clock().utc(),
    }))
}

/// Readiness probe. Runs the connectivity statement through a scoped cursor.
#[utoipa::path(
    get,
    path = "/api/v1/health/ready",
    tags = ["health"],
    responses(
        (status = 200, description = "Database is reachable", body = SuccessResponse<ReadinessStatus>),
        (status = 500, description = "No database pool configured", body = ErrorResponse),
        (status = 503, description = "Database is unavailable", body = ErrorResponse)
    )
)]
#[get("/health/ready")]
pub async fn ready(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let mut cursor = state.cursor().await?;
    cursor.execute(CONNECTIVITY_PROBE).await?;
    drop(cursor);
    Ok(no_store().json(SuccessResponse::new(ReadinessStatus {
        status: "ready".to_owned(),
    })))
}
