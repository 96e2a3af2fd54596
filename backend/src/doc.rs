//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! document for the REST API. It registers the health, readiness and
//! login paths together with the response envelope schemas. The document is
//! served at `GET /api/v1/openapi.json` with the title replaced by the
//! configured project name.

use utoipa::OpenApi;

use crate::domain::{ErrorCode, ErrorDetail};
use crate::inbound::http::envelope::{ErrorBody, ErrorResponse};
use crate::inbound::http::health::{HealthStatus, ReadinessStatus};
use crate::inbound::http::login::LoginRequest;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "permit",
        description = "HTTP interface for health probes and authentication."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::health::health,
        crate::inbound::http::health::ready,
        crate::inbound::http::login::access_token,
    ),
    components(schemas(
        ErrorCode,
        ErrorDetail,
        ErrorBody,
        ErrorResponse,
        HealthStatus,
        ReadinessStatus,
        LoginRequest
    )),
    tags(
        (name = "health", description = "Liveness and readiness probes"),
        (name = "login", description = "Credential exchange")
    )
)]
pub struct ApiDoc;
