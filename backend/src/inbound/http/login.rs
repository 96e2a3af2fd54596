//! Login handlers.
//!
//! ```text
//! POST /api/v1/login/access-token {"username":"admin","password":"password"}
//! ```
//!
//! No credential store exists yet: well-formed requests are always rejected
//! with `AUTH_INVALID`.

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::ApiResult;
use super::envelope::ErrorResponse;
use crate::domain::Error;

/// Login request body for `POST /api/v1/login/access-token`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct LoginRequest {
    /// Account name.
    pub username: String,
    /// Account password.
    pub password: String,
}

/// Exchange credentials for an access token.
#[utoipa::path(
    post,
    path = "/api/v1/login/access-token",
    request_body = LoginRequest,
    tags = ["login"],
    responses(
        (status = 401, description = "Invalid credentials", body = ErrorResponse),
        (status = 422, description = "Malformed request body", body = ErrorResponse)
    )
)]
#[post("/login/access-token")]
pub async fn access_token(payload: web::Json<LoginRequest>) -> ApiResult<HttpResponse> {
    let LoginRequest { username, .. } = payload.into_inner();
    tracing::debug!(%username, "login attempted without a credential store");
    Err(Error::authentication("Incorrect username or password"))
}
