//! HTTP adapter mapping for domain errors.
//!
//! Purpose: keep the domain error type HTTP-agnostic while allowing Actix
//! handlers to turn domain failures into consistent JSON envelopes, status
//! codes, and `X-Request-ID` headers.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use tracing::{error, warn};

use super::envelope::ErrorResponse;
use crate::domain::ports::PoolError;
use crate::domain::{Error, ErrorCode, REQUEST_ID_HEADER, RequestId};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

fn log_rendered(error: &Error, request_id: &RequestId) {
    let code = error.code().as_str();
    if let Some(diagnostic) = error.diagnostic() {
        error!(%request_id, code, diagnostic, "unexpected error");
    } else if error.code() == ErrorCode::ValidationFailed {
        warn!(
            %request_id,
            code,
            violations = error.details().len(),
            "request validation failed"
        );
    } else {
        warn!(%request_id, code, message = error.message(), "request failed");
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    fn error_response(&self) -> HttpResponse {
        let request_id = self
            .request_id()
            .cloned()
            .unwrap_or_else(RequestId::current_or_generate);
        log_rendered(self, &request_id);

        HttpResponse::build(self.status_code())
            .insert_header((REQUEST_ID_HEADER, request_id.as_str()))
            .json(ErrorResponse::from_error(self, &request_id))
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        // Do not leak implementation details to clients.
        Error::unexpected(err)
    }
}

impl From<PoolError> for Error {
    fn from(err: PoolError) -> Self {
        match err {
            PoolError::Checkout { .. } | PoolError::Closed | PoolError::NotReady => {
                warn!(error = %err, "database unavailable");
                Error::service_unavailable("Database is unavailable")
            }
            PoolError::Build { .. } | PoolError::Query { .. } | PoolError::Unsupported { .. } => {
                Error::unexpected(err)
            }
        }
    }
}

#[cfg(test)]
mod tests;
