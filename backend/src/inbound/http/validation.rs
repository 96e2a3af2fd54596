//! Extractor configuration turning request parse failures into envelopes.
//!
//! Actix reports malformed JSON bodies, query strings and path segments
//! through its own error types. These handlers translate them into
//! `VALIDATION_FAILED` errors whose details name the offending field where
//! the parser message identifies one.

use actix_web::error::{JsonPayloadError, PathError, QueryPayloadError};
use actix_web::{HttpRequest, web};

use crate::domain::{Error, ErrorCode, ErrorDetail};

const MISSING_FIELD: &str = "missing field ";
const UNKNOWN_FIELD: &str = "unknown field ";

/// JSON body extractor configuration.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req: &HttpRequest| json_error(err).into())
}

/// Query string extractor configuration.
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req: &HttpRequest| query_error(err).into())
}

/// Path segment extractor configuration.
pub fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(|err, _req: &HttpRequest| path_error(err).into())
}

fn json_error(err: JsonPayloadError) -> Error {
    match err {
        JsonPayloadError::Deserialize(source) => validation_failure(&source.to_string()),
        JsonPayloadError::ContentType => Error::new(
            ErrorCode::InvalidRequest,
            "Content type must be application/json",
        )
        .with_status(415),
        JsonPayloadError::Overflow { .. } | JsonPayloadError::OverflowKnownLength { .. } => {
            Error::new(ErrorCode::InvalidRequest, "Request body is too large").with_status(413)
        }
        other => Error::new(ErrorCode::InvalidRequest, other.to_string()),
    }
}

fn query_error(err: QueryPayloadError) -> Error {
    match err {
        QueryPayloadError::Deserialize(source) => validation_failure(&source.to_string()),
        other => Error::new(ErrorCode::InvalidRequest, other.to_string()),
    }
}

fn path_error(err: PathError) -> Error {
    match err {
        PathError::Deserialize(source) => validation_failure(&source.to_string()),
        other => Error::new(ErrorCode::InvalidRequest, other.to_string()),
    }
}

fn validation_failure(parser_message: &str) -> Error {
    Error::from_code(ErrorCode::ValidationFailed).with_detail(violation_detail(parser_message))
}

/// Derive one detail from a serde parser message.
///
/// "missing field" and "unknown field" messages yield a detail for the named
/// field. Other messages become general details with the position suffix
/// removed.
fn violation_detail(parser_message: &str) -> ErrorDetail {
    let message = strip_position(parser_message);
    if let Some(field) = backticked_after(message, MISSING_FIELD) {
        return ErrorDetail::field(field, "Field required");
    }
    if let Some(field) = backticked_after(message, UNKNOWN_FIELD) {
        return ErrorDetail::field(field, "Unknown field");
    }
    ErrorDetail::general(message)
}

fn strip_position(message: &str) -> &str {
    message
        .rfind(" at line ")
        .map_or(message, |index| &message[..index])
}

fn backticked_after<'a>(message: &'a str, prefix: &str) -> Option<&'a str> {
    let rest = message.strip_prefix(prefix)?.strip_prefix('`')?;
    let end = rest.find('`')?;
    Some(&rest[..end])
}
