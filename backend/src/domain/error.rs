//! Domain-level error types.
//!
//! These errors are transport agnostic apart from the HTTP status they carry:
//! every failure a handler can report is one [`Error`] value. Inbound adapters
//! render it into the JSON error envelope exactly once, at the boundary.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::request_id::RequestId;

/// Stable machine-readable error code describing the failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// The request failed schema or field validation.
    ValidationFailed,
    /// The request is malformed in a way validation does not describe.
    InvalidRequest,
    /// Supplied credentials were rejected.
    AuthInvalid,
    /// Credentials are required but were not supplied.
    AuthRequired,
    /// Authenticated but not permitted to perform this action.
    Forbidden,
    /// The requested resource does not exist.
    ResourceNotFound,
    /// A resource with the same identity already exists.
    ResourceAlreadyExists,
    /// The request conflicts with the current state of a resource.
    ResourceConflict,
    /// A business rule rejected the request.
    BusinessLogicError,
    /// The resource is in a state that does not allow the operation.
    InvalidState,
    /// An unexpected error occurred on the server.
    InternalServerError,
    /// A dependency such as the database is not available.
    ServiceUnavailable,
}

impl ErrorCode {
    /// Wire representation of the code.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::ErrorCode;
    ///
    /// assert_eq!(ErrorCode::ResourceNotFound.as_str(), "RESOURCE_NOT_FOUND");
    /// ```
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ValidationFailed => "VALIDATION_FAILED",
            Self::InvalidRequest => "INVALID_REQUEST",
            Self::AuthInvalid => "AUTH_INVALID",
            Self::AuthRequired => "AUTH_REQUIRED",
            Self::Forbidden => "FORBIDDEN",
            Self::ResourceNotFound => "RESOURCE_NOT_FOUND",
            Self::ResourceAlreadyExists => "RESOURCE_ALREADY_EXISTS",
            Self::ResourceConflict => "RESOURCE_CONFLICT",
            Self::BusinessLogicError => "BUSINESS_LOGIC_ERROR",
            Self::InvalidState => "INVALID_STATE",
            Self::InternalServerError => "INTERNAL_SERVER_ERROR",
            Self::ServiceUnavailable => "SERVICE_UNAVAILABLE",
        }
    }

    /// HTTP status used when an error of this code does not override it.
    #[must_use]
    pub const fn default_status(self) -> u16 {
        match self {
            Self::InvalidRequest => 400,
            Self::AuthInvalid | Self::AuthRequired => 401,
            Self::Forbidden => 403,
            Self::ResourceNotFound => 404,
            Self::ResourceAlreadyExists | Self::ResourceConflict | Self::InvalidState => 409,
            Self::ValidationFailed | Self::BusinessLogicError => 422,
            Self::InternalServerError => 500,
            Self::ServiceUnavailable => 503,
        }
    }

    /// Client-facing message used when none is supplied.
    #[must_use]
    pub const fn default_message(self) -> &'static str {
        match self {
            Self::ValidationFailed => "Invalid request parameters",
            Self::InvalidRequest => "Invalid request",
            Self::AuthInvalid => "Invalid credentials",
            Self::AuthRequired => "Authentication required",
            Self::Forbidden => "Access denied",
            Self::ResourceNotFound => "Resource not found",
            Self::ResourceAlreadyExists => "Resource already exists",
            Self::ResourceConflict => "Resource conflict",
            Self::BusinessLogicError => "Business logic error",
            Self::InvalidState => "Invalid resource state",
            Self::InternalServerError => "Internal server error",
            Self::ServiceUnavailable => "Service unavailable",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of an error's `details` list.
///
/// `field` names the offending input path for validation failures and is
/// `null` on the wire for general remarks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorDetail {
    /// Path of the offending field, if the detail concerns one.
    #[schema(example = "email")]
    pub field: Option<String>,
    /// Detailed explanation.
    #[schema(example = "Invalid email format")]
    pub message: String,
}

impl ErrorDetail {
    /// Detail attached to a specific input field.
    pub fn field(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: Some(field.into()),
            message: message.into(),
        }
    }

    /// Detail that does not concern a single field.
    pub fn general(message: impl Into<String>) -> Self {
        Self {
            field: None,
            message: message.into(),
        }
    }
}

/// Validation errors emitted by the fallible constructor.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ErrorValidationError {
    /// The message is empty once trimmed.
    #[error("error message must not be empty")]
    EmptyMessage,
    /// The status is not an HTTP error status.
    #[error("http status {0} is not in the 400..=599 range")]
    InvalidStatus(u16),
}

/// Error returned by handlers and rendered into the error envelope.
///
/// ## Invariants
/// - `message` is non-empty once trimmed of whitespace.
/// - `http_status` lies in `400..=599`.
///
/// The request identifier in scope at construction time is captured so the
/// rendered envelope correlates with server logs even when rendering happens
/// elsewhere.
///
/// # Examples
/// ```
/// use backend::domain::{Error, ErrorCode};
///
/// let err = Error::not_found("user 42 does not exist");
/// assert_eq!(err.code(), ErrorCode::ResourceNotFound);
/// assert_eq!(err.http_status(), 404);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    code: ErrorCode,
    message: String,
    http_status: u16,
    details: Vec<ErrorDetail>,
    request_id: Option<RequestId>,
    diagnostic: Option<String>,
}

impl Error {
    /// Fallible constructor validating message and status.
    pub fn try_new(
        code: ErrorCode,
        message: impl Into<String>,
        http_status: u16,
    ) -> Result<Self, ErrorValidationError> {
        let message = message.into();
        if message.trim().is_empty() {
            return Err(ErrorValidationError::EmptyMessage);
        }
        if !(400..=599).contains(&http_status) {
            return Err(ErrorValidationError::InvalidStatus(http_status));
        }
        Ok(Self {
            code,
            message,
            http_status,
            details: Vec::new(),
            request_id: RequestId::current(),
            diagnostic: None,
        })
    }

    /// Create an error with the code's default status.
    ///
    /// A blank message falls back to [`ErrorCode::default_message`].
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::from_code(code).with_message(message)
    }

    /// Create an error carrying the code's default status and message.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::{Error, ErrorCode};
    ///
    /// let err = Error::from_code(ErrorCode::Forbidden);
    /// assert_eq!(err.message(), "Access denied");
    /// assert_eq!(err.http_status(), 403);
    /// ```
    #[must_use]
    pub fn from_code(code: ErrorCode) -> Self {
        Self {
            code,
            message: code.default_message().to_owned(),
            http_status: code.default_status(),
            details: Vec::new(),
            request_id: RequestId::current(),
            diagnostic: None,
        }
    }

    /// Replace the client-facing message. Blank messages are ignored.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        let message = message.into();
        if !message.trim().is_empty() {
            self.message = message;
        }
        self
    }

    /// Override the HTTP status. Values outside `400..=599` are ignored.
    #[must_use]
    pub fn with_status(mut self, http_status: u16) -> Self {
        if (400..=599).contains(&http_status) {
            self.http_status = http_status;
        }
        self
    }

    /// Replace the details list.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::{Error, ErrorDetail};
    ///
    /// let err = Error::validation("bad input")
    ///     .with_details(vec![ErrorDetail::field("email", "Invalid email format")]);
    /// assert_eq!(err.details().len(), 1);
    /// ```
    #[must_use]
    pub fn with_details(mut self, details: Vec<ErrorDetail>) -> Self {
        self.details = details;
        self
    }

    /// Append one detail entry.
    #[must_use]
    pub fn with_detail(mut self, detail: ErrorDetail) -> Self {
        self.details.push(detail);
        self
    }

    /// Attach an explicit request identifier.
    #[must_use]
    pub fn with_request_id(mut self, request_id: RequestId) -> Self {
        self.request_id = Some(request_id);
        self
    }

    /// Wrap an unexpected failure.
    ///
    /// The client sees a generic internal error with no details; `source` is
    /// kept as a server-side diagnostic for logging only.
    pub fn unexpected(source: impl std::fmt::Display) -> Self {
        let mut error = Self::from_code(ErrorCode::InternalServerError);
        error.diagnostic = Some(source.to_string());
        error
    }

    /// Convenience constructor for [`ErrorCode::ValidationFailed`] (422).
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValidationFailed, message)
    }

    /// Convenience constructor for [`ErrorCode::AuthInvalid`] (401).
    pub fn authentication(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::AuthInvalid, message)
    }

    /// Convenience constructor for [`ErrorCode::Forbidden`] (403).
    pub fn authorization(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Forbidden, message)
    }

    /// Convenience constructor for [`ErrorCode::ResourceNotFound`] (404).
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ResourceNotFound, message)
    }

    /// Convenience constructor for [`ErrorCode::ResourceConflict`] (409).
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ResourceConflict, message)
    }

    /// Convenience constructor for [`ErrorCode::BusinessLogicError`] (422).
    pub fn business_logic(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::BusinessLogicError, message)
    }

    /// Convenience constructor for [`ErrorCode::InternalServerError`] (500).
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalServerError, message)
    }

    /// Convenience constructor for [`ErrorCode::ServiceUnavailable`] (503).
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ServiceUnavailable, message)
    }

    /// Stable machine-readable error code.
    #[must_use]
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Human-readable message returned to clients.
    #[must_use]
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// HTTP status the error renders with.
    #[must_use]
    pub fn http_status(&self) -> u16 {
        self.http_status
    }

    /// Structured details, in insertion order.
    #[must_use]
    pub fn details(&self) -> &[ErrorDetail] {
        &self.details
    }

    /// Request identifier captured when the error was built.
    #[must_use]
    pub fn request_id(&self) -> Option<&RequestId> {
        self.request_id.as_ref()
    }

    /// Server-side diagnostic for unexpected failures. Never sent to clients.
    #[must_use]
    pub fn diagnostic(&self) -> Option<&str> {
        self.diagnostic.as_deref()
    }
}

impl From<ErrorCode> for Error {
    fn from(code: ErrorCode) -> Self {
        Self::from_code(code)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests;
