//! Domain primitives and lifecycle rules.
//!
//! Purpose: Define the error taxonomy shared by every endpoint, the request
//! correlation identifier, and the database pool lifecycle. Types here know
//! nothing about HTTP framing or the concrete database driver; adapters in
//! `inbound` and `outbound` translate to and from them.
//!
//! Public surface:
//! - Error (alias to `error::Error`): API error payload with code and status.
//! - ErrorCode (alias to `error::ErrorCode`): stable error identifier.
//! - RequestId (alias to `request_id::RequestId`): per-request correlation id.
//! - Database (alias to `database::Database`): shared pool lifecycle.
//! - wait_for_database (alias to `prestart::wait_for_database`): bounded
//!   pre-start retry loop.

pub mod database;
pub mod error;
pub mod ports;
pub mod prestart;
pub mod request_id;

pub use self::database::{
    CONNECTIVITY_PROBE, Database, PoolState, StartupError, check_connectivity,
};
pub use self::error::{Error, ErrorCode, ErrorDetail, ErrorValidationError};
pub use self::prestart::{
    DEFAULT_INTERVAL, DEFAULT_MAX_ATTEMPTS, Disposition, ProbeError, RetryPolicy,
    wait_for_database,
};
pub use self::request_id::{REQUEST_ID_HEADER, RequestId, RequestIdError};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use backend::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<()> {
///     Err(Error::authorization("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
