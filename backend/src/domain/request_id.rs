//! Request-scoped correlation identifier for logs and error envelopes.
//!
//! `RequestId` follows a request through the system. It uses task-local
//! storage so handlers and error constructors can read the current identifier
//! without explicit parameter threading.
//!
//! Tokio task-local variables are not inherited across spawned tasks. Use
//! [`RequestId::scope`] when spawning new tasks or moving work onto blocking
//! threads to ensure the active request identifier propagates correctly.

use std::future::Future;
use std::sync::Arc;

use tokio::task_local;
use uuid::Uuid;

/// Header carrying the request identifier inbound and outbound.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

task_local! {
    /// Task-local storage for the current request identifier.
    pub(crate) static REQUEST_ID: RequestId;
}

/// Reasons an inbound identifier is rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RequestIdError {
    /// The value is empty.
    #[error("request id must not be empty")]
    Empty,
    /// The value exceeds [`RequestId::MAX_LEN`] bytes.
    #[error("request id is {0} bytes long; the limit is 200")]
    TooLong(usize),
    /// The value contains whitespace, control, or non-ASCII characters.
    #[error("request id must consist of visible ASCII characters")]
    InvalidCharacter,
}

/// Per-request correlation identifier exposed via task-local storage.
///
/// # Examples
/// ```
/// use backend::domain::RequestId;
///
/// async fn handler() {
///     if let Some(id) = RequestId::current() {
///         println!("request id: {id}");
///     }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RequestId(Arc<str>);

impl RequestId {
    /// Longest inbound identifier accepted, in bytes.
    pub const MAX_LEN: usize = 200;

    /// Generate a new random identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(Arc::from(Uuid::new_v4().to_string()))
    }

    /// Validate an inbound identifier.
    ///
    /// Accepted values are non-empty, at most [`Self::MAX_LEN`] bytes, and
    /// consist of visible ASCII so they can be echoed in a response header.
    pub fn parse(value: &str) -> Result<Self, RequestIdError> {
        if value.is_empty() {
            return Err(RequestIdError::Empty);
        }
        if value.len() > Self::MAX_LEN {
            return Err(RequestIdError::TooLong(value.len()));
        }
        if !value.bytes().all(|byte| byte.is_ascii_graphic()) {
            return Err(RequestIdError::InvalidCharacter);
        }
        Ok(Self(Arc::from(value)))
    }

    /// Returns the current request identifier if one is in scope.
    #[must_use]
    pub fn current() -> Option<Self> {
        REQUEST_ID.try_with(Clone::clone).ok()
    }

    /// Returns the identifier in scope or a freshly generated one.
    #[must_use]
    pub fn current_or_generate() -> Self {
        Self::current().unwrap_or_else(Self::generate)
    }

    /// Borrow the identifier text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Execute the provided future with the supplied identifier in scope.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::RequestId;
    ///
    /// # tokio::runtime::Runtime::new().unwrap().block_on(async {
    /// let request_id: RequestId = "abc".parse().expect("valid request id");
    /// let observed = RequestId::scope(request_id.clone(), async { RequestId::current() }).await;
    /// assert_eq!(observed, Some(request_id));
    /// # });
    /// ```
    pub async fn scope<Fut>(request_id: Self, fut: Fut) -> Fut::Output
    where
        Fut: Future,
    {
        REQUEST_ID.scope(request_id, fut).await
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for RequestId {
    type Err = RequestIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
