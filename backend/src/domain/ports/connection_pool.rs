//! Driven port for pooled database connections.
//!
//! The domain only needs a narrow contract from the pool library: borrow a
//! connection as a cursor, execute statements on it, report pool occupancy,
//! and close. Adapters implement it over a real driver; tests substitute an
//! in-memory double.

use async_trait::async_trait;

/// Coarse classification of [`PoolError`] used by retry policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PoolErrorKind {
    /// The pool could not be configured (bad DSN, invalid settings).
    Configuration,
    /// No connection could be borrowed in time.
    Checkout,
    /// A statement failed on a borrowed connection.
    Query,
    /// The pool has been closed or is not accepting checkouts.
    Unavailable,
    /// The adapter does not implement the requested operation.
    Unsupported,
}

/// Errors raised by pool adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PoolError {
    /// Failed to build the connection pool.
    #[error("failed to build connection pool: {message}")]
    Build { message: String },

    /// Failed to check out a connection from the pool.
    #[error("failed to get connection from pool: {message}")]
    Checkout { message: String },

    /// A statement failed on a borrowed connection.
    #[error("query failed: {message}")]
    Query { message: String },

    /// The pool has been closed.
    #[error("connection pool is closed")]
    Closed,

    /// The pool has not passed its startup connectivity check.
    #[error("connection pool is not ready")]
    NotReady,

    /// The adapter does not support the requested operation.
    #[error("operation not supported: {message}")]
    Unsupported { message: String },
}

impl PoolError {
    /// Create a build error with the given message.
    pub fn build(message: impl Into<String>) -> Self {
        Self::Build {
            message: message.into(),
        }
    }

    /// Create a checkout error with the given message.
    pub fn checkout(message: impl Into<String>) -> Self {
        Self::Checkout {
            message: message.into(),
        }
    }

    /// Create a query error with the given message.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }

    /// Create an unsupported-operation error with the given message.
    pub fn unsupported(message: impl Into<String>) -> Self {
        Self::Unsupported {
            message: message.into(),
        }
    }

    /// Classify the error for retry decisions.
    #[must_use]
    pub fn kind(&self) -> PoolErrorKind {
        match self {
            Self::Build { .. } => PoolErrorKind::Configuration,
            Self::Checkout { .. } => PoolErrorKind::Checkout,
            Self::Query { .. } => PoolErrorKind::Query,
            Self::Closed | Self::NotReady => PoolErrorKind::Unavailable,
            Self::Unsupported { .. } => PoolErrorKind::Unsupported,
        }
    }
}

/// Snapshot of pool occupancy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PoolStatus {
    /// Live connections, borrowed or idle.
    pub connections: u32,
    /// Live connections currently available for checkout.
    pub idle_connections: u32,
}

/// Statement executor bound to one borrowed connection.
///
/// Dropping the cursor closes it and returns the connection to its pool, so
/// release happens on every exit path, including early returns and future
/// cancellation.
#[async_trait]
pub trait Cursor: Send {
    /// Execute a statement, discarding any rows it produces.
    async fn execute(&mut self, statement: &str) -> Result<(), PoolError>;
}

/// Owned cursor handed to callers.
pub type PooledCursor = Box<dyn Cursor>;

/// Bounded set of live database connections shared across requests.
#[async_trait]
pub trait ConnectionPool: Send + Sync {
    /// Borrow a connection and open a cursor on it.
    async fn cursor(&self) -> Result<PooledCursor, PoolError>;

    /// Current occupancy. A closed pool reports zero connections once every
    /// borrowed cursor has been dropped.
    fn status(&self) -> PoolStatus;

    /// Release idle connections and refuse further checkouts.
    fn close(&self);

    /// Whether [`ConnectionPool::close`] has been called.
    fn is_closed(&self) -> bool;
}
