//! Lifecycle of the process-wide database pool.
//!
//! ```text
//! Uninitialized --start--> Probing --ok--> Ready --close--> Closed
//!                             |
//!                             +--probe failed--> FailedStartup
//! ```
//!
//! [`Database`] is built once during startup and injected into handlers
//! through application state. Handlers only borrow cursors; they never
//! mutate the pool.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{error, info, warn};

use super::ports::{ConnectionPool, PoolError, PoolStatus, PooledCursor};

/// Statement used to prove a connection is usable.
pub const CONNECTIVITY_PROBE: &str = "SELECT 1";

/// Lifecycle state of the shared pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolState {
    /// The pool object exists but has not been probed.
    Uninitialized,
    /// The startup connectivity check is running.
    Probing,
    /// The pool serves cursors.
    Ready,
    /// The pool has been closed during shutdown.
    Closed,
    /// The startup connectivity check failed; the pool is closed.
    FailedStartup,
}

/// Fatal errors raised while bringing the database online.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    /// The connectivity probe failed; the pool has already been closed.
    #[error("database connectivity check failed: {source}")]
    ConnectivityCheck {
        /// Underlying pool failure.
        #[source]
        source: PoolError,
    },
    /// `start` was called outside the `Uninitialized` state.
    #[error("database cannot start from the {state:?} state")]
    InvalidState {
        /// State observed when `start` was called.
        state: PoolState,
    },
}

/// Borrow a cursor and run [`CONNECTIVITY_PROBE`] on it.
///
/// The cursor is dropped, and its connection returned, before this returns.
pub async fn check_connectivity(pool: &dyn ConnectionPool) -> Result<(), PoolError> {
    let mut cursor = pool.cursor().await?;
    cursor.execute(CONNECTIVITY_PROBE).await
}

/// Application-scoped handle to the shared pool.
///
/// Cloning is cheap; all clones observe the same state.
///
/// # Examples
/// ```ignore
/// let database = Database::new(Arc::new(pool));
/// database.start().await?;
/// let mut cursor = database.cursor().await?;
/// cursor.execute("SELECT 1").await?;
/// drop(cursor);
/// database.close();
/// ```
#[derive(Clone)]
pub struct Database {
    inner: Arc<DatabaseInner>,
}

struct DatabaseInner {
    pool: Arc<dyn ConnectionPool>,
    state: Mutex<PoolState>,
    pool_closed: AtomicBool,
}

impl Database {
    /// Register a freshly constructed pool. No connection is opened yet.
    pub fn new(pool: Arc<dyn ConnectionPool>) -> Self {
        Self {
            inner: Arc::new(DatabaseInner {
                pool,
                state: Mutex::new(PoolState::Uninitialized),
                pool_closed: AtomicBool::new(false),
            }),
        }
    }

    /// Run the startup connectivity check.
    ///
    /// On success the pool becomes [`PoolState::Ready`]. On failure the pool
    /// is closed immediately, the state becomes [`PoolState::FailedStartup`],
    /// and the error must abort process start.
    ///
    /// # Errors
    /// Returns [`StartupError::ConnectivityCheck`] when the probe fails, and
    /// [`StartupError::InvalidState`] when called twice or when the database
    /// is closed before the check completes.
    pub async fn start(&self) -> Result<(), StartupError> {
        {
            let mut state = self.lock_state();
            if *state != PoolState::Uninitialized {
                return Err(StartupError::InvalidState { state: *state });
            }
            *state = PoolState::Probing;
        }

        info!("checking database connectivity");
        match check_connectivity(self.inner.pool.as_ref()).await {
            Ok(()) => {
                let mut state = self.lock_state();
                if *state != PoolState::Probing {
                    let closed_during_probe = *state;
                    drop(state);
                    warn!(state = ?closed_during_probe, "database closed during connectivity check");
                    return Err(StartupError::InvalidState {
                        state: closed_during_probe,
                    });
                }
                *state = PoolState::Ready;
                drop(state);
                info!("database connectivity check successful");
                Ok(())
            }
            Err(source) => {
                error!(error = %source, "database connectivity check failed");
                {
                    let mut state = self.lock_state();
                    if *state == PoolState::Probing {
                        *state = PoolState::FailedStartup;
                    }
                }
                self.close_pool();
                Err(StartupError::ConnectivityCheck { source })
            }
        }
    }

    /// Borrow a cursor for the duration of one unit of work.
    ///
    /// Dropping the cursor returns its connection to the pool.
    ///
    /// # Errors
    /// Returns [`PoolError::NotReady`] before a successful start,
    /// [`PoolError::Closed`] after shutdown, and the adapter's error when no
    /// connection can be borrowed.
    pub async fn cursor(&self) -> Result<PooledCursor, PoolError> {
        match self.state() {
            PoolState::Ready => self.inner.pool.cursor().await,
            PoolState::Closed | PoolState::FailedStartup => Err(PoolError::Closed),
            PoolState::Uninitialized | PoolState::Probing => Err(PoolError::NotReady),
        }
    }

    /// Close the pool during shutdown.
    ///
    /// Idempotent: the underlying pool is closed at most once, whichever path
    /// reaches it first.
    pub fn close(&self) {
        {
            let mut state = self.lock_state();
            if *state != PoolState::FailedStartup {
                *state = PoolState::Closed;
            }
        }
        if self.close_pool() {
            info!("database pool closed");
        } else {
            warn!("database pool already closed");
        }
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> PoolState {
        *self.lock_state()
    }

    /// Current pool occupancy.
    #[must_use]
    pub fn status(&self) -> PoolStatus {
        self.inner.pool.status()
    }

    fn close_pool(&self) -> bool {
        let first = !self.inner.pool_closed.swap(true, Ordering::AcqRel);
        if first {
            self.inner.pool.close();
        }
        first
    }

    fn lock_state(&self) -> MutexGuard<'_, PoolState> {
        self.inner
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for Database {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Database")
            .field("state", &self.state())
            .field("status", &self.status())
            .finish()
    }
}
