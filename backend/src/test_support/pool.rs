//! In-memory connection pool double.
//!
//! Tracks connection accounting the way a bounded pool does so tests can
//! observe checkout, return, and close behaviour without a database.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use crate::domain::ports::{ConnectionPool, Cursor, PoolError, PoolStatus, PooledCursor};

#[derive(Debug, Default)]
struct Slots {
    connections: u32,
    idle: u32,
    closed: bool,
    unreachable: bool,
    failing_queries: bool,
    executed: Vec<String>,
}

fn lock(slots: &Mutex<Slots>) -> MutexGuard<'_, Slots> {
    slots.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Bounded pool whose "connections" are counters.
///
/// # Examples
/// ```
/// use backend::domain::ports::ConnectionPool;
/// use backend::test_support::InMemoryPool;
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let pool = InMemoryPool::new(2);
/// let cursor = pool.cursor().await.expect("checkout succeeds");
/// assert_eq!(pool.status().idle_connections, 0);
/// drop(cursor);
/// assert_eq!(pool.status().idle_connections, 1);
/// # });
/// ```
#[derive(Debug, Clone)]
pub struct InMemoryPool {
    max_size: u32,
    slots: Arc<Mutex<Slots>>,
}

impl InMemoryPool {
    /// Reachable pool holding at most `max_size` connections.
    #[must_use]
    pub fn new(max_size: u32) -> Self {
        Self {
            max_size,
            slots: Arc::new(Mutex::new(Slots::default())),
        }
    }

    /// Pool whose checkouts fail as if the server refused connections.
    #[must_use]
    pub fn unreachable(max_size: u32) -> Self {
        let pool = Self::new(max_size);
        pool.set_reachable(false);
        pool
    }

    /// Make every executed statement fail.
    #[must_use]
    pub fn with_failing_queries(self) -> Self {
        self.set_failing_queries(true);
        self
    }

    /// Toggle whether executed statements fail.
    pub fn set_failing_queries(&self, failing: bool) {
        lock(&self.slots).failing_queries = failing;
    }

    /// Toggle whether checkouts succeed.
    pub fn set_reachable(&self, reachable: bool) {
        lock(&self.slots).unreachable = !reachable;
    }

    /// Statements executed so far, in order.
    #[must_use]
    pub fn executed(&self) -> Vec<String> {
        lock(&self.slots).executed.clone()
    }
}

#[async_trait]
impl ConnectionPool for InMemoryPool {
    async fn cursor(&self) -> Result<PooledCursor, PoolError> {
        {
            let mut slots = lock(&self.slots);
            if slots.closed {
                return Err(PoolError::Closed);
            }
            if slots.unreachable {
                return Err(PoolError::checkout("connection refused"));
            }
            if slots.idle > 0 {
                slots.idle -= 1;
            } else if slots.connections < self.max_size {
                slots.connections += 1;
            } else {
                return Err(PoolError::checkout("timed out waiting for connection"));
            }
        }
        Ok(Box::new(InMemoryCursor {
            slots: Arc::clone(&self.slots),
        }))
    }

    fn status(&self) -> PoolStatus {
        let slots = lock(&self.slots);
        PoolStatus {
            connections: slots.connections,
            idle_connections: slots.idle,
        }
    }

    fn close(&self) {
        let mut slots = lock(&self.slots);
        slots.closed = true;
        slots.connections -= slots.idle;
        slots.idle = 0;
    }

    fn is_closed(&self) -> bool {
        lock(&self.slots).closed
    }
}

struct InMemoryCursor {
    slots: Arc<Mutex<Slots>>,
}

#[async_trait]
impl Cursor for InMemoryCursor {
    async fn execute(&mut self, statement: &str) -> Result<(), PoolError> {
        let mut slots = lock(&self.slots);
        if slots.failing_queries {
            return Err(PoolError::query(format!("statement rejected: {statement}")));
        }
        slots.executed.push(statement.to_owned());
        Ok(())
    }
}

impl Drop for InMemoryCursor {
    fn drop(&mut self) {
        let mut slots = lock(&self.slots);
        if slots.closed {
            slots.connections = slots.connections.saturating_sub(1);
        } else {
            slots.idle += 1;
        }
    }
}
