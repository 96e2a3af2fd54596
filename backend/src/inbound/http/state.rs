//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on the database lifecycle handle and a clock, and remain testable
//! without I/O.

use std::sync::Arc;

use mockable::{Clock, DefaultClock};

use crate::domain::ports::PooledCursor;
use crate::domain::{Database, Error};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    database: Option<Database>,
    project_name: String,
    clock: Arc<dyn Clock + Send + Sync>,
}

impl HttpState {
    /// State without a database pool, using the system clock.
    pub fn new(project_name: impl Into<String>) -> Self {
        Self {
            database: None,
            project_name: project_name.into(),
            clock: Arc::new(DefaultClock),
        }
    }

    /// Attach the started database.
    #[must_use]
    pub fn with_database(mut self, database: Database) -> Self {
        self.database = Some(database);
        self
    }

    /// Replace the clock used for response timestamps.
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock + Send + Sync>) -> Self {
        self.clock = clock;
        self
    }

    /// Borrow a cursor for one unit of work.
    ///
    /// The cursor returns its connection to the pool when dropped.
    ///
    /// # Errors
    /// `INTERNAL_SERVER_ERROR` when the application holds no pool, and the
    /// mapped pool error otherwise.
    pub async fn cursor(&self) -> Result<PooledCursor, Error> {
        let database = self
            .database
            .as_ref()
            .ok_or_else(|| Error::internal("Database pool is not initialised"))?;
        Ok(database.cursor().await?)
    }

    /// Configured project name.
    pub fn project_name(&self) -> &str {
        &self.project_name
    }

    /// Clock used for response timestamps.
    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }
}

impl std::fmt::Debug for HttpState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpState")
            .field("database", &self.database)
            .field("project_name", &self.project_name)
            .finish_non_exhaustive()
    }
}
