//! Driven port for one database reachability check.

use std::time::Duration;

use async_trait::async_trait;

use super::PoolError;

/// Performs a single connectivity check against the database.
///
/// Each call is independent: implementations open whatever resources they
/// need and release them before returning, on success and failure alike.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ConnectivityCheck: Send + Sync {
    /// Run the check once.
    async fn check(&self) -> Result<(), PoolError>;
}

/// Async clock-independent sleeping abstraction for retries.
#[async_trait]
pub trait ProbeSleeper: Send + Sync {
    /// Suspend execution for `duration`.
    async fn sleep(&self, duration: Duration);
}

/// Sleeper backed by the tokio timer.
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioSleeper;

#[async_trait]
impl ProbeSleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}
