//! Connectivity-check and sleeper doubles for pre-start probe tests.

use std::sync::Mutex;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use crate::domain::ports::{ConnectivityCheck, PoolError, ProbeSleeper};

/// Check that fails with a fixed error until a given attempt.
#[derive(Debug)]
pub struct ScriptedConnectivityCheck {
    succeed_on: Option<u32>,
    failure: PoolError,
    attempts: AtomicU32,
}

impl ScriptedConnectivityCheck {
    /// Fail with `failure` until attempt `attempt`, which succeeds.
    #[must_use]
    pub fn reachable_on_attempt(attempt: u32, failure: PoolError) -> Self {
        Self {
            succeed_on: Some(attempt),
            failure,
            attempts: AtomicU32::new(0),
        }
    }

    /// Fail with `failure` on every attempt.
    #[must_use]
    pub fn never_reachable(failure: PoolError) -> Self {
        Self {
            succeed_on: None,
            failure,
            attempts: AtomicU32::new(0),
        }
    }

    /// Number of checks performed so far.
    #[must_use]
    pub fn attempts(&self) -> u32 {
        self.attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ConnectivityCheck for ScriptedConnectivityCheck {
    async fn check(&self) -> Result<(), PoolError> {
        let attempt = self.attempts.fetch_add(1, Ordering::SeqCst) + 1;
        match self.succeed_on {
            Some(target) if attempt >= target => Ok(()),
            _ => Err(self.failure.clone()),
        }
    }
}

/// Sleeper recording requested durations without waiting.
#[derive(Debug, Default)]
pub struct RecordingSleeper(Mutex<Vec<Duration>>);

impl RecordingSleeper {
    /// Durations requested so far.
    #[must_use]
    pub fn recorded(&self) -> Vec<Duration> {
        match self.0.lock() {
            Ok(entries) => entries.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

#[async_trait]
impl ProbeSleeper for RecordingSleeper {
    async fn sleep(&self, duration: Duration) {
        let mut entries = match self.0.lock() {
            Ok(entries) => entries,
            Err(poisoned) => poisoned.into_inner(),
        };
        entries.push(duration);
    }
}
