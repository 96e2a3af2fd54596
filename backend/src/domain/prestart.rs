//! Bounded retry loop that waits for the database before the service starts.
//!
//! Each attempt runs one [`ConnectivityCheck`]. Failures whose kind is listed
//! in [`RetryPolicy::fatal_kinds`] abort immediately; everything else is
//! retried after a fixed interval until the attempt budget is spent.

use std::time::Duration;

use tracing::{error, info, warn};

use super::ports::{ConnectivityCheck, PoolError, PoolErrorKind, ProbeSleeper};

/// Default number of attempts before giving up.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 300;

/// Default pause between attempts.
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(1);

/// How the probe treats a failed attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// Retry after the configured interval.
    Transient,
    /// Stop immediately and report the failure.
    Fatal,
}

/// Attempt budget, pacing, and fatal error kinds for the probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    interval: Duration,
    fatal_kinds: Vec<PoolErrorKind>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            interval: DEFAULT_INTERVAL,
            fatal_kinds: vec![PoolErrorKind::Configuration, PoolErrorKind::Unsupported],
        }
    }
}

impl RetryPolicy {
    /// Override the attempt budget. Values below one are raised to one.
    #[must_use]
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    /// Override the pause between attempts.
    #[must_use]
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Replace the set of error kinds that stop the probe immediately.
    #[must_use]
    pub fn with_fatal_kinds(mut self, kinds: impl IntoIterator<Item = PoolErrorKind>) -> Self {
        self.fatal_kinds = kinds.into_iter().collect();
        self
    }

    /// Maximum attempts, including the first.
    #[must_use]
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Pause between attempts.
    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Error kinds that stop the probe immediately.
    #[must_use]
    pub fn fatal_kinds(&self) -> &[PoolErrorKind] {
        &self.fatal_kinds
    }

    /// Decide whether `err` is worth retrying.
    #[must_use]
    pub fn classify(&self, err: &PoolError) -> Disposition {
        if self.fatal_kinds.contains(&err.kind()) {
            Disposition::Fatal
        } else {
            Disposition::Transient
        }
    }
}

/// Why the probe gave up.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProbeError {
    /// Every attempt failed with a retryable error.
    #[error("database unreachable after {attempts} attempts: {source}")]
    Exhausted {
        /// Attempts made.
        attempts: u32,
        /// Error from the last attempt.
        #[source]
        source: PoolError,
    },
    /// An attempt failed with an error configured as fatal.
    #[error("database check failed fatally on attempt {attempt}: {source}")]
    Fatal {
        /// Attempt that failed.
        attempt: u32,
        /// Error reported by that attempt.
        #[source]
        source: PoolError,
    },
}

impl ProbeError {
    /// Number of attempts made before giving up.
    #[must_use]
    pub fn attempts(&self) -> u32 {
        match self {
            Self::Exhausted { attempts, .. } => *attempts,
            Self::Fatal { attempt, .. } => *attempt,
        }
    }
}

/// Run `check` until it succeeds, a fatal error occurs, or the attempt
/// budget in `policy` is spent.
///
/// Returns the attempt number that succeeded. The sleeper is only invoked
/// between attempts, never after the last one.
///
/// # Errors
/// Returns [`ProbeError::Fatal`] on the first fatal failure and
/// [`ProbeError::Exhausted`] when no attempt succeeded.
///
/// # Examples
/// ```
/// use std::time::Duration;
///
/// use backend::domain::{RetryPolicy, wait_for_database};
/// use backend::test_support::{RecordingSleeper, ScriptedConnectivityCheck};
/// use backend::domain::ports::PoolError;
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let check = ScriptedConnectivityCheck::reachable_on_attempt(3, PoolError::checkout("refused"));
/// let sleeper = RecordingSleeper::default();
/// let attempt = wait_for_database(&check, &sleeper, &RetryPolicy::default())
///     .await
///     .expect("database becomes reachable");
/// assert_eq!(attempt, 3);
/// assert_eq!(sleeper.recorded(), vec![Duration::from_secs(1); 2]);
/// # });
/// ```
pub async fn wait_for_database(
    check: &dyn ConnectivityCheck,
    sleeper: &dyn ProbeSleeper,
    policy: &RetryPolicy,
) -> Result<u32, ProbeError> {
    let max_attempts = policy.max_attempts();
    let mut attempt = 1;
    loop {
        info!(attempt, max_attempts, "checking database availability");
        let source = match check.check().await {
            Ok(()) => {
                info!(attempt, "database is available");
                return Ok(attempt);
            }
            Err(source) => source,
        };

        if policy.classify(&source) == Disposition::Fatal {
            error!(attempt, error = %source, "database check failed fatally");
            return Err(ProbeError::Fatal { attempt, source });
        }
        if attempt >= max_attempts {
            error!(attempts = attempt, error = %source, "database check attempts exhausted");
            return Err(ProbeError::Exhausted {
                attempts: attempt,
                source,
            });
        }

        warn!(
            attempt,
            max_attempts,
            retry_in_ms = u64::try_from(policy.interval().as_millis()).unwrap_or(u64::MAX),
            error = %source,
            "database not available yet"
        );
        sleeper.sleep(policy.interval()).await;
        attempt += 1;
    }
}
