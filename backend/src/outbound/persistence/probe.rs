//! Connectivity check that opens a short-lived pool per attempt.

use async_trait::async_trait;
use tracing::debug;

use super::pool::{DieselPool, PoolConfig};
use crate::domain::check_connectivity;
use crate::domain::ports::{ConnectionPool, ConnectivityCheck, PoolError};

/// Checks reachability by running the connectivity probe through a
/// temporary pool built from the configured DSN.
///
/// The temporary pool is closed after every attempt, whether the probe
/// succeeded or not.
#[derive(Debug, Clone)]
pub struct DsnConnectivityCheck {
    config: PoolConfig,
}

impl DsnConnectivityCheck {
    /// Create a check for the given pool configuration.
    ///
    /// The temporary pool never keeps idle connections warm.
    pub fn new(config: PoolConfig) -> Self {
        Self {
            config: config.with_min_idle(None).with_max_size(1),
        }
    }
}

#[async_trait]
impl ConnectivityCheck for DsnConnectivityCheck {
    async fn check(&self) -> Result<(), PoolError> {
        let pool = DieselPool::connect_lazy(&self.config)?;
        let result = check_connectivity(&pool).await;
        pool.close();
        debug!(ok = result.is_ok(), "temporary probe pool closed");
        result
    }
}
