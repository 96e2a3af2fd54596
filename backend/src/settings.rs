//! Application settings loaded via OrthoConfig.
//!
//! Values are layered from CLI flags, `PERMIT_*` environment variables and
//! an optional configuration file. Only the database DSN is required.

use std::net::SocketAddr;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::outbound::persistence::PoolConfig;

const DEFAULT_PROJECT_NAME: &str = "permit";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_POOL_MAX_SIZE: u32 = 10;

/// Errors raised when settings are present but unusable.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// `PERMIT_DATABASE_DSN` was not supplied.
    #[error("database DSN is not configured; set PERMIT_DATABASE_DSN")]
    MissingDsn,
    /// The bind address does not parse as `host:port`.
    #[error("invalid bind address {value:?}: {source}")]
    InvalidBindAddr {
        /// Configured value.
        value: String,
        /// Parser failure.
        #[source]
        source: std::net::AddrParseError,
    },
}

/// Configuration consumed by the server and the pre-start probe.
#[derive(Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "PERMIT")]
pub struct AppSettings {
    /// PostgreSQL connection string.
    pub database_dsn: Option<String>,
    /// Human-readable project name used as the API title.
    #[ortho_config(default = DEFAULT_PROJECT_NAME.to_owned())]
    pub project_name: String,
    /// Socket address the HTTP server binds to.
    #[ortho_config(default = DEFAULT_BIND_ADDR.to_owned())]
    pub bind_addr: String,
    /// Maximum number of pooled database connections.
    #[ortho_config(default = DEFAULT_POOL_MAX_SIZE)]
    pub pool_max_size: u32,
}

impl AppSettings {
    /// Return the configured DSN.
    ///
    /// # Errors
    /// [`SettingsError::MissingDsn`] when absent or blank.
    pub fn database_dsn(&self) -> Result<&str, SettingsError> {
        self.database_dsn
            .as_deref()
            .filter(|dsn| !dsn.trim().is_empty())
            .ok_or(SettingsError::MissingDsn)
    }

    /// Return the configured project name.
    pub fn project_name(&self) -> &str {
        &self.project_name
    }

    /// Return the parsed bind address.
    ///
    /// # Errors
    /// [`SettingsError::InvalidBindAddr`] when the value does not parse.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        self.bind_addr
            .parse()
            .map_err(|source| SettingsError::InvalidBindAddr {
                value: self.bind_addr.clone(),
                source,
            })
    }

    /// Return the pool size.
    pub fn pool_max_size(&self) -> u32 {
        self.pool_max_size
    }

    /// Build the pool configuration from these settings.
    ///
    /// # Errors
    /// [`SettingsError::MissingDsn`] when no DSN is configured.
    pub fn pool_config(&self) -> Result<PoolConfig, SettingsError> {
        Ok(PoolConfig::new(self.database_dsn()?).with_max_size(self.pool_max_size()))
    }
}

// The DSN carries credentials; keep it out of logs.
impl std::fmt::Debug for AppSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppSettings")
            .field(
                "database_dsn",
                &self.database_dsn.as_ref().map(|_| "<redacted>"),
            )
            .field("project_name", &self.project_name)
            .field("bind_addr", &self.bind_addr)
            .field("pool_max_size", &self.pool_max_size)
            .finish()
    }
}
