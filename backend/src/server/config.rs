//! HTTP server configuration object and helpers.

use std::net::SocketAddr;

use backend::settings::{AppSettings, SettingsError};

/// Builder-style configuration for creating the HTTP server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) project_name: String,
}

impl ServerConfig {
    /// Construct a server configuration from loaded settings.
    ///
    /// # Errors
    /// Propagates an unparsable bind address.
    pub fn from_settings(settings: &AppSettings) -> Result<Self, SettingsError> {
        Ok(Self {
            bind_addr: settings.bind_addr()?,
            project_name: settings.project_name().to_owned(),
        })
    }
}
