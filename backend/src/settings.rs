//! Process configuration loaded via OrthoConfig.
//!
//! Values come from CLI flags, `USERINFO_*` environment variables and an
//! optional config file, in that order of precedence. Unset keys fall back to
//! the stock local deployment.

use std::net::SocketAddr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::outbound::persistence::StoreConfig;

const DEFAULT_MONGODB_URI: &str = "mongodb://localhost:27017";
const DEFAULT_DATABASE: &str = "userinfo";
const DEFAULT_COLLECTION: &str = "user";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";

/// Rejected configuration values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    #[error("bind address `{value}` is not a socket address")]
    InvalidBindAddr { value: String },
    #[error("connect timeout must be at least one second")]
    ZeroConnectTimeout,
}

/// Settings for the HTTP listener and the user store.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "USERINFO")]
pub struct ServerSettings {
    /// MongoDB connection string.
    pub mongodb_uri: Option<String>,
    /// Database holding the user collection.
    pub database: Option<String>,
    /// Collection of user documents.
    pub collection: Option<String>,
    /// Seconds allowed for connecting and the startup ping.
    #[ortho_config(default = 10)]
    pub connect_timeout_secs: u64,
    /// Listener address, `host:port`.
    pub bind_addr: Option<String>,
}

impl ServerSettings {
    pub fn mongodb_uri(&self) -> &str {
        self.mongodb_uri.as_deref().unwrap_or(DEFAULT_MONGODB_URI)
    }

    pub fn database(&self) -> &str {
        self.database.as_deref().unwrap_or(DEFAULT_DATABASE)
    }

    pub fn collection(&self) -> &str {
        self.collection.as_deref().unwrap_or(DEFAULT_COLLECTION)
    }

    /// Connect timeout, rejecting zero.
    pub fn connect_timeout(&self) -> Result<Duration, SettingsError> {
        match self.connect_timeout_secs {
            0 => Err(SettingsError::ZeroConnectTimeout),
            secs => Ok(Duration::from_secs(secs)),
        }
    }

    /// Parsed listener address.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let raw = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        raw.parse().map_err(|_| SettingsError::InvalidBindAddr {
            value: raw.to_owned(),
        })
    }

    /// Store settings for [`crate::outbound::persistence::connect`].
    pub fn store_config(&self) -> Result<StoreConfig, SettingsError> {
        Ok(StoreConfig::new(self.mongodb_uri())
            .with_database(self.database())
            .with_collection(self.collection())
            .with_connect_timeout(self.connect_timeout()?))
    }
}
